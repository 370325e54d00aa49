//! The AI mediator: one operation, one prompt, one provider call.

use std::fmt;
use std::sync::Arc;

use scrumboard_core::assistant::TicketActivity;

use crate::error::AiError;
use crate::prompts;
use crate::provider::{collect_fragments, CompletionProvider, CompletionRequest};

/// The assistant operations and their fixed generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Summarize,
    RecommendTasks,
    DetectBlockers,
}

impl Operation {
    pub fn temperature(self) -> f32 {
        match self {
            Self::Summarize | Self::DetectBlockers => 0.0,
            Self::RecommendTasks => 0.2,
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Self::Summarize | Self::DetectBlockers => 300,
            Self::RecommendTasks => 400,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::RecommendTasks => "recommend_tasks",
            Self::DetectBlockers => "detect_blockers",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds prompts and reduces provider answers to trimmed text.
///
/// Stateless apart from the injected provider, so one instance is shared
/// by all concurrent requests. Inputs are expected to be validated by the
/// caller. Dropping a returned future cancels the in-flight provider call.
#[derive(Clone)]
pub struct AiMediator {
    provider: Arc<dyn CompletionProvider>,
    stream: bool,
}

impl AiMediator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            stream: false,
        }
    }

    /// Request streamed completions instead of single responses.
    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Daily summary with yesterday's progress, today's objectives and blockers.
    pub async fn summarize(&self, text: &str) -> Result<String, AiError> {
        self.run(Operation::Summarize, prompts::summary_prompt(text))
            .await
    }

    /// Three new task suggestions, expected (not checked) to be JSON of the
    /// form `{"tareas": [...]}`.
    pub async fn recommend_tasks(
        &self,
        objective: &str,
        history: &[String],
    ) -> Result<String, AiError> {
        self.run(
            Operation::RecommendTasks,
            prompts::recommend_tasks_prompt(objective, history),
        )
        .await
    }

    /// Blocked-ticket analysis, expected (not checked) to be JSON of the
    /// form `{"bloqueados": [{"titulo": ..., "razon": ...}]}`.
    pub async fn detect_blockers(&self, tickets: &[TicketActivity]) -> Result<String, AiError> {
        self.run(
            Operation::DetectBlockers,
            prompts::detect_blockers_prompt(tickets),
        )
        .await
    }

    async fn run(&self, operation: Operation, prompt: String) -> Result<String, AiError> {
        let request = CompletionRequest::new(prompt)
            .with_temperature(operation.temperature())
            .with_max_tokens(operation.max_tokens())
            .with_stream(self.stream);

        tracing::debug!(
            %operation,
            provider = self.provider.name(),
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            stream = request.stream,
            prompt_len = request.prompt.len(),
            "Sending completion request"
        );

        let result = if request.stream {
            match self.provider.stream(&request).await {
                Ok(fragments) => collect_fragments(fragments).await,
                Err(e) => Err(e),
            }
        } else {
            self.provider.complete(&request).await
        };

        match result {
            Ok(text) => {
                let text = text.trim().to_string();
                tracing::info!(%operation, response_len = text.len(), "Completion received");
                Ok(text)
            }
            Err(e) => {
                tracing::warn!(%operation, error = %e, "Completion provider call failed");
                Err(e)
            }
        }
    }
}
