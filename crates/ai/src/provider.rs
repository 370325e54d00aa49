//! The completion provider capability and response reduction.
//!
//! A provider answers a [`CompletionRequest`] either with one complete
//! text payload or with an ordered stream of fragments. The mediator
//! reduces both to the same string, so the two modes are interchangeable.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use crate::error::AiError;

/// `top_p` sent with every request.
pub const DEFAULT_TOP_P: f32 = 0.95;

/// Incremental completion fragments in arrival order.
///
/// `Ok(None)` stands for a chunk without text (role-only or keep-alive
/// chunks); it is skipped during reduction. Any `Err` fails the call.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<Option<String>, AiError>> + Send>>;

/// One prompt plus its generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Sampling temperature; `0.0` asks for deterministic output.
    pub temperature: f32,
    /// Output token budget.
    pub max_tokens: u32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    /// Whether the provider should stream incremental fragments.
    pub stream: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.0,
            max_tokens: 300,
            top_p: DEFAULT_TOP_P,
            stream: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// A language-model completion service.
///
/// Implementations perform exactly one network round trip per call and
/// never retry. Both methods return the provider's text untouched;
/// trimming is the mediator's job.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Request a complete (non-streamed) answer and return its text payload.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;

    /// Request a streamed answer.
    async fn stream(&self, request: &CompletionRequest) -> Result<FragmentStream, AiError>;
}

/// Drain a fragment stream, concatenating text fragments in arrival order.
///
/// Returns only once the stream has ended. The first error aborts the
/// reduction and no partial text is returned.
pub async fn collect_fragments(mut stream: FragmentStream) -> Result<String, AiError> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        if let Some(fragment) = fragment? {
            text.push_str(&fragment);
        }
    }
    Ok(text)
}
