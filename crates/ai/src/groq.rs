//! Groq completion provider.
//!
//! Talks to the OpenAI-compatible `POST {base}/chat/completions` endpoint.
//! Streamed answers arrive as server-sent events:
//! - `data: {"choices":[{"delta":{"content":"..."}}]}` for text fragments
//! - `data: [DONE]` to signal stream end

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{retry, Event, EventSource};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ProviderConfig};
use crate::error::AiError;
use crate::provider::{CompletionProvider, CompletionRequest, FragmentStream};

/// HTTP client for a Groq (or any OpenAI-compatible) completion API.
pub struct GroqProvider {
    config: ProviderConfig,
    client: Client,
}

// ---- wire types ----

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    n: u8,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a provider with its own HTTP client.
    ///
    /// The client enforces `config.timeout_secs` on every call, stream
    /// drain included.
    pub fn new(config: ProviderConfig) -> Result<Self, ConfigError> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(ProviderConfig::API_KEY_ENV));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest, stream: bool) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_completion_tokens: request.max_tokens,
            top_p: request.top_p,
            n: 1,
            stream,
        }
    }

    fn post(&self, request: &CompletionRequest, stream: bool) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&self.body(request, stream))
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let response = self.post(request, false).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::MalformedResponse(format!("invalid completion body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::MalformedResponse("response has no message content".into()))
    }

    async fn stream(&self, request: &CompletionRequest) -> Result<FragmentStream, AiError> {
        let mut event_source = EventSource::new(self.post(request, true))
            .map_err(|e| AiError::Stream(format!("failed to open event stream: {e}")))?;
        event_source.set_retry_policy(Box::new(retry::Never));

        let stream = async_stream::stream! {
            while let Some(event) = event_source.next().await {
                match event {
                    Ok(Event::Open) => continue,
                    Ok(Event::Message(message)) => {
                        if message.data.trim() == "[DONE]" {
                            break;
                        }
                        match serde_json::from_str::<ChatChunk>(&message.data) {
                            Ok(chunk) => {
                                yield Ok(chunk.choices.into_iter().next().and_then(|c| c.delta.content));
                            }
                            Err(e) => {
                                yield Err(AiError::MalformedResponse(format!(
                                    "invalid stream chunk: {e}"
                                )));
                                break;
                            }
                        }
                    }
                    Err(reqwest_eventsource::Error::StreamEnded) => break,
                    Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                        let body = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "<unreadable body>".to_string());
                        yield Err(AiError::Api { status: status.as_u16(), body });
                        break;
                    }
                    Err(reqwest_eventsource::Error::Transport(e)) => {
                        yield Err(AiError::Request(e));
                        break;
                    }
                    Err(e) => {
                        yield Err(AiError::Stream(e.to_string()));
                        break;
                    }
                }
            }

            event_source.close();
        };

        Ok(Box::pin(stream))
    }
}
