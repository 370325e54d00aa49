use std::fmt;

/// Default OpenAI-compatible endpoint of the Groq API.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when `GROQ_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";

/// Upper bound on a single provider call, including stream drain.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the completion provider client.
///
/// Built once at startup and handed to [`crate::groq::GroqProvider`].
#[derive(Clone)]
pub struct ProviderConfig {
    /// Bearer token for the provider. Never logged.
    pub api_key: String,
    /// Base URL without trailing slash, e.g. `https://api.groq.com/openai/v1`.
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Request streamed completions and reduce the fragments locally.
    pub stream: bool,
}

/// Errors raised while building the provider configuration or client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty API key")]
    MissingApiKey(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ProviderConfig {
    pub const API_KEY_ENV: &'static str = "GROQ_API_KEY";
    pub const BASE_URL_ENV: &'static str = "GROQ_BASE_URL";
    pub const MODEL_ENV: &'static str = "GROQ_MODEL";
    pub const TIMEOUT_ENV: &'static str = "AI_TIMEOUT_SECS";
    pub const STREAM_ENV: &'static str = "AI_STREAM";

    /// Config with the given key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            stream: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default                              |
    /// |-------------------|--------------------------------------|
    /// | `GROQ_API_KEY`    | required                             |
    /// | `GROQ_BASE_URL`   | `https://api.groq.com/openai/v1`     |
    /// | `GROQ_MODEL`      | `deepseek-r1-distill-llama-70b`      |
    /// | `AI_TIMEOUT_SECS` | `30`                                 |
    /// | `AI_STREAM`       | `false`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(Self::API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey(Self::API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup(Self::BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(model) = lookup(Self::MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = lookup(Self::TIMEOUT_ENV) {
            config.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    var: Self::TIMEOUT_ENV,
                    value: raw,
                })?;
        }
        if let Some(raw) = lookup(Self::STREAM_ENV) {
            config.stream = parse_bool(&raw).ok_or(ConfigError::Invalid {
                var: Self::STREAM_ENV,
                value: raw,
            })?;
        }

        Ok(config)
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("stream", &self.stream)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
