/// A failed provider call.
///
/// Every variant means the same thing to callers ("the provider call
/// failed") and carries the upstream detail. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status code.
    #[error("provider returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected completion shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The event stream broke before it was complete.
    #[error("stream interrupted: {0}")]
    Stream(String),
}
