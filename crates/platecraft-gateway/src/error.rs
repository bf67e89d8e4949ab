use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures talking to the generative AI backend
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request never produced an HTTP response
    #[error("connection error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response arrived but did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Response was well-formed but carried nothing usable
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Gateway could not be constructed
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
