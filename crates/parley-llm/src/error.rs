use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to a chat-completions server
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Network failure before or while reading the response body
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("upstream returned {status} {status_text}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
    },

    /// Successful status but no readable body to stream from
    #[error("no response body")]
    MissingBody,

    /// Response body is not a chat-completion document
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Request contents are not a string, a turn, or a list of turns
    #[error("unrecognized contents shape: {0}")]
    InvalidContents(String),

    /// Request is malformed outside of its contents
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Adapter configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AdapterError {
    /// Build an upstream error from a status code
    pub fn upstream(status: StatusCode) -> Self {
        Self::Upstream {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        }
    }

    /// Whether retrying the same call later may succeed
    ///
    /// The adapter never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            Self::MissingBody
            | Self::Decode(_)
            | Self::InvalidContents(_)
            | Self::InvalidRequest(_)
            | Self::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
