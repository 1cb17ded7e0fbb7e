//! Error taxonomy shared by every cloud operation.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = CloudError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CloudError {
    /// Network, DNS or TLS failure before a response was read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the email/password pair (401).
    #[error("authentication failed: invalid email or password")]
    AuthenticationFailed,

    /// Any non-success status not classified above. `body` holds the raw
    /// response for post-mortem debugging.
    #[error("unexpected status code {status} from {endpoint}")]
    UnexpectedResponse {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// The bulk command was accepted but the service reported errors.
    /// Entries are passed through verbatim; their meaning is not documented.
    #[error("bulk command reported {} error(s): {}", .0.len(), .0.join("; "))]
    PartialFailure(Vec<String>),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CloudError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
