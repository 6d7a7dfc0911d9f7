use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of a remote call, as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RemoteError {
    #[error("sending the verification code failed (status {status})")]
    ChallengeRejected { status: u16 },

    #[error("code validation failed (status {status})")]
    ValidationRejected { status: u16 },

    #[error("registration failed (status {status})")]
    RegistrationRejected { status: u16 },

    #[error("objective list request failed (status {status})")]
    FeedRejected { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Failures of the raw HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<HttpError> for RemoteError {
    fn from(err: HttpError) -> Self {
        RemoteError::Transport(err.to_string())
    }
}
