//! Remote API error types.

use thiserror::Error;

/// Errors from a call to the remote API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status. `message` comes from the `{error}` body when present.
    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    }
}
