//! Error taxonomy for backend calls.
//!
//! Three failure classes reach callers: the request never produced a response
//! ([`ApiError::Transport`]), the backend answered with an error status
//! ([`ApiError::Status`], carrying any message found in the body), or the
//! body could not be decoded ([`ApiError::Decode`]). Application-level
//! failures embedded in a 200 body (`success: false`) are not errors at this
//! layer; the reply envelopes in [`crate::models`] represent them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response at all: DNS, connection reset, CORS rejection.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with an error status. `message` is whatever the
    /// response body carried in its `error`/`errors` fields, flattened to
    /// user-facing text.
    #[error("{status}: {}", .message.as_deref().unwrap_or("request rejected"))]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Message supplied by the backend, if any. Callers fall back to an
    /// action-specific default when this is `None`.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Best user-facing text for this error.
    pub fn user_message(&self) -> String {
        self.backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }
}
