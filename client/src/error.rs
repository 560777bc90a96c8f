//! Client error handling
//!
//! Every failure of a backend call is mapped onto [`ClientError`]. A 401
//! gets its own variant because the caller has to drop the session.

use thiserror::Error;
use vitaprev_shared::ValidationError;

/// Longest slice of a raw error body kept in a message
const MAX_BODY_SNIPPET: usize = 256;

/// Errors returned by the API client and the services
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired, sign in again")]
    SessionExpired,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a non-success status and its body to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body);
        match status {
            401 => ClientError::Unauthorized(message),
            _ => ClientError::Api { status, message },
        }
    }

    /// Whether the caller must discard its session
    pub fn requires_logout(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_) | ClientError::SessionExpired)
    }
}

/// The body's `message` field when it has one, else a truncated raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(MAX_BODY_SNIPPET).collect())
}

/// Result type alias for client calls
pub type ClientResult<T> = Result<T, ClientError>;
