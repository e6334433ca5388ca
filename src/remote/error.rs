//! Error types for calls against the remote task API.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote store operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors returned by remote store and auth gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The request did not complete.
    #[error("request did not complete: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The bearer credential was rejected.
    #[error("credential rejected: {0}")]
    Unauthorized(String),

    /// The target record no longer exists in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// The store refused the request for another reason.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code returned by the store.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

/// Coarse error classification surfaced to callers and user interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The call did not complete or produced an unreadable response.
    NetworkFailure,
    /// The credential was rejected.
    Unauthorized,
    /// The target record vanished.
    NotFound,
    /// A client-side guard rejected the input before any remote call.
    ValidationFailure,
    /// The store rejected the request for another reason.
    Rejected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NetworkFailure => "network failure",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not found",
            Self::ValidationFailure => "validation failure",
            Self::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// Error body shape used by the API (`error`) and its JWT layer (`msg`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    msg: Option<String>,
}

impl RemoteError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Wraps a response decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Classifies a non-success HTTP response.
    ///
    /// The message is taken from the JSON error body when one is present,
    /// falling back to the raw body and then to a generic description.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| match status {
            401 => "authentication required".to_owned(),
            404 => "resource not found".to_owned(),
            _ => format!("unexpected status {status}"),
        });
        match status {
            401 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            _ => Self::Rejected { status, message },
        }
    }

    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Decode(_) => ErrorKind::NetworkFailure,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Rejected { .. } => ErrorKind::Rejected,
        }
    }

    /// Returns `true` when the store rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed.error.or(parsed.msg),
        Err(_) if trimmed.starts_with('{') => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}
