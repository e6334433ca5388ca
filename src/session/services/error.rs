//! Session service errors.

use crate::remote::{ErrorKind, RemoteError};
use crate::session::domain::SessionDomainError;
use thiserror::Error;

/// Errors returned by session operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A client-side guard rejected the input.
    #[error(transparent)]
    Validation(#[from] SessionDomainError),
    /// The auth gateway call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl SessionError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationFailure,
            Self::Remote(err) => err.kind(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
