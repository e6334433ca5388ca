//! Validation errors for session requests.

use thiserror::Error;

/// Client-side validation failures raised before any remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address has no `@`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The new password and its confirmation differ.
    #[error("new passwords do not match")]
    PasswordMismatch,

    /// A profile update with no fields set.
    #[error("profile update has no changes")]
    EmptyProfileUpdate,
}
