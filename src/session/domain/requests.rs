//! Authentication and profile requests with their client-side checks.

use super::{SessionDomainError, User};
use crate::remote::BearerToken;
use std::fmt;

fn require(value: &str, field: &'static str) -> Result<(), SessionDomainError> {
    if value.trim().is_empty() {
        return Err(SessionDomainError::MissingField(field));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), SessionDomainError> {
    require(email, "email")?;
    if !email.contains('@') {
        return Err(SessionDomainError::InvalidEmail(email.to_owned()));
    }
    Ok(())
}

/// Token and user returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Issued bearer credential.
    pub token: BearerToken,
    /// The authenticated user.
    pub user: User,
}

/// Email and password for `login`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::MissingField`] for a blank field.
    pub fn validate(&self) -> Result<(), SessionDomainError> {
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Fields for `register`.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Registration {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks that every field is present and the email is plausible.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::MissingField`] for a blank field and
    /// [`SessionDomainError::InvalidEmail`] for an email without `@`.
    pub fn validate(&self) -> Result<(), SessionDomainError> {
        require(&self.username, "username")?;
        require_email(&self.email)?;
        require(&self.password, "password")
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile fields to change; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Checks that at least one field is set and set fields are valid.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyProfileUpdate`] when nothing is set,
    /// and field errors as for [`Registration::validate`].
    pub fn validate(&self) -> Result<(), SessionDomainError> {
        if self.username.is_none() && self.email.is_none() {
            return Err(SessionDomainError::EmptyProfileUpdate);
        }
        if let Some(username) = &self.username {
            require(username, "username")?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        Ok(())
    }
}

/// Current and new password for `change_password`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordChange {
    /// Current password.
    pub current: String,
    /// New password.
    pub new: String,
    /// New password, typed again.
    pub confirmation: String,
}

impl PasswordChange {
    /// Creates a password change request.
    #[must_use]
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        confirmation: impl Into<String>,
    ) -> Self {
        Self {
            current: current.into(),
            new: new.into(),
            confirmation: confirmation.into(),
        }
    }

    /// Checks that the passwords are present and the confirmation matches.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::PasswordMismatch`] when the confirmation
    /// differs and [`SessionDomainError::MissingField`] for a blank field.
    pub fn validate(&self) -> Result<(), SessionDomainError> {
        if self.new != self.confirmation {
            return Err(SessionDomainError::PasswordMismatch);
        }
        require(&self.current, "current password")?;
        require(&self.new, "new password")
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}
