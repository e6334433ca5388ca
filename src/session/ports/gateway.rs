//! Authentication gateway port.

use crate::remote::RemoteResult;
use crate::session::domain::{
    AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User,
};
use async_trait::async_trait;

/// Remote account operations.
///
/// Implementations authenticate follow-up calls with whatever credential the
/// shared [`crate::remote::CredentialStore`] holds; they never store the
/// returned token themselves.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token and user.
    async fn login(&self, credentials: &LoginCredentials) -> RemoteResult<AuthGrant>;

    /// Creates an account and returns its token and user.
    async fn register(&self, registration: &Registration) -> RemoteResult<AuthGrant>;

    /// Returns the user the current credential belongs to.
    async fn current_user(&self) -> RemoteResult<User>;

    /// Changes the current user's profile fields.
    async fn update_profile(&self, update: &ProfileUpdate) -> RemoteResult<User>;

    /// Replaces the current user's password.
    async fn change_password(&self, change: &PasswordChange) -> RemoteResult<()>;
}
