//! [`AuthGateway`] implementation backed by the auth API.

use super::models::{
    GrantPayload, LoginPayload, PasswordPayload, ProfilePayload, RegisterPayload, UserPayload,
};
use crate::remote::{ApiClient, RemoteResult};
use crate::session::{
    domain::{AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User},
    ports::AuthGateway,
};
use async_trait::async_trait;
use serde::de::IgnoredAny;

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const ME_PATH: &str = "/api/auth/me";
const PROFILE_PATH: &str = "/api/auth/profile";
const PASSWORD_PATH: &str = "/api/auth/change-password";

/// Remote auth gateway speaking the auth API's JSON format.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    /// Wraps a configured API client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> RemoteResult<AuthGrant> {
        let payload: GrantPayload = self
            .client
            .post_json(LOGIN_PATH, &LoginPayload::from(credentials))
            .await?;
        Ok(AuthGrant::from(payload))
    }

    async fn register(&self, registration: &Registration) -> RemoteResult<AuthGrant> {
        let payload: GrantPayload = self
            .client
            .post_json(REGISTER_PATH, &RegisterPayload::from(registration))
            .await?;
        Ok(AuthGrant::from(payload))
    }

    async fn current_user(&self) -> RemoteResult<User> {
        let payload: UserPayload = self.client.get_json(ME_PATH).await?;
        Ok(User::from(payload))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> RemoteResult<User> {
        let payload: UserPayload = self
            .client
            .put_json(PROFILE_PATH, &ProfilePayload::from(update))
            .await?;
        Ok(User::from(payload))
    }

    async fn change_password(&self, change: &PasswordChange) -> RemoteResult<()> {
        let _: IgnoredAny = self
            .client
            .put_json(PASSWORD_PATH, &PasswordPayload::from(change))
            .await?;
        Ok(())
    }
}
