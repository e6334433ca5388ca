//! Wire payloads for the auth endpoints.

use crate::remote::BearerToken;
use crate::session::domain::{
    AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration, Role, User, UserId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(super) struct UserPayload {
    id: u64,
    username: String,
    email: String,
    role: String,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: UserId::new(payload.id),
            username: payload.username,
            email: payload.email,
            role: Role::from_wire(&payload.role),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GrantPayload {
    access_token: String,
    user: UserPayload,
}

impl From<GrantPayload> for AuthGrant {
    fn from(payload: GrantPayload) -> Self {
        Self {
            token: BearerToken::new(payload.access_token),
            user: User::from(payload.user),
        }
    }
}

#[derive(Serialize)]
pub(super) struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginPayload<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
        }
    }
}

#[derive(Serialize)]
pub(super) struct RegisterPayload<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Registration> for RegisterPayload<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            username: &registration.username,
            email: &registration.email,
            password: &registration.password,
        }
    }
}

#[derive(Serialize)]
pub(super) struct ProfilePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
}

impl<'a> From<&'a ProfileUpdate> for ProfilePayload<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        Self {
            username: update.username.as_deref(),
            email: update.email.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub(super) struct PasswordPayload<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

impl<'a> From<&'a PasswordChange> for PasswordPayload<'a> {
    fn from(change: &'a PasswordChange) -> Self {
        Self {
            current_password: &change.current,
            new_password: &change.new,
        }
    }
}
