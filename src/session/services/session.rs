//! Login, registration and profile management over an [`AuthGateway`].

use super::{SessionError, SessionResult};
use crate::remote::{CredentialStore, SessionStatus};
use crate::session::{
    domain::{AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User},
    ports::AuthGateway,
};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Owns the current user and the shared bearer credential.
///
/// The credential store is shared with every remote adapter, so a token
/// stored by [`SessionService::login`] authenticates board calls too.
#[derive(Debug)]
pub struct SessionService<G>
where
    G: AuthGateway,
{
    gateway: Arc<G>,
    credentials: Arc<CredentialStore>,
    user: RwLock<Option<User>>,
}

impl<G> SessionService<G>
where
    G: AuthGateway,
{
    /// Creates a session service over a gateway and its credential store.
    #[must_use]
    pub const fn new(gateway: Arc<G>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            user: RwLock::new(None),
        }
    }

    /// Logs in and stores the issued credential.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for blank fields and
    /// [`SessionError::Remote`] when the gateway refuses the credentials.
    pub async fn login(&self, credentials: &LoginCredentials) -> SessionResult<User> {
        credentials.validate()?;
        let grant = self.gateway.login(credentials).await?;
        info!(user_id = %grant.user.id, "logged in");
        Ok(self.accept(grant))
    }

    /// Registers an account and stores the issued credential.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for blank fields or a malformed
    /// email, and [`SessionError::Remote`] when the gateway refuses the
    /// registration.
    pub async fn register(&self, registration: &Registration) -> SessionResult<User> {
        registration.validate()?;
        let grant = self.gateway.register(registration).await?;
        info!(user_id = %grant.user.id, "registered");
        Ok(self.accept(grant))
    }

    /// Re-establishes the session from a held credential.
    ///
    /// Returns `Ok(None)` when no credential is held. When the lookup fails
    /// the credential is discarded; a rejected credential leaves the status
    /// [`SessionStatus::Terminated`], any other failure leaves it
    /// [`SessionStatus::Anonymous`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Remote`] when the current-user lookup fails.
    pub async fn restore(&self) -> SessionResult<Option<User>> {
        if self.credentials.token().is_none() {
            debug!("no credential to restore");
            return Ok(None);
        }
        match self.gateway.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "session restored");
                self.cache(Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "session restore failed, discarding credential");
                if self.credentials.token().is_some() {
                    self.credentials.sign_out();
                }
                self.cache(None);
                Err(SessionError::from(err))
            }
        }
    }

    /// Changes the current user's username or email.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] for an empty or malformed update
    /// and [`SessionError::Remote`] when the gateway refuses it.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> SessionResult<User> {
        update.validate()?;
        let user = self.gateway.update_profile(update).await?;
        self.cache(Some(user.clone()));
        Ok(user)
    }

    /// Replaces the current user's password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] when the new password is blank or
    /// differs from its confirmation, without calling the gateway.
    pub async fn change_password(&self, change: &PasswordChange) -> SessionResult<()> {
        change.validate()?;
        self.gateway.change_password(change).await?;
        info!("password changed");
        Ok(())
    }

    /// Discards the credential and the cached user.
    pub fn logout(&self) {
        self.credentials.sign_out();
        self.cache(None);
    }

    /// Returns the cached user while a credential is held.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.credentials.token()?;
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the current session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.credentials.status()
    }

    /// Subscribes to session status changes, including termination.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.credentials.subscribe()
    }

    fn accept(&self, grant: AuthGrant) -> User {
        self.credentials.authenticate(grant.token);
        self.cache(Some(grant.user.clone()));
        grant.user
    }

    fn cache(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}
