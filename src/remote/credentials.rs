//! Bearer credential holder shared by every remote adapter.

use std::fmt;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{info, warn};

/// Opaque bearer credential issued by the auth endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw access token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Authentication status published to session observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No credential is held.
    Anonymous,
    /// A credential is held and has not been rejected.
    Authenticated,
    /// The store rejected the credential and it was discarded.
    Terminated,
}

/// Thread-safe holder for the current bearer credential.
///
/// Status changes are broadcast on a watch channel so that user interface
/// code can react to session termination.
#[derive(Debug)]
pub struct CredentialStore {
    token: RwLock<Option<BearerToken>>,
    status: watch::Sender<SessionStatus>,
}

impl CredentialStore {
    /// Creates an anonymous credential store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
            status: watch::Sender::new(SessionStatus::Anonymous),
        }
    }

    /// Creates a credential store that already holds a token.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
            status: watch::Sender::new(SessionStatus::Authenticated),
        }
    }

    /// Returns the current token, if any.
    #[must_use]
    pub fn token(&self) -> Option<BearerToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a freshly issued token.
    pub fn authenticate(&self, token: BearerToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        self.status.send_replace(SessionStatus::Authenticated);
        info!("session authenticated");
    }

    /// Discards the token at the user's request.
    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.status.send_replace(SessionStatus::Anonymous);
        info!("session signed out");
    }

    /// Discards a token the store has rejected.
    ///
    /// Has no effect when no token is held, so a failed login attempt does
    /// not mark an anonymous session as terminated.
    pub fn terminate(&self) {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if had_token {
            self.status.send_replace(SessionStatus::Terminated);
            warn!("credential rejected by the store, session terminated");
        }
    }

    /// Returns the current session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Subscribes to session status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
