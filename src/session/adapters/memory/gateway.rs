//! In-memory auth gateway for tests and offline demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::remote::{BearerToken, CredentialStore, RemoteError, RemoteResult};
use crate::session::{
    domain::{
        AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration, Role, User,
        UserId,
    },
    ports::AuthGateway,
};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct GatewayState {
    accounts: Vec<Account>,
    sessions: HashMap<String, UserId>,
    next_id: u64,
    issued: u64,
}

impl GatewayState {
    fn issue(&mut self, user: User) -> AuthGrant {
        self.issued += 1;
        let token = format!("token-{}-{}", user.id, self.issued);
        self.sessions.insert(token.clone(), user.id);
        AuthGrant {
            token: BearerToken::new(token),
            user,
        }
    }

    fn account_mut(&mut self, id: UserId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.user.id == id)
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.accounts
            .iter()
            .any(|account| account.user.email == email && Some(account.user.id) != except)
    }

    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.accounts
            .iter()
            .any(|account| account.user.username == username && Some(account.user.id) != except)
    }
}

/// Thread-safe in-memory auth gateway.
///
/// Reads the bearer credential from the shared [`CredentialStore`] the same
/// way the HTTP adapter does, and terminates the session when the credential
/// is unknown.
#[derive(Debug, Clone)]
pub struct InMemoryAuthGateway {
    credentials: Arc<CredentialStore>,
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryAuthGateway {
    /// Creates an empty gateway bound to a credential store.
    #[must_use]
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self {
            credentials,
            state: Arc::new(RwLock::new(GatewayState::default())),
        }
    }

    /// Seeds an account that can log in with the given password.
    #[must_use]
    pub fn with_account(self, username: &str, email: &str, password: &str, role: Role) -> Self {
        {
            let mut state = self.write();
            state.next_id += 1;
            let user = User {
                id: UserId::new(state.next_id),
                username: username.to_owned(),
                email: email.to_owned(),
                role,
            };
            state.accounts.push(Account {
                user,
                password: password.to_owned(),
            });
        }
        self
    }

    /// Revokes every issued token so the next authenticated call fails.
    pub fn revoke_all(&self) {
        self.write().sessions.clear();
    }

    fn write(&self) -> RwLockWriteGuard<'_, GatewayState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn authenticated(&self) -> RemoteResult<UserId> {
        let token = self.credentials.token();
        let user_id = token.and_then(|held| {
            self.state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .sessions
                .get(held.expose())
                .copied()
        });
        user_id.ok_or_else(|| {
            self.credentials.terminate();
            RemoteError::Unauthorized("Token has expired".to_owned())
        })
    }
}

fn rejected(message: &str) -> RemoteError {
    RemoteError::Rejected {
        status: 400,
        message: message.to_owned(),
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> RemoteResult<AuthGrant> {
        let mut state = self.write();
        let user = state
            .accounts
            .iter()
            .find(|account| {
                account.user.email == credentials.email && account.password == credentials.password
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| RemoteError::Unauthorized("Invalid email or password".to_owned()))?;
        Ok(state.issue(user))
    }

    async fn register(&self, registration: &Registration) -> RemoteResult<AuthGrant> {
        let mut state = self.write();
        if state.email_taken(&registration.email, None) {
            return Err(rejected("Email already registered"));
        }
        if state.username_taken(&registration.username, None) {
            return Err(rejected("Username already taken"));
        }
        state.next_id += 1;
        let user = User {
            id: UserId::new(state.next_id),
            username: registration.username.clone(),
            email: registration.email.clone(),
            role: Role::TeamMember,
        };
        state.accounts.push(Account {
            user: user.clone(),
            password: registration.password.clone(),
        });
        Ok(state.issue(user))
    }

    async fn current_user(&self) -> RemoteResult<User> {
        let id = self.authenticated()?;
        self.write()
            .account_mut(id)
            .map(|account| account.user.clone())
            .ok_or_else(|| RemoteError::NotFound("User not found".to_owned()))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> RemoteResult<User> {
        let id = self.authenticated()?;
        let mut state = self.write();
        if let Some(username) = &update.username
            && state.username_taken(username, Some(id))
        {
            return Err(rejected("Username already taken"));
        }
        if let Some(email) = &update.email
            && state.email_taken(email, Some(id))
        {
            return Err(rejected("Email already registered"));
        }
        let account = state
            .account_mut(id)
            .ok_or_else(|| RemoteError::NotFound("User not found".to_owned()))?;
        if let Some(username) = &update.username {
            account.user.username.clone_from(username);
        }
        if let Some(email) = &update.email {
            account.user.email.clone_from(email);
        }
        Ok(account.user.clone())
    }

    async fn change_password(&self, change: &PasswordChange) -> RemoteResult<()> {
        let id = self.authenticated()?;
        let mut state = self.write();
        let account = state
            .account_mut(id)
            .ok_or_else(|| RemoteError::NotFound("User not found".to_owned()))?;
        if account.password != change.current {
            return Err(rejected("Current password is incorrect"));
        }
        account.password.clone_from(&change.new);
        Ok(())
    }
}
