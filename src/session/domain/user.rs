//! User account types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role; admins see every task and project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Administrator.
    Admin,
    /// Regular team member.
    TeamMember,
    /// Any other role the store defines.
    Other(String),
}

impl Role {
    /// Parses the store's role name.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "team_member" => Self::TeamMember,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the store's role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::TeamMember => "team_member",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Account role.
    pub role: Role,
}
