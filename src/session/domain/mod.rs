//! Domain model for user accounts and authentication requests.

mod error;
mod requests;
mod user;

pub use error::SessionDomainError;
pub use requests::{AuthGrant, LoginCredentials, PasswordChange, ProfileUpdate, Registration};
pub use user::{Role, User, UserId};
