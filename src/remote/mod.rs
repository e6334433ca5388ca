//! Shared HTTP plumbing for the task management API.
//!
//! Every adapter that talks to the remote store goes through [`ApiClient`],
//! which attaches the bearer credential held by [`CredentialStore`] and
//! classifies non-success responses into [`RemoteError`]. A `401` from any
//! call terminates the session held by the credential store.

mod client;
mod credentials;
mod error;

pub use client::ApiClient;
pub use credentials::{BearerToken, CredentialStore, SessionStatus};
pub use error::{ErrorKind, RemoteError, RemoteResult};
