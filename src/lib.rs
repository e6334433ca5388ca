//! Taskboard: a client for a remote task-management API.
//!
//! The crate keeps a local, partitioned view of tasks and projects, applies
//! status moves optimistically and reconciles them with the remote store,
//! and manages the user session whose bearer credential authenticates every
//! call.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board and account types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the remote store and auth API
//! - **Adapters**: HTTP and in-memory implementations of the ports
//!
//! # Modules
//!
//! - [`board`]: Task collection, optimistic moves and derived views
//! - [`session`]: Login, registration, profile and session restore
//! - [`remote`]: HTTP client, credential holder and error classification
//! - [`config`]: Environment-driven client configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod remote;
pub mod session;
pub mod telemetry;
