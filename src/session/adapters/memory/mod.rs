//! In-memory authentication adapter.

mod gateway;

pub use gateway::InMemoryAuthGateway;
