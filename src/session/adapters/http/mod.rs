//! HTTP authentication adapter.

mod models;
mod gateway;

pub use gateway::HttpAuthGateway;
