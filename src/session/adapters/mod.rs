//! Adapter implementations of the authentication port.

pub mod http;
pub mod memory;
