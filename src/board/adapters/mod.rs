//! Adapter implementations for task board ports.

pub mod http;
pub mod memory;
