//! Task board state and operations.
//!
//! Holds the cached task collection and project list, partitions tasks into
//! status buckets, and applies status moves optimistically: the local change
//! is visible immediately and reverted only if the store rejects it and no
//! newer move has superseded it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
