//! In-memory adapters for the task board.

mod store;

pub use store::{InMemoryTaskStore, StoreCall, StoreOperation};
