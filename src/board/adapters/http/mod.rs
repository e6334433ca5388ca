//! HTTP adapters for the task board, speaking the task API's JSON format.

mod models;
mod store;

pub use models::{format_wire_date, parse_wire_date, parse_wire_datetime};
pub use store::HttpTaskStore;
