//! Session orchestration services.

mod error;
mod session;

pub use error::{SessionError, SessionResult};
pub use session::SessionService;
