//! Browser automation module
//!
//! Opens and drives remote browser sessions on the grid, one per
//! capability target.

mod errors;
mod session;

pub use errors::BrowserError;
pub use session::{RemoteSession, SessionStatus, POLL_INTERVAL, WAIT_TIMEOUT};
