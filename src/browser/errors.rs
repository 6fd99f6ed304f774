//! Browser error types

use thiserror::Error;

/// Errors raised while driving a remote browser session.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Failed to open remote session: {0}")]
    SessionOpenFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Timed out waiting for `{0}`")]
    ElementWaitTimeout(String),

    #[error("Failed to read element: {0}")]
    ElementReadFailed(String),

    #[error("Script execution failed: {0}")]
    ScriptFailed(String),

    #[error("Failed to close session: {0}")]
    QuitFailed(String),
}

impl From<BrowserError> for String {
    fn from(err: BrowserError) -> String {
        err.to_string()
    }
}
