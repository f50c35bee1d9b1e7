//! UI error types

use crate::controller::SetupError;
use thiserror::Error;

/// Errors that can occur while running the terminal UI
#[derive(Debug, Error)]
pub enum UiError {
    /// The tag input could not be set up
    #[error("Setup failed: {0}")]
    Setup(#[from] SetupError),

    /// IO error during terminal operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
