//! Taginput - keystrokes in, tags out
//!
//! This library turns a stream of key events into an ordered list of tags.
//! Typed text is committed on Enter (or split on the delimiter), named keys
//! and modifier chords can be recorded as tags themselves, and a suggestion
//! panel offers autocomplete candidates. The controller is headless: it
//! talks to the outside world through a [`render::Renderer`] and an
//! [`sink::OutputSink`], so the same logic drives markup output and the
//! terminal front end.
//!
//! # Example
//!
//! ```
//! use taginput::config::TagInputConfig;
//! use taginput::controller::TagListController;
//! use taginput::keys::Key;
//! use taginput::render::HtmlRenderer;
//! use taginput::sink::OutputSink;
//!
//! let config = TagInputConfig::new("tagsInput", "tagsList").with_unique(true);
//! let mut tags = TagListController::new(config, HtmlRenderer::new(), OutputSink::none())?;
//!
//! tags.type_text("rust");
//! tags.tap(Key::Enter);
//! tags.add_tag("cli,rust");
//!
//! assert_eq!(tags.serialized(), "rust,cli");
//! # Ok::<(), taginput::TagInputError>(())
//! ```

use thiserror::Error;

pub mod autocomplete;
pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod escape;
pub mod keys;
pub mod model;
pub mod render;
pub mod sink;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagInputError {
    /// Rejected configuration or render targets
    #[error("Setup error: {0}")]
    Setup(#[from] controller::SetupError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Malformed JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Terminal front end error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<keys::ParseKeyError> for TagInputError {
    fn from(err: keys::ParseKeyError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
