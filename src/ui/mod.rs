//! User interface layer
//!
//! - [`output`] - status messages for CLI commands and the TUI status line
//! - [`ratatui_adapter`] - interactive terminal tag input
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      TagListController                  │
//! │   (keys, tags, suggestions, commands)   │
//! └────────────────┬────────────────────────┘
//!                  │ Renderer trait
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ HtmlRenderer  │  │ TuiRenderer       │
//! │ (markup)      │  │ (ratatui widget)  │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! # Output Messages
//!
//! ```
//! use taginput::ui::output::{OutputWriter, StatusBarWriter};
//!
//! let writer = StatusBarWriter::new();
//! writer.success("Tag added");
//! assert_eq!(writer.message_count(), 1);
//! ```

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use ratatui_adapter::{AppOutcome, TagInputApp, Theme, TuiRenderer};
