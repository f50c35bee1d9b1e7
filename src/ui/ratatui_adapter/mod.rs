//! Ratatui-based tag input
//!
//! Drives a [`TagListController`](crate::controller::TagListController)
//! from crossterm key events and draws it with ratatui.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           TagInputApp                       │
//! │  (terminal setup, event loop)               │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌─────────────┐
//! │ Crossterm  │ │ Controller│ │ TuiRenderer │
//! │  (events)  │ │  (tags)   │ │ (snapshot)  │
//! └────────────┘ └───────────┘ └─────────────┘
//! ```
//!
//! Terminals that support the kitty keyboard protocol report key releases
//! and bare modifier presses; elsewhere both are synthesized so chords and
//! release-time commits still work.

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::{AppOutcome, TagInputApp};
pub use events::{AppEvent, EventContext, map_key_event};
pub use state::{Chip, TuiRenderer};
pub use theme::Theme;
