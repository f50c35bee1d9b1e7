//! Ratatui widgets for the tag input TUI

mod help_bar;
mod tag_input;

pub use help_bar::{HelpBar, KeyHint};
pub use tag_input::TagInputView;
