//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used by the tag input view.

use crate::ui::output::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted suggestion
    pub selection_bg: Color,
    /// Foreground color for the highlighted suggestion
    pub selection_fg: Color,
    /// Color for the input prompt and caret
    pub cursor: Color,
    /// Foreground color of tag chips
    pub tag: Color,
    /// Background color of tag chips
    pub tag_bg: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for info messages
    pub info: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            tag: Color::Black,
            tag_bg: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the highlighted suggestion
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the prompt and caret
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a tag chip
    #[must_use]
    pub fn tag_style(&self) -> Style {
        Style::default().fg(self.tag).bg(self.tag_bg)
    }

    /// Style for the removal mark inside a chip
    #[must_use]
    pub fn tag_remove_style(&self) -> Style {
        self.tag_style().add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for a status message of the given level
    #[must_use]
    pub fn message_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => Style::default().fg(self.success),
            MessageLevel::Error => Style::default().fg(self.error),
            MessageLevel::Info => Style::default().fg(self.info),
            MessageLevel::Normal => Style::default(),
        }
    }
}
