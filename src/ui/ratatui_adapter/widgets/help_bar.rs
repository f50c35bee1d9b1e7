//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "^W")
    pub key: String,
    /// Action description (e.g., "remove last")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints on one line
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for the tag input. Special-keys mode records every other
    /// key and chord, so only Ctrl+D and Ctrl+C are advertised there.
    #[must_use]
    pub fn tag_input_hints(special_keys: bool, has_suggestions: bool) -> Vec<KeyHint> {
        if special_keys {
            return vec![KeyHint::new("^D", "done"), KeyHint::new("^C", "abort")];
        }
        let mut hints = vec![
            KeyHint::new("Enter", "add"),
            KeyHint::new("^W", "remove last"),
            KeyHint::new("^U", "clear"),
        ];
        if has_suggestions {
            hints.push(KeyHint::new("^N/^P", "pick"));
            hints.push(KeyHint::new("^Y", "accept"));
        }
        hints.push(KeyHint::new("^D/Esc", "done"));
        hints.push(KeyHint::new("^C", "abort"));
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::styled(hint.action.as_str(), self.theme.dimmed_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
