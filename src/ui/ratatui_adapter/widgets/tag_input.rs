//! Tag input widget
//!
//! Draws the chips, the input line with its caret, the suggestion panel
//! (only while visible), a key hint line and the latest status message.

use super::help_bar::{HelpBar, KeyHint};
use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::state::Chip;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Most suggestion rows drawn at once
const MAX_SUGGESTION_ROWS: u16 = 8;

/// Tag input view
pub struct TagInputView<'a> {
    chips: &'a [Chip],
    buffer: &'a str,
    suggestions: &'a [String],
    highlight: usize,
    hints: &'a [KeyHint],
    status: Option<(MessageLevel, String)>,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> TagInputView<'a> {
    /// Create a new tag input view
    #[must_use]
    pub const fn new(chips: &'a [Chip], buffer: &'a str, theme: &'a Theme) -> Self {
        Self {
            chips,
            buffer,
            suggestions: &[],
            highlight: 0,
            hints: &[],
            status: None,
            title: " Tags ",
            theme,
        }
    }

    /// Show suggestions with `highlight` marked
    #[must_use]
    pub const fn suggestions(mut self, suggestions: &'a [String], highlight: usize) -> Self {
        self.suggestions = suggestions;
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub const fn hints(mut self, hints: &'a [KeyHint]) -> Self {
        self.hints = hints;
        self
    }

    #[must_use]
    pub fn status(mut self, status: Option<(MessageLevel, String)>) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn chip_line(&self) -> Line<'a> {
        if self.chips.is_empty() {
            return Line::from(Span::styled("(no tags)", self.theme.dimmed_style()));
        }
        let mut spans = Vec::with_capacity(self.chips.len() * 3);
        for chip in self.chips {
            spans.push(Span::styled(format!(" {} ", chip.label), self.theme.tag_style()));
            spans.push(Span::styled("✕ ", self.theme.tag_remove_style()));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn suggestion_items(&self) -> Vec<ListItem<'a>> {
        self.suggestions
            .iter()
            .enumerate()
            .map(|(idx, suggestion)| {
                let selected = idx == self.highlight;
                let (prefix, style) = if selected {
                    ("▶ ", self.theme.selected_style())
                } else {
                    ("  ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(suggestion.clone(), style),
                ]))
            })
            .collect()
    }
}

impl Widget for TagInputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        let suggestion_rows = if self.suggestions.is_empty() {
            0
        } else {
            u16::try_from(self.suggestions.len())
                .unwrap_or(MAX_SUGGESTION_ROWS)
                .min(MAX_SUGGESTION_ROWS)
                + 2
        };

        let [chips_area, input_area, suggestions_area, help_area, status_area] =
            Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(suggestion_rows),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        Paragraph::new(self.chip_line())
            .wrap(Wrap { trim: false })
            .render(chips_area, buf);

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(" Input ");
        let input_line = Line::from(vec![
            Span::styled("> ", self.theme.cursor_style()),
            Span::raw(self.buffer),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(input_line)
            .block(input_block)
            .render(input_area, buf);

        if suggestion_rows > 0 {
            let list = List::new(self.suggestion_items()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style())
                    .title(" Search Result "),
            );
            Widget::render(list, suggestions_area, buf);
        }

        HelpBar::new(self.hints, self.theme).render(help_area, buf);

        if let Some((level, message)) = &self.status {
            Paragraph::new(Span::styled(message.as_str(), self.theme.message_style(*level)))
                .render(status_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagId;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn chip(id: u64, label: &str) -> Chip {
        Chip {
            id: TagId::from_raw(id),
            element_id: format!("tags_{id}"),
            label: label.into(),
        }
    }

    #[test]
    fn test_renders_chips_input_and_suggestions() {
        let theme = Theme::default();
        let chips = vec![chip(1, "rust"), chip(2, "→")];
        let suggestions = vec!["AutoSelect3".to_string()];
        let area = Rect::new(0, 0, 40, 14);
        let mut buf = Buffer::empty(area);

        TagInputView::new(&chips, "aut", &theme)
            .suggestions(&suggestions, 0)
            .status(Some((MessageLevel::Info, "Saved".into())))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("rust"));
        assert!(text.contains("> aut"));
        assert!(text.contains("AutoSelect3"));
        assert!(text.contains("Saved"));
    }

    #[test]
    fn test_empty_view() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);

        TagInputView::new(&[], "", &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("(no tags)"));
        assert!(!text.contains("Search Result"));
    }
}
