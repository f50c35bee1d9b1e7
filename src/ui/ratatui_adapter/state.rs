//! Terminal renderer state
//!
//! [`TuiRenderer`] is the [`Renderer`] the controller pushes into; the
//! view widget reads the snapshot it keeps on the next frame.

use crate::autocomplete::SuggestionPanel;
use crate::controller::SetupError;
use crate::model::{Tag, TagId};
use crate::render::{Renderer, Targets};

/// A tag chip as shown in the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub id: TagId,
    pub element_id: String,
    pub label: String,
}

/// Renderer keeping the latest tag list and suggestion panel for drawing
#[derive(Debug, Clone, Default)]
pub struct TuiRenderer {
    list_id: String,
    chips: Vec<Chip>,
    suggestions: Vec<String>,
    suggestions_visible: bool,
    highlight: usize,
}

impl TuiRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// Suggestions to draw; empty while the panel is hidden
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        if self.suggestions_visible {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Index of the highlighted suggestion
    #[must_use]
    pub const fn highlight(&self) -> usize {
        self.highlight
    }

    /// Move the highlight down, wrapping around
    pub fn highlight_next(&mut self) {
        let len = self.suggestions().len();
        if len > 0 {
            self.highlight = (self.highlight + 1) % len;
        }
    }

    /// Move the highlight up, wrapping around
    pub fn highlight_prev(&mut self) {
        let len = self.suggestions().len();
        if len > 0 {
            self.highlight = self.highlight.checked_sub(1).unwrap_or(len - 1);
        }
    }
}

impl Renderer for TuiRenderer {
    fn attach(&mut self, targets: &Targets) -> Result<(), SetupError> {
        self.list_id.clone_from(&targets.list_id);
        Ok(())
    }

    fn render_list(&mut self, tags: &[Tag]) {
        self.chips = tags
            .iter()
            .map(|tag| Chip {
                id: tag.id,
                element_id: tag.id.element_id(&self.list_id),
                label: tag.value.clone(),
            })
            .collect();
    }

    fn render_suggestions(&mut self, panel: &SuggestionPanel) {
        match panel {
            SuggestionPanel::Hidden => {
                self.suggestions_visible = false;
                self.suggestions.clear();
            }
            SuggestionPanel::Visible(items) => {
                self.suggestions_visible = true;
                self.suggestions.clone_from(items);
            }
        }
        if self.highlight >= self.suggestions.len() {
            self.highlight = 0;
        }
    }
}
