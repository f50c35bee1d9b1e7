//! Recording renderer for tests

use super::{Renderer, Targets};
use crate::autocomplete::SuggestionPanel;
use crate::controller::SetupError;
use crate::model::Tag;

/// Renderer that records every call instead of drawing anything
///
/// Useful for testing the controller without any UI.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Targets received by `attach`
    pub attached: Option<Targets>,
    /// Every tag list rendered, oldest first
    pub lists: Vec<Vec<String>>,
    /// Every suggestion panel rendered, oldest first
    pub panels: Vec<SuggestionPanel>,
    /// Number of focus requests
    pub focus_count: usize,
    /// Reject `attach` with a missing list target
    pub fail_attach: bool,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer whose `attach` always fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    /// Last rendered tag list
    #[must_use]
    pub fn last_list(&self) -> Option<&[String]> {
        self.lists.last().map(Vec::as_slice)
    }

    /// Last rendered suggestion panel
    #[must_use]
    pub fn last_panel(&self) -> Option<&SuggestionPanel> {
        self.panels.last()
    }
}

impl Renderer for RecordingRenderer {
    fn attach(&mut self, targets: &Targets) -> Result<(), SetupError> {
        if self.fail_attach {
            return Err(SetupError::UnknownTarget {
                role: crate::controller::TargetRole::List,
                id: targets.list_id.clone(),
            });
        }
        self.attached = Some(targets.clone());
        Ok(())
    }

    fn render_list(&mut self, tags: &[Tag]) {
        self.lists.push(tags.iter().map(|tag| tag.value.clone()).collect());
    }

    fn render_suggestions(&mut self, panel: &SuggestionPanel) {
        self.panels.push(panel.clone());
    }

    fn focus_input(&mut self) {
        self.focus_count += 1;
    }
}
