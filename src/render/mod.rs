//! Rendering abstraction
//!
//! The controller never touches a presentation tree. It pushes the tag
//! list and suggestion panel into a [`Renderer`] after each change, which
//! keeps the whole input testable without any UI.
//!
//! # Implementations
//!
//! - [`HtmlRenderer`] - builds escaped list markup strings
//! - [`RecordingRenderer`] - records every call, for tests
//! - `TuiRenderer` (in `ui::ratatui_adapter`) - terminal snapshot

mod html;
mod recording;

pub use html::{ElementKind, HtmlRenderer};
pub use recording::RecordingRenderer;

use crate::autocomplete::SuggestionPanel;
use crate::controller::SetupError;
use crate::model::Tag;

/// Ids of the elements a tag input is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    pub input_id: String,
    pub list_id: String,
    pub output_id: Option<String>,
}

/// Presentation capability used by the controller
pub trait Renderer {
    /// Bind to the targets before anything is rendered.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when a target is missing or of the wrong
    /// kind; construction is abandoned in that case.
    fn attach(&mut self, _targets: &Targets) -> Result<(), SetupError> {
        Ok(())
    }

    /// Replace the rendered tag list with `tags`
    fn render_list(&mut self, tags: &[Tag]);

    /// Show or hide the suggestion panel
    fn render_suggestions(&mut self, panel: &SuggestionPanel);

    /// Move input focus back to the text field
    fn focus_input(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn attach(&mut self, targets: &Targets) -> Result<(), SetupError> {
        (**self).attach(targets)
    }

    fn render_list(&mut self, tags: &[Tag]) {
        (**self).render_list(tags);
    }

    fn render_suggestions(&mut self, panel: &SuggestionPanel) {
        (**self).render_suggestions(panel);
    }

    fn focus_input(&mut self) {
        (**self).focus_input();
    }
}
