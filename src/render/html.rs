//! Markup renderer
//!
//! Produces the list and suggestion markup as strings. Every piece of tag
//! text goes through [`encode_entities`] (display) or [`escape_quotes`]
//! (attributes) first.

use super::{Renderer, Targets};
use crate::autocomplete::SuggestionPanel;
use crate::controller::{SetupError, TargetRole};
use crate::escape::{encode_entities, escape_quotes};
use crate::model::Tag;
use std::collections::HashMap;

/// Header line placed above suggestion entries
const SUGGESTION_HEADER: &str = "<p class='tagsAutocompleteListHeader'>Search Result:</p>";

/// Kind of a known element, used to validate targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A text field (`<input>`)
    Input,
    /// A list (`<ul>`)
    List,
    /// Anything else
    Other,
}

/// Renderer that keeps the current markup as strings
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    elements: HashMap<String, ElementKind>,
    list_id: String,
    output_id: Option<String>,
    list_markup: String,
    suggestion_markup: String,
    suggestions_hidden: bool,
    focus_requests: usize,
}

impl HtmlRenderer {
    /// Create a renderer that accepts any target ids
    #[must_use]
    pub fn new() -> Self {
        Self {
            suggestions_hidden: true,
            ..Self::default()
        }
    }

    /// Register a known element; once any are registered, targets must
    /// refer to registered elements of the right kind
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>, kind: ElementKind) -> Self {
        self.elements.insert(id.into(), kind);
        self
    }

    /// Current tag list markup (`<li>` entries)
    #[must_use]
    pub fn list_markup(&self) -> &str {
        &self.list_markup
    }

    /// Current suggestion panel markup (empty while hidden)
    #[must_use]
    pub fn suggestion_markup(&self) -> &str {
        &self.suggestion_markup
    }

    #[must_use]
    pub const fn suggestions_hidden(&self) -> bool {
        self.suggestions_hidden
    }

    /// Number of times focus was requested for the input
    #[must_use]
    pub const fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    /// Output field found at attach time, if any
    #[must_use]
    pub fn output_id(&self) -> Option<&str> {
        self.output_id.as_deref()
    }

    /// Id of the suggestion panel element created next to the input
    #[must_use]
    pub fn suggestion_list_id(&self) -> String {
        format!("{}_autocomplete", self.list_id)
    }

    fn check(&self, role: TargetRole, id: &str, expected: ElementKind) -> Result<(), SetupError> {
        if self.elements.is_empty() {
            return Ok(());
        }
        match self.elements.get(id) {
            None => Err(SetupError::UnknownTarget {
                role,
                id: id.to_string(),
            }),
            Some(kind) if *kind != expected => Err(SetupError::WrongElementKind {
                role,
                id: id.to_string(),
                expected: match expected {
                    ElementKind::Input => "an input field",
                    ElementKind::List => "a list",
                    ElementKind::Other => "an element",
                },
            }),
            Some(_) => Ok(()),
        }
    }

    fn tag_markup(&self, tag: &Tag) -> String {
        let element_id = tag.id.element_id(&self.list_id);
        format!(
            "<li id='{element_id}' data-item='{}'>{} <span data-action='remove' data-target='{element_id}'>X</span></li>",
            escape_quotes(&tag.value),
            encode_entities(&tag.value),
        )
    }
}

impl Renderer for HtmlRenderer {
    fn attach(&mut self, targets: &Targets) -> Result<(), SetupError> {
        self.check(TargetRole::Input, &targets.input_id, ElementKind::Input)?;
        self.check(TargetRole::List, &targets.list_id, ElementKind::List)?;
        self.output_id = match &targets.output_id {
            // The output field is optional: an unknown id means no field
            Some(id) if !self.elements.is_empty() && !self.elements.contains_key(id) => {
                tracing::debug!(output_id = %id, "output element not found, continuing without it");
                None
            }
            Some(id) => {
                self.check(TargetRole::Output, id, ElementKind::Input)?;
                Some(id.clone())
            }
            None => None,
        };
        self.list_id.clone_from(&targets.list_id);
        Ok(())
    }

    fn render_list(&mut self, tags: &[Tag]) {
        self.list_markup = tags.iter().map(|tag| self.tag_markup(tag)).collect();
    }

    fn render_suggestions(&mut self, panel: &SuggestionPanel) {
        match panel {
            SuggestionPanel::Hidden => {
                self.suggestions_hidden = true;
                self.suggestion_markup.clear();
            }
            SuggestionPanel::Visible(items) => {
                self.suggestions_hidden = false;
                let entries: String = items
                    .iter()
                    .map(|item| {
                        format!(
                            "<li data-action='add' data-value='{}'>{}</li>",
                            escape_quotes(item),
                            encode_entities(item),
                        )
                    })
                    .collect();
                self.suggestion_markup = format!("{SUGGESTION_HEADER}{entries}");
            }
        }
    }

    fn focus_input(&mut self) {
        self.focus_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagId;

    fn targets() -> Targets {
        Targets {
            input_id: "tagsInput".into(),
            list_id: "tagsList".into(),
            output_id: None,
        }
    }

    fn tag(id: u64, value: &str) -> Tag {
        Tag {
            id: TagId::from_raw(id),
            value: value.into(),
        }
    }

    #[test]
    fn test_list_markup_escapes_content() {
        let mut renderer = HtmlRenderer::new();
        renderer.attach(&targets()).unwrap();
        renderer.render_list(&[tag(1, "<script>"), tag(2, "it's")]);

        assert_eq!(
            renderer.list_markup(),
            "<li id='tagsList_1' data-item='<script>'>&#60;script&#62; \
             <span data-action='remove' data-target='tagsList_1'>X</span></li>\
             <li id='tagsList_2' data-item='it&#39;s'>it&#39;s \
             <span data-action='remove' data-target='tagsList_2'>X</span></li>"
        );
    }

    #[test]
    fn test_suggestions_visible_and_hidden() {
        let mut renderer = HtmlRenderer::new();
        renderer.attach(&targets()).unwrap();
        assert!(renderer.suggestions_hidden());

        renderer.render_suggestions(&SuggestionPanel::Visible(vec!["Two\"".into()]));
        assert!(!renderer.suggestions_hidden());
        assert_eq!(
            renderer.suggestion_markup(),
            "<p class='tagsAutocompleteListHeader'>Search Result:</p>\
             <li data-action='add' data-value='Two&#34;'>Two&#34;</li>"
        );

        renderer.render_suggestions(&SuggestionPanel::Hidden);
        assert!(renderer.suggestions_hidden());
        assert!(renderer.suggestion_markup().is_empty());
        assert_eq!(renderer.suggestion_list_id(), "tagsList_autocomplete");
    }

    #[test]
    fn test_attach_checks_registered_elements() {
        let mut renderer = HtmlRenderer::new()
            .with_element("tagsInput", ElementKind::Input)
            .with_element("tagsList", ElementKind::Other);
        let err = renderer.attach(&targets()).unwrap_err();
        assert!(matches!(err, SetupError::WrongElementKind { role: TargetRole::List, .. }));

        let mut renderer = HtmlRenderer::new().with_element("tagsInput", ElementKind::Input);
        let err = renderer.attach(&targets()).unwrap_err();
        assert!(matches!(err, SetupError::UnknownTarget { role: TargetRole::List, .. }));

        let mut renderer = HtmlRenderer::new()
            .with_element("tagsInput", ElementKind::Input)
            .with_element("tagsList", ElementKind::List);
        assert!(renderer.attach(&targets()).is_ok());
    }

    #[test]
    fn test_attach_checks_output_kind() {
        let mut renderer = HtmlRenderer::new()
            .with_element("tagsInput", ElementKind::Input)
            .with_element("tagsList", ElementKind::List)
            .with_element("save", ElementKind::List);
        let mut with_output = targets();
        with_output.output_id = Some("save".into());
        let err = renderer.attach(&with_output).unwrap_err();
        assert!(matches!(err, SetupError::WrongElementKind { role: TargetRole::Output, .. }));
    }

    #[test]
    fn test_attach_without_registered_output() {
        let mut renderer = HtmlRenderer::new()
            .with_element("tagsInput", ElementKind::Input)
            .with_element("tagsList", ElementKind::List);
        let mut with_output = targets();
        with_output.output_id = Some("save".into());

        assert!(renderer.attach(&with_output).is_ok());
        assert_eq!(renderer.output_id(), None);

        let mut renderer = renderer.with_element("save", ElementKind::Input);
        assert!(renderer.attach(&with_output).is_ok());
        assert_eq!(renderer.output_id(), Some("save"));
    }
}
