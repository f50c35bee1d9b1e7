//! Tag list controller
//!
//! Owns the tags, the input buffer and the suggestion panel for one tag
//! input, and routes every change through the same two mutators.
//!
//! ```text
//! key event ──► interpret ──► add_tag / remove_tag ──► render_list ──► sink
//!     │
//!     └─(release)──► refresh suggestions ──► render_suggestions
//! command ──► dispatch ──► add_tag / remove_tag (same path)
//! ```
//!
//! Everything runs synchronously on the caller's thread; events are fully
//! handled one at a time in arrival order.
//!
//! # Examples
//!
//! ```
//! use taginput::config::TagInputConfig;
//! use taginput::controller::TagListController;
//! use taginput::render::HtmlRenderer;
//! use taginput::sink::{OutputField, OutputSink};
//!
//! let field = OutputField::new();
//! let config = TagInputConfig::new("tagsInput", "tagsList").with_tags(["first"]);
//! let mut controller =
//!     TagListController::new(config, HtmlRenderer::new(), OutputSink::none().with_field(field.clone()))
//!         .unwrap();
//!
//! controller.add_tag("a,b");
//! assert_eq!(controller.tags(), vec!["first", "a", "b"]);
//! assert_eq!(field.value(), "first,a,b");
//! ```

mod error;

pub use error::{Result, SetupError, TargetRole};

use crate::autocomplete::{SuggestionFilter, SuggestionPanel};
use crate::command::{ChannelId, Command, CommandChannel, CommandSender, RemoveTarget};
use crate::config::TagInputConfig;
use crate::keys::{Key, KeyAction, KeyInput, KeyPhase, KeyRules, interpret};
use crate::model::{Tag, TagCollection, TagId, TagRules};
use crate::render::{HtmlRenderer, Renderer};
use crate::sink::OutputSink;

/// Controller for one tag input
#[derive(Debug)]
pub struct TagListController<R: Renderer = HtmlRenderer> {
    list_id: String,
    tag_rules: TagRules,
    key_rules: KeyRules,
    tags: TagCollection,
    buffer: String,
    filter: Option<SuggestionFilter>,
    panel: SuggestionPanel,
    renderer: R,
    sink: OutputSink,
    commands: CommandChannel,
    notifications: usize,
}

impl<R: Renderer> TagListController<R> {
    /// Validate `config`, attach `renderer`, then seed the initial tags.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the configuration is invalid or the
    /// renderer rejects the targets. Nothing is seeded or notified then.
    pub fn new(config: TagInputConfig, mut renderer: R, sink: OutputSink) -> Result<Self> {
        config.validate()?;
        renderer.attach(&config.targets())?;

        let filter = (!config.autocomplete_list.is_empty()).then(|| {
            SuggestionFilter::new(config.autocomplete_list.clone())
                .with_min_query_len(config.min_suggest_len)
        });

        let mut controller = Self {
            list_id: config.list_id.clone(),
            tag_rules: config.tag_rules(),
            key_rules: config.key_rules(),
            tags: TagCollection::new(),
            buffer: String::new(),
            filter,
            panel: SuggestionPanel::Hidden,
            renderer,
            sink,
            commands: CommandChannel::new(),
            notifications: 0,
        };

        if controller.filter.is_some() {
            controller.renderer.render_suggestions(&SuggestionPanel::Hidden);
        }
        for tag in &config.tags {
            controller.add_tag(tag);
        }

        tracing::debug!(
            list_id = %controller.list_id,
            channel = %controller.commands.id(),
            special_keys = controller.key_rules.special_keys,
            seeded = controller.tags.len(),
            "tag input ready"
        );
        Ok(controller)
    }

    /// Add delimiter-separated tags from `raw`.
    ///
    /// Empty pieces and (with `unique`) duplicates are skipped. When at least
    /// one tag is added the list is re-rendered and the sink notified once.
    /// Returns the ids of the added tags.
    pub fn add_tag(&mut self, raw: &str) -> Vec<TagId> {
        let added = self.tags.add(raw, &self.tag_rules);
        if added.is_empty() {
            tracing::trace!(raw, "nothing to add");
        } else {
            tracing::debug!(count = added.len(), "tags added");
            self.changed();
        }
        added
    }

    /// Remove one tag. Unknown targets are ignored.
    pub fn remove_tag(&mut self, target: &RemoveTarget) -> Option<Tag> {
        let removed = match target {
            RemoveTarget::Id(id) => self.tags.remove(*id),
            RemoveTarget::Element(element_id) => TagId::parse_element_id(&self.list_id, element_id)
                .and_then(|id| self.tags.remove(id)),
            RemoveTarget::Value(value) => self.tags.remove_value(value),
        };
        match &removed {
            Some(tag) => {
                tracing::debug!(id = %tag.id, value = %tag.value, "tag removed");
                self.changed();
            }
            None => tracing::trace!(?target, "remove target not found"),
        }
        removed
    }

    /// Remove every tag (one notification if any were present)
    pub fn clear_tags(&mut self) -> usize {
        let removed = self.tags.clear();
        if removed > 0 {
            self.changed();
        }
        removed
    }

    /// Current tag values, in order
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.tags.values()
    }

    /// Current entries with their ids
    #[must_use]
    pub fn entries(&self) -> &[Tag] {
        self.tags.entries()
    }

    /// Serialized tags as the sink receives them
    #[must_use]
    pub fn serialized(&self) -> String {
        self.tags.serialize(&self.tag_rules.delimiter)
    }

    /// Number of sink notifications so far
    #[must_use]
    pub const fn notification_count(&self) -> usize {
        self.notifications
    }

    /// Text currently in the input buffer
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer as a paste or native edit would, then refresh
    /// suggestions
    pub fn set_input(&mut self, text: &str) {
        text.clone_into(&mut self.buffer);
        self.refresh_suggestions();
    }

    /// Current suggestion panel
    #[must_use]
    pub const fn suggestions(&self) -> &SuggestionPanel {
        &self.panel
    }

    #[must_use]
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Id of this controller's command channel
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.commands.id()
    }

    /// Handle for sending commands to this controller
    #[must_use]
    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    /// Handle one key event and return what it was interpreted as.
    ///
    /// With special keys, keys are interpreted on press. Without, the
    /// commit decision is made on release. Default editing happens on
    /// press unless the interpretation suppresses it, and suggestions are
    /// refreshed on every release.
    pub fn handle_key(&mut self, input: KeyInput) -> KeyAction {
        let special = self.key_rules.special_keys;
        match input.phase {
            KeyPhase::Press if special => {
                let action = interpret(&self.buffer, input.key, self.key_rules);
                self.apply(&action, input.key);
                action
            }
            KeyPhase::Press => {
                self.default_edit(input.key);
                KeyAction::NoOp
            }
            KeyPhase::Release => {
                let action = if special {
                    KeyAction::NoOp
                } else {
                    let action = interpret(&self.buffer, input.key, self.key_rules);
                    if action.suppresses_default() {
                        self.apply(&action, input.key);
                    }
                    action
                };
                self.refresh_suggestions();
                action
            }
        }
    }

    /// Press and release `key`
    pub fn tap(&mut self, key: Key) {
        self.handle_key(KeyInput::press(key));
        self.handle_key(KeyInput::release(key));
    }

    /// Type every character of `text`
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.tap(Key::Char(c));
        }
    }

    /// Pick the suggestion at `index` in the visible panel.
    ///
    /// Returns `false` when the panel is hidden or the index is out of range.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(value) = self.panel.items().get(index).cloned() else {
            return false;
        };
        self.dispatch(Command::Add(value));
        true
    }

    /// Run an external command through the same mutators as key input
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "dispatching command");
        match command {
            Command::Add(value) => {
                self.add_tag(&value);
                self.buffer.clear();
                self.renderer.focus_input();
            }
            Command::Remove(target) => {
                self.remove_tag(&target);
            }
        }
        self.hide_suggestions();
    }

    /// Dispatch every queued command, returning how many ran
    pub fn process_commands(&mut self) -> usize {
        let pending = self.commands.drain();
        let count = pending.len();
        for command in pending {
            self.dispatch(command);
        }
        count
    }

    fn apply(&mut self, action: &KeyAction, key: Key) {
        match action {
            KeyAction::CommitLiteralTag => {
                let value = std::mem::take(&mut self.buffer);
                self.add_tag(&value);
            }
            KeyAction::CommitSpecialTag(symbol) => {
                self.buffer.clear();
                self.add_tag(symbol);
            }
            KeyAction::AppendToBuffer(text) => self.buffer.push_str(text),
            KeyAction::NoOp => self.default_edit(key),
            KeyAction::SuppressDefault => {}
        }
    }

    /// Plain text-field editing; the caret is always at the end
    fn default_edit(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.buffer.push(c),
            Key::Backspace => {
                self.buffer.pop();
            }
            _ => {}
        }
    }

    fn refresh_suggestions(&mut self) {
        let Some(filter) = &self.filter else {
            return;
        };
        self.panel = filter.panel(&self.buffer);
        tracing::trace!(visible = self.panel.items().len(), "suggestions refreshed");
        self.renderer.render_suggestions(&self.panel);
    }

    fn hide_suggestions(&mut self) {
        if self.filter.is_some() {
            self.panel = SuggestionPanel::Hidden;
            self.renderer.render_suggestions(&self.panel);
        }
    }

    fn changed(&mut self) {
        self.renderer.render_list(self.tags.entries());
        let serialized = self.tags.serialize(&self.tag_rules.delimiter);
        self.sink.notify(&serialized);
        self.notifications += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use crate::testing::{CountingSink, keys};

    fn controller(config: TagInputConfig) -> (TagListController<RecordingRenderer>, CountingSink) {
        let counting = CountingSink::new();
        let controller =
            TagListController::new(config, RecordingRenderer::new(), counting.sink()).unwrap();
        (controller, counting)
    }

    fn base() -> TagInputConfig {
        TagInputConfig::new("tagsInput", "tagsList")
    }

    #[test]
    fn test_add_tag_single_notification() {
        let (mut c, sink) = controller(base());
        c.add_tag("a,b,c");
        assert_eq!(c.tags(), vec!["a", "b", "c"]);
        assert_eq!(sink.values(), vec!["a,b,c"]);
        assert_eq!(c.notification_count(), 1);
        assert_eq!(c.renderer().lists.len(), 1);
    }

    #[test]
    fn test_empty_add_is_noop() {
        let (mut c, sink) = controller(base());
        assert!(c.add_tag("").is_empty());
        assert!(c.add_tag("   ").is_empty());
        assert!(c.add_tag(" , ,").is_empty());
        assert!(c.tags().is_empty());
        assert!(sink.values().is_empty());
        assert!(c.renderer().lists.is_empty());
    }

    #[test]
    fn test_seeded_tags_use_add_path() {
        let (c, sink) = controller(base().with_tags(["first", "second,third"]));
        assert_eq!(c.tags(), vec!["first", "second", "third"]);
        assert_eq!(sink.values(), vec!["first", "first,second,third"]);
    }

    #[test]
    fn test_unique() {
        let (mut c, sink) = controller(base().with_unique(true));
        c.add_tag("a,b");
        assert!(c.add_tag("a").is_empty());
        c.add_tag("b,c");
        assert_eq!(c.tags(), vec!["a", "b", "c"]);
        assert_eq!(sink.values().len(), 2);
    }

    #[test]
    fn test_remove_by_every_target_kind() {
        let (mut c, _sink) = controller(base());
        let ids = c.add_tag("x,y,x,z");

        assert!(c.remove_tag(&RemoveTarget::Id(ids[2])).is_some());
        assert_eq!(c.tags(), vec!["x", "y", "z"]);

        let element = ids[1].element_id("tagsList");
        assert!(c.remove_tag(&RemoveTarget::Element(element)).is_some());
        assert_eq!(c.tags(), vec!["x", "z"]);

        assert!(c.remove_tag(&RemoveTarget::Value("z".into())).is_some());
        assert_eq!(c.tags(), vec!["x"]);
        assert_eq!(c.serialized(), "x");
    }

    #[test]
    fn test_remove_unknown_is_idempotent_noop() {
        let (mut c, sink) = controller(base());
        let ids = c.add_tag("a");
        c.remove_tag(&RemoveTarget::Id(ids[0]));
        let before = c.notification_count();

        assert!(c.remove_tag(&RemoveTarget::Id(ids[0])).is_none());
        assert!(c.remove_tag(&RemoveTarget::Element("otherList_1".into())).is_none());
        assert!(c.remove_tag(&RemoveTarget::Element("garbage".into())).is_none());
        assert!(c.remove_tag(&RemoveTarget::Value("nope".into())).is_none());
        assert_eq!(c.notification_count(), before);
        assert_eq!(sink.values(), vec!["a", ""]);
    }

    #[test]
    fn test_remove_ignores_unrendered_element_ids() {
        let (mut c, _sink) = controller(base());
        c.add_tag("a,b");

        for element_id in ["tagsList_+1", "tagsList_02", "tagsList_0", "tagsList_1 "] {
            assert!(c.remove_tag(&RemoveTarget::Element(element_id.into())).is_none());
        }
        assert_eq!(c.tags(), vec!["a", "b"]);

        assert!(c.remove_tag(&RemoveTarget::Element("tagsList_2".into())).is_some());
        assert_eq!(c.tags(), vec!["a"]);
    }

    #[test]
    fn test_enter_commits_on_release_without_special_keys() {
        let (mut c, sink) = controller(base());
        c.type_text("hello");
        assert_eq!(c.buffer(), "hello");

        assert_eq!(c.handle_key(KeyInput::press(Key::Enter)), KeyAction::NoOp);
        assert!(c.tags().is_empty());
        assert_eq!(c.handle_key(KeyInput::release(Key::Enter)), KeyAction::CommitLiteralTag);
        assert_eq!(c.tags(), vec!["hello"]);
        assert_eq!(c.buffer(), "");
        assert_eq!(sink.values(), vec!["hello"]);
    }

    #[test]
    fn test_enter_on_empty_buffer_adds_nothing() {
        let (mut c, sink) = controller(base());
        c.tap(Key::Enter);
        c.type_text("   ");
        c.tap(Key::Enter);
        assert!(c.tags().is_empty());
        assert!(sink.values().is_empty());
    }

    #[test]
    fn test_backspace_edits_buffer() {
        let (mut c, _sink) = controller(base());
        c.type_text("abc");
        c.tap(Key::Backspace);
        assert_eq!(c.buffer(), "ab");
    }

    #[test]
    fn test_commit_on_space() {
        let (mut c, _sink) = controller(base().with_commit_on_space(true));
        c.type_text("one two ");
        assert_eq!(c.tags(), vec!["one", "two"]);
        assert_eq!(c.buffer(), "");
    }

    #[test]
    fn test_special_arrow_commits_symbol_once() {
        let (mut c, sink) = controller(base().with_special_keys(true));
        let action = c.handle_key(KeyInput::press(Key::ArrowRight));
        assert_eq!(action, KeyAction::CommitSpecialTag("→".into()));
        c.handle_key(KeyInput::release(Key::ArrowRight));

        assert_eq!(c.tags(), vec!["→"]);
        assert_eq!(c.buffer(), "");
        assert_eq!(sink.values(), vec!["→"]);
    }

    #[test]
    fn test_special_chord_with_custom_delimiter() {
        let (mut c, _sink) = controller(base().with_special_keys(true).with_delimiter(";"));
        for key in keys("Control Alt Control Shift x Enter") {
            c.tap(key);
        }
        assert_eq!(c.tags(), vec!["Control,Alt,x"]);
        assert_eq!(c.serialized(), "Control,Alt,x");
    }

    #[test]
    fn test_special_chord_with_comma_delimiter_splits() {
        let (mut c, _sink) = controller(base().with_special_keys(true));
        for key in keys("Control c Enter") {
            c.tap(key);
        }
        assert_eq!(c.tags(), vec!["Control", "c"]);
    }

    #[test]
    fn test_special_chord_is_not_committed_by_typing() {
        let (mut c, sink) = controller(base().with_special_keys(true));
        for key in keys("Meta Alt") {
            c.tap(key);
        }
        assert_eq!(c.buffer(), "Meta,Alt");
        assert!(sink.values().is_empty());
    }

    #[test]
    fn test_special_text_then_enter() {
        let (mut c, _sink) = controller(base().with_special_keys(true));
        c.type_text("ab");
        c.tap(Key::ArrowLeft);
        c.tap(Key::Backspace);
        c.tap(Key::Enter);
        assert_eq!(c.tags(), vec!["a"]);
    }

    #[test]
    fn test_special_enter_on_empty_buffer_records_enter() {
        let (mut c, _sink) = controller(base().with_special_keys(true));
        c.tap(Key::Enter);
        c.tap(Key::Shift);
        c.tap(Key::Tab);
        assert_eq!(c.tags(), vec!["Enter", "Tab"]);
    }

    #[test]
    fn test_suggestions_follow_input() {
        let (mut c, _sink) = controller(base().with_autocomplete(["One", "Two", "AutoSelect3"]));
        assert_eq!(c.renderer().last_panel(), Some(&SuggestionPanel::Hidden));

        c.type_text("o");
        assert_eq!(c.suggestions(), &SuggestionPanel::Hidden);

        c.type_text("n");
        assert_eq!(c.suggestions().items(), ["One"]);

        c.tap(Key::Backspace);
        assert_eq!(c.suggestions(), &SuggestionPanel::Hidden);
    }

    #[test]
    fn test_no_autocomplete_never_renders_panel() {
        let (mut c, _sink) = controller(base());
        c.type_text("one");
        assert!(c.renderer().panels.is_empty());
    }

    #[test]
    fn test_select_suggestion() {
        let (mut c, sink) = controller(base().with_autocomplete(["AutoSelect3", "AutoSelect4"]));
        c.type_text("auto");
        assert!(c.select_suggestion(1));

        assert_eq!(c.tags(), vec!["AutoSelect4"]);
        assert_eq!(c.buffer(), "");
        assert_eq!(c.suggestions(), &SuggestionPanel::Hidden);
        assert_eq!(c.renderer().focus_count, 1);
        assert_eq!(sink.values(), vec!["AutoSelect4"]);

        assert!(!c.select_suggestion(0));
    }

    #[test]
    fn test_commands_use_same_path() {
        let (mut c, sink) = controller(base().with_unique(true));
        let sender = c.command_sender();
        sender.add("a,b");
        sender.add("a");
        assert!(sender.send_json(r#"{"action":"remove","itemId":"tagsList_1"}"#));
        sender.send_json(r#"{"action":"remove"}"#);

        assert_eq!(c.process_commands(), 3);
        assert_eq!(c.tags(), vec!["b"]);
        assert_eq!(sink.values(), vec!["a,b", "b"]);
    }

    #[test]
    fn test_commands_do_not_cross_instances() {
        let (mut first, _s1) = controller(base());
        let (mut second, _s2) = controller(base());
        assert_ne!(first.channel_id(), second.channel_id());

        first.command_sender().add("mine");
        assert_eq!(second.process_commands(), 0);
        assert_eq!(first.process_commands(), 1);
        assert!(second.tags().is_empty());
        assert_eq!(first.tags(), vec!["mine"]);
    }

    #[test]
    fn test_clear_tags() {
        let (mut c, sink) = controller(base());
        assert_eq!(c.clear_tags(), 0);
        c.add_tag("a,b");
        assert_eq!(c.clear_tags(), 2);
        assert_eq!(sink.values(), vec!["a,b", ""]);
    }

    #[test]
    fn test_setup_failure_leaves_nothing_behind() {
        let counting = CountingSink::new();
        let result = TagListController::new(
            base().with_tags(["seed"]),
            RecordingRenderer::failing(),
            counting.sink(),
        );
        assert!(matches!(result, Err(SetupError::UnknownTarget { .. })));
        assert!(counting.values().is_empty());

        let result = TagListController::new(
            TagInputConfig::new("", "list").with_tags(["seed"]),
            RecordingRenderer::new(),
            counting.sink(),
        );
        assert!(matches!(result, Err(SetupError::MissingTarget(TargetRole::Input))));
        assert!(counting.values().is_empty());
    }

    #[test]
    fn test_escaped_render_keeps_raw_value() {
        let config = base();
        let mut c = TagListController::new(config, HtmlRenderer::new(), OutputSink::none()).unwrap();
        c.add_tag("<script>");
        assert_eq!(c.tags(), vec!["<script>"]);
        assert!(c.renderer().list_markup().contains(">&#60;script&#62; <span"));
    }
}
