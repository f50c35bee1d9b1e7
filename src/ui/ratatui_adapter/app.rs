//! Interactive tag input session
//!
//! Owns the terminal for the duration of [`TagInputApp::run`] and feeds
//! crossterm events through [`map_key_event`] into a
//! [`TagListController`] backed by a [`TuiRenderer`].

use super::events::{AppEvent, EventContext, map_key_event};
use super::state::TuiRenderer;
use super::theme::Theme;
use super::widgets::{HelpBar, TagInputView};
use crate::command::RemoveTarget;
use crate::config::TagInputConfig;
use crate::controller::TagListController;
use crate::sink::{OutputField, OutputSink};
use crate::ui::Result;
use crate::ui::output::{OutputWriter, StatusBarWriter};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Result of an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOutcome {
    /// Tag values in insertion order
    pub tags: Vec<String>,
    /// Tags joined with the configured delimiter
    pub serialized: String,
    /// Session ended with Ctrl+C
    pub aborted: bool,
}

/// Whether the loop keeps going after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Finish,
    Abort,
}

/// Terminal tag input
pub struct TagInputApp {
    theme: Theme,
    status: StatusBarWriter,
}

impl Default for TagInputApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TagInputApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            status: StatusBarWriter::new(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the session until the user finishes or aborts.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected (before the
    /// terminal is touched) or if terminal I/O fails.
    pub fn run(&self, config: TagInputConfig) -> Result<AppOutcome> {
        let special_keys = config.special_keys;
        let field = config.output_id.as_ref().map(|_| OutputField::new());
        let mut controller = self.build_controller(config, field.clone())?;

        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        let mut terminal = Self::setup_terminal(enhanced)?;

        let flow = self.run_loop(&mut terminal, &mut controller, enhanced, special_keys);

        if let Err(e) = Self::cleanup_terminal(enhanced) {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        let flow = flow?;
        let serialized = field.map_or_else(|| controller.serialized(), |f| f.value());
        Ok(AppOutcome {
            tags: controller.tags(),
            serialized,
            aborted: flow == Flow::Abort,
        })
    }

    fn build_controller(
        &self,
        config: TagInputConfig,
        field: Option<OutputField>,
    ) -> Result<TagListController<TuiRenderer>> {
        let status = self.status.clone();
        let mut sink = OutputSink::none().with_callback(move |serialized| {
            status.info(&format!("Saved: {serialized}"));
        });
        if let Some(field) = field {
            sink = sink.with_field(field);
        }
        Ok(TagListController::new(config, TuiRenderer::new(), sink)?)
    }

    fn setup_terminal(enhanced: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )?;
        }
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    }

    fn cleanup_terminal(enhanced: bool) -> Result<()> {
        let mut stdout = io::stdout();
        if enhanced {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        controller: &mut TagListController<TuiRenderer>,
        enhanced: bool,
        special_keys: bool,
    ) -> Result<Flow> {
        loop {
            controller.process_commands();

            let renderer = controller.renderer();
            let hints = HelpBar::tag_input_hints(special_keys, !renderer.suggestions().is_empty());
            let status = self.status.latest_message();
            terminal.draw(|frame| {
                let view = TagInputView::new(renderer.chips(), controller.buffer(), &self.theme)
                    .suggestions(renderer.suggestions(), renderer.highlight())
                    .hints(&hints)
                    .status(status);
                frame.render_widget(view, frame.area());
            })?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key_event) = event::read()? else {
                continue;
            };

            let ctx = EventContext {
                enhanced,
                special_keys,
                buffer_empty: controller.buffer().is_empty(),
            };
            match handle_app_event(controller, map_key_event(key_event, ctx)) {
                Flow::Continue => {}
                flow => return Ok(flow),
            }
        }
    }
}

fn handle_app_event(controller: &mut TagListController<TuiRenderer>, event: AppEvent) -> Flow {
    match event {
        AppEvent::Finish => return Flow::Finish,
        AppEvent::Abort => return Flow::Abort,
        AppEvent::ClearTags => {
            controller.clear_tags();
        }
        AppEvent::RemoveLast => {
            if let Some(chip) = controller.renderer().chips().last() {
                let target = RemoveTarget::Element(chip.element_id.clone());
                controller.command_sender().remove(target);
                controller.process_commands();
            }
        }
        AppEvent::SuggestionNext => controller.renderer_mut().highlight_next(),
        AppEvent::SuggestionPrev => controller.renderer_mut().highlight_prev(),
        AppEvent::AcceptSuggestion => {
            let index = controller.renderer().highlight();
            controller.select_suggestion(index);
        }
        AppEvent::Keys(inputs) => {
            for input in inputs {
                controller.handle_key(input);
            }
        }
        AppEvent::Ignored => {}
    }
    Flow::Continue
}
