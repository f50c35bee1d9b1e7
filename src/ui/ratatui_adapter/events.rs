//! Event handling for the ratatui TUI
//!
//! Maps terminal key events either to application actions (Ctrl
//! combinations) or to [`KeyInput`]s for the controller. With special keys
//! on, only Ctrl+C and Ctrl+D stay bound; every other chord is recorded.

use crate::keys::{Key, KeyInput, KeyPhase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a terminal key event means for the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit and report the tags
    Finish,
    /// Exit without reporting
    Abort,
    /// Remove every tag
    ClearTags,
    /// Remove the last tag
    RemoveLast,
    /// Highlight the next suggestion
    SuggestionNext,
    /// Highlight the previous suggestion
    SuggestionPrev,
    /// Add the highlighted suggestion
    AcceptSuggestion,
    /// Feed these key inputs to the controller, in order
    Keys(Vec<KeyInput>),
    /// No action taken
    Ignored,
}

/// Facts about the session needed to map keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    /// Terminal reports key releases and modifier presses
    pub enhanced: bool,
    /// Controller records special keys
    pub special_keys: bool,
    /// Input buffer is empty
    pub buffer_empty: bool,
}

/// Map one terminal key event
#[must_use]
pub fn map_key_event(event: KeyEvent, ctx: EventContext) -> AppEvent {
    let press = event.kind != KeyEventKind::Release;

    if press && event.modifiers.contains(KeyModifiers::CONTROL) {
        let bound = match event.code {
            KeyCode::Char('c') => Some(AppEvent::Abort),
            KeyCode::Char('d') => Some(AppEvent::Finish),
            _ if ctx.special_keys => None,
            KeyCode::Char('u') => Some(AppEvent::ClearTags),
            KeyCode::Char('w') => Some(AppEvent::RemoveLast),
            KeyCode::Char('n') => Some(AppEvent::SuggestionNext),
            KeyCode::Char('p') => Some(AppEvent::SuggestionPrev),
            KeyCode::Char('y') => Some(AppEvent::AcceptSuggestion),
            _ => None,
        };
        if let Some(app_event) = bound {
            return app_event;
        }
    }

    if press && !ctx.special_keys && ctx.buffer_empty && event.code == KeyCode::Esc {
        return AppEvent::Finish;
    }

    let Ok(input) = KeyInput::try_from(event) else {
        return AppEvent::Ignored;
    };

    if ctx.enhanced {
        return AppEvent::Keys(vec![input]);
    }

    // Without enhancement the terminal sends presses only, with modifiers
    // folded into the event: replay the modifier presses and the release
    if input.phase == KeyPhase::Release {
        return AppEvent::Ignored;
    }
    let mut inputs = Vec::new();
    if ctx.special_keys {
        for (flag, key) in [
            (KeyModifiers::CONTROL, Key::Control),
            (KeyModifiers::ALT, Key::Alt),
            (KeyModifiers::SUPER | KeyModifiers::META, Key::Meta),
        ] {
            if event.modifiers.intersects(flag) {
                inputs.push(KeyInput::press(key));
                inputs.push(KeyInput::release(key));
            }
        }
    }
    inputs.push(input);
    inputs.push(KeyInput::release(input.key));
    AppEvent::Keys(inputs)
}
