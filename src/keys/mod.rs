//! Key model
//!
//! Keys are named the way keyboard events name them (`Enter`,
//! `ArrowRight`, `Control`, ...), since those names end up inside tags
//! when special-keys mode records them. Terminal events are converted
//! with `TryFrom<crossterm::event::KeyEvent>`.

mod interpreter;

pub use interpreter::{
    CHORD_KEYS, CHORD_SEPARATOR, IGNORED_KEYS, IMMEDIATE_COMMIT_KEYS, KeyAction, KeyRules,
    interpret,
};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single key, named after its keyboard-event key value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing text
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
    CapsLock,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1`..`F24`
    F(u8),
    Shift,
    Control,
    Alt,
    Meta,
}

impl Key {
    /// The keyboard-event name of this key (`"ArrowLeft"`, `"a"`, `" "`)
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::F(n) => format!("F{n}"),
            other => other.static_name().unwrap_or_default().to_string(),
        }
    }

    const fn static_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Enter => "Enter",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Escape => "Escape",
            Self::Tab => "Tab",
            Self::CapsLock => "CapsLock",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Shift => "Shift",
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::Meta => "Meta",
            Self::Char(_) | Self::F(_) => return None,
        })
    }

    /// Name shown when the key itself becomes a tag; arrows become glyphs
    #[must_use]
    pub fn display_symbol(&self) -> String {
        match self {
            Self::ArrowLeft => "←".to_string(),
            Self::ArrowUp => "↑".to_string(),
            Self::ArrowRight => "→".to_string(),
            Self::ArrowDown => "↓".to_string(),
            other => other.name(),
        }
    }

    /// Whether the key produces a character when typed
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Error returned when a key name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key name: {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Parse a key name. Single characters are taken literally; named keys
    /// are matched case-insensitively and accept common short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        let lower = s.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Self::Enter,
            "backspace" | "bspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "escape" | "esc" => Self::Escape,
            "tab" => Self::Tab,
            "capslock" => Self::CapsLock,
            "arrowleft" | "left" => Self::ArrowLeft,
            "arrowright" | "right" => Self::ArrowRight,
            "arrowup" | "up" => Self::ArrowUp,
            "arrowdown" | "down" => Self::ArrowDown,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" | "pgup" => Self::PageUp,
            "pagedown" | "pgdn" => Self::PageDown,
            "shift" => Self::Shift,
            "control" | "ctrl" => Self::Control,
            "alt" => Self::Alt,
            "meta" | "super" => Self::Meta,
            "space" => Self::Char(' '),
            _ => {
                return lower
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=24).contains(n))
                    .map(Self::F)
                    .ok_or_else(|| ParseKeyError(s.to_string()));
            }
        };
        Ok(key)
    }
}

/// When in the key's life cycle an event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    /// Key went down (or auto-repeated)
    Press,
    /// Key came up
    Release,
}

/// A key event delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub phase: KeyPhase,
}

impl KeyInput {
    #[must_use]
    pub const fn press(key: Key) -> Self {
        Self { key, phase: KeyPhase::Press }
    }

    #[must_use]
    pub const fn release(key: Key) -> Self {
        Self { key, phase: KeyPhase::Release }
    }
}

impl TryFrom<KeyEvent> for KeyInput {
    type Error = ParseKeyError;

    fn try_from(event: KeyEvent) -> Result<Self, Self::Error> {
        let key = Key::try_from(event.code)?;
        let phase = match event.kind {
            KeyEventKind::Release => KeyPhase::Release,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Press,
        };
        Ok(Self { key, phase })
    }
}

impl TryFrom<KeyCode> for Key {
    type Error = ParseKeyError;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::ModifierKeyCode;

        Ok(match code {
            KeyCode::Char(c) => Self::Char(c),
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Esc => Self::Escape,
            KeyCode::Tab | KeyCode::BackTab => Self::Tab,
            KeyCode::CapsLock => Self::CapsLock,
            KeyCode::Left => Self::ArrowLeft,
            KeyCode::Right => Self::ArrowRight,
            KeyCode::Up => Self::ArrowUp,
            KeyCode::Down => Self::ArrowDown,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,
            KeyCode::F(n) => Self::F(n),
            KeyCode::Modifier(m) => match m {
                ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Self::Shift,
                ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Self::Control,
                ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Self::Alt,
                ModifierKeyCode::LeftSuper
                | ModifierKeyCode::RightSuper
                | ModifierKeyCode::LeftMeta
                | ModifierKeyCode::RightMeta => Self::Meta,
                other => return Err(ParseKeyError(format!("{other:?}"))),
            },
            other => return Err(ParseKeyError(format!("{other:?}"))),
        })
    }
}

/// Parse a whitespace-separated list of key names (`"a b Enter"`)
///
/// # Errors
///
/// Returns [`ParseKeyError`] for the first name that is not a key.
pub fn parse_key_sequence<'a, I>(names: I) -> Result<Vec<Key>, ParseKeyError>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(str::parse).collect()
}
