//! Keystroke interpretation
//!
//! Decides what a single key means for the tag input given the current
//! buffer. The decision is pure; applying it (mutating the buffer,
//! committing tags) is the controller's job.
//!
//! # Special-keys mode
//!
//! With special keys enabled the input records keys themselves:
//!
//! | Situation | Result |
//! |---|---|
//! | `Shift` | ignored, default editing proceeds |
//! | commit key on empty buffer | tag named after the key (`→`, `Tab`, `F5`) |
//! | `Enter` otherwise | commit the buffer |
//! | `Control`/`Alt`/`Meta` over a chord buffer | append to the chord (`Control,Alt`) |
//! | typed key over a chord buffer | append after a separator (`Control,c`) |
//! | anything else | default editing |
//!
//! Without special keys only `Enter` (and optionally `Space`) commits.

use super::Key;

/// Keys that never produce a tag or text on their own
pub const IGNORED_KEYS: &[Key] = &[Key::Shift];

/// Keys that become a tag immediately when pressed on an empty buffer
pub const IMMEDIATE_COMMIT_KEYS: &[Key] = &[
    Key::Backspace,
    Key::Enter,
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::Escape,
    Key::Tab,
    Key::CapsLock,
    Key::F(1),
    Key::F(2),
    Key::F(3),
    Key::F(4),
    Key::F(5),
    Key::F(6),
    Key::F(7),
    Key::F(8),
    Key::F(9),
    Key::F(10),
    Key::F(11),
    Key::F(12),
];

/// Modifier keys that may accumulate into a chord
pub const CHORD_KEYS: &[Key] = &[Key::Control, Key::Meta, Key::Alt];

/// Separator between chord entries in the buffer.
///
/// Independent of the tag delimiter: configure a different delimiter to
/// keep `Control,Alt` a single tag.
pub const CHORD_SEPARATOR: char = ',';

/// What a key means for the tag input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Commit the trimmed buffer as tag(s) and clear it
    CommitLiteralTag,
    /// Commit the key itself as a tag (display form) and clear the buffer
    CommitSpecialTag(String),
    /// Append text to the buffer in place of default editing
    AppendToBuffer(String),
    /// Nothing special, default editing proceeds
    NoOp,
    /// Swallow the key without touching the buffer
    SuppressDefault,
}

impl KeyAction {
    /// Whether default text editing must be skipped for this key
    #[must_use]
    pub const fn suppresses_default(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// Flags that select which rules apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyRules {
    /// Record special keys and chords
    pub special_keys: bool,
    /// Treat Space like Enter (only without special keys)
    pub commit_on_space: bool,
}

/// Interpret one key against the current buffer contents
#[must_use]
pub fn interpret(buffer: &str, key: Key, rules: KeyRules) -> KeyAction {
    if !rules.special_keys {
        return match key {
            Key::Enter => KeyAction::CommitLiteralTag,
            Key::Char(' ') if rules.commit_on_space => KeyAction::CommitLiteralTag,
            _ => KeyAction::NoOp,
        };
    }

    if IGNORED_KEYS.contains(&key) {
        return KeyAction::NoOp;
    }

    if buffer.is_empty() && IMMEDIATE_COMMIT_KEYS.contains(&key) {
        return KeyAction::CommitSpecialTag(key.display_symbol());
    }

    if key == Key::Enter {
        return KeyAction::CommitLiteralTag;
    }

    let name = key.display_symbol();
    let prior: Vec<&str> = buffer
        .split(CHORD_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .collect();
    let all_chord = prior.iter().all(|entry| is_chord_name(entry));

    // Names of one or two characters (letters, F1-F9) count as typed keys
    if name.chars().count() > 2 {
        if !CHORD_KEYS.contains(&key) || !all_chord {
            return KeyAction::NoOp;
        }
        if prior.contains(&name.as_str()) {
            return KeyAction::SuppressDefault;
        }
        return KeyAction::AppendToBuffer(join_chord(buffer, &name));
    }

    if all_chord && !buffer.is_empty() {
        return KeyAction::AppendToBuffer(join_chord(buffer, &name));
    }

    KeyAction::NoOp
}

fn is_chord_name(name: &str) -> bool {
    CHORD_KEYS.iter().any(|key| key.name() == name)
}

fn join_chord(buffer: &str, name: &str) -> String {
    if buffer.is_empty() {
        name.to_string()
    } else {
        format!("{CHORD_SEPARATOR}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECIAL: KeyRules = KeyRules { special_keys: true, commit_on_space: false };
    const PLAIN: KeyRules = KeyRules { special_keys: false, commit_on_space: false };

    #[test]
    fn test_plain_mode_only_enter_commits() {
        assert_eq!(interpret("abc", Key::Enter, PLAIN), KeyAction::CommitLiteralTag);
        assert_eq!(interpret("", Key::Enter, PLAIN), KeyAction::CommitLiteralTag);
        assert_eq!(interpret("", Key::ArrowRight, PLAIN), KeyAction::NoOp);
        assert_eq!(interpret("Control", Key::Char('c'), PLAIN), KeyAction::NoOp);
        assert_eq!(interpret("ab", Key::Char(' '), PLAIN), KeyAction::NoOp);
    }

    #[test]
    fn test_plain_mode_commit_on_space() {
        let rules = KeyRules { special_keys: false, commit_on_space: true };
        assert_eq!(interpret("ab", Key::Char(' '), rules), KeyAction::CommitLiteralTag);
    }

    #[test]
    fn test_shift_is_ignored() {
        assert_eq!(interpret("", Key::Shift, SPECIAL), KeyAction::NoOp);
        assert_eq!(interpret("Control", Key::Shift, SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_immediate_commit_on_empty_buffer() {
        assert_eq!(
            interpret("", Key::ArrowRight, SPECIAL),
            KeyAction::CommitSpecialTag("→".into())
        );
        assert_eq!(interpret("", Key::Tab, SPECIAL), KeyAction::CommitSpecialTag("Tab".into()));
        assert_eq!(interpret("", Key::F(12), SPECIAL), KeyAction::CommitSpecialTag("F12".into()));
        assert_eq!(
            interpret("", Key::Enter, SPECIAL),
            KeyAction::CommitSpecialTag("Enter".into())
        );
    }

    #[test]
    fn test_f13_is_not_an_immediate_commit_key() {
        assert_eq!(interpret("", Key::F(13), SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_commit_keys_edit_normally_with_text() {
        assert_eq!(interpret("ab", Key::Backspace, SPECIAL), KeyAction::NoOp);
        assert_eq!(interpret("ab", Key::ArrowLeft, SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_enter_with_text_commits_buffer() {
        assert_eq!(interpret("hello", Key::Enter, SPECIAL), KeyAction::CommitLiteralTag);
        assert_eq!(interpret("Control", Key::Enter, SPECIAL), KeyAction::CommitLiteralTag);
    }

    #[test]
    fn test_chord_accumulates_without_duplicates() {
        assert_eq!(
            interpret("", Key::Control, SPECIAL),
            KeyAction::AppendToBuffer("Control".into())
        );
        assert_eq!(
            interpret("Control", Key::Alt, SPECIAL),
            KeyAction::AppendToBuffer(",Alt".into())
        );
        assert_eq!(interpret("Control,Alt", Key::Control, SPECIAL), KeyAction::SuppressDefault);
    }

    #[test]
    fn test_modifier_after_text_is_default() {
        assert_eq!(interpret("abc", Key::Control, SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_typed_key_after_chord_gets_separator() {
        let action = interpret("Control,Alt", Key::Char('x'), SPECIAL);
        assert_eq!(action, KeyAction::AppendToBuffer(",x".into()));
        assert!(action.suppresses_default());
    }

    #[test]
    fn test_short_function_key_after_chord() {
        assert_eq!(
            interpret("Meta", Key::F(4), SPECIAL),
            KeyAction::AppendToBuffer(",F4".into())
        );
    }

    #[test]
    fn test_typed_key_on_text_is_default() {
        assert_eq!(interpret("", Key::Char('a'), SPECIAL), KeyAction::NoOp);
        assert_eq!(interpret("ab", Key::Char('c'), SPECIAL), KeyAction::NoOp);
        assert_eq!(interpret("Control,c", Key::Char('d'), SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_non_chord_named_key_over_chord_is_default() {
        assert_eq!(interpret("Control", Key::Home, SPECIAL), KeyAction::NoOp);
    }

    #[test]
    fn test_suppresses_default() {
        assert!(!KeyAction::NoOp.suppresses_default());
        assert!(KeyAction::SuppressDefault.suppresses_default());
        assert!(KeyAction::CommitLiteralTag.suppresses_default());
    }
}
