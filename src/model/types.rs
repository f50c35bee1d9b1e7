//! Core tag types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable synthetic identifier of a tag entry.
///
/// Ids are handed out from a per-collection counter starting at 1 and are
/// never reused, so two entries with the same text stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagId(u64);

impl TagId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    /// Element id used by renderers: `{list_id}_{n}`
    #[must_use]
    pub fn element_id(self, list_id: &str) -> String {
        format!("{list_id}_{}", self.0)
    }

    /// Parse an element id produced by [`TagId::element_id`] for `list_id`.
    ///
    /// Returns `None` when the id belongs to another list or has no number.
    #[must_use]
    pub fn parse_element_id(list_id: &str, element_id: &str) -> Option<Self> {
        let suffix = element_id.strip_prefix(list_id)?.strip_prefix('_')?;
        // Only the exact form `element_id` renders: ids start at 1, no sign or padding
        if suffix.starts_with('0') || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok().map(Self)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored tag: never empty, already trimmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub value: String,
}

/// How whitespace inside a tag is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespacePolicy {
    /// Keep internal whitespace (`"two words"`)
    #[default]
    Preserve,
    /// Remove every whitespace character (`"twowords"`)
    Strip,
}

impl WhitespacePolicy {
    /// Normalize one candidate: trim, then apply the policy.
    ///
    /// Returns `None` when nothing is left.
    #[must_use]
    pub fn normalize(self, candidate: &str) -> Option<String> {
        let value = match self {
            Self::Preserve => candidate.trim().to_string(),
            Self::Strip => candidate.chars().filter(|c| !c.is_whitespace()).collect(),
        };
        (!value.is_empty()).then_some(value)
    }
}
