//! Tag collection
//!
//! The ordered list of tags is the single source of truth for a tag input.
//! Everything else (rendered chips, the serialized output) is derived
//! from it.
//!
//! Removal is keyed by [`TagId`] against this in-memory collection only;
//! the collection is never rebuilt from what a renderer shows.

mod types;

pub use types::{Tag, TagId, WhitespacePolicy};

/// Rules applied when raw input is turned into tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRules {
    /// Separator for splitting input and joining output
    pub delimiter: String,
    /// Internal whitespace handling
    pub whitespace: WhitespacePolicy,
    /// Reject values already present
    pub unique: bool,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            whitespace: WhitespacePolicy::Preserve,
            unique: false,
        }
    }
}

/// Ordered tag storage with synthetic ids
#[derive(Debug, Clone, Default)]
pub struct TagCollection {
    tags: Vec<Tag>,
    last_id: u64,
}

impl TagCollection {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: Vec::new(),
            last_id: 0,
        }
    }

    /// Split `raw` on the delimiter and append every acceptable piece.
    ///
    /// Pieces that are empty after normalization, or duplicates when
    /// `unique` is set, are skipped without affecting their siblings.
    /// Returns the ids of the appended tags in split order.
    pub fn add(&mut self, raw: &str, rules: &TagRules) -> Vec<TagId> {
        let mut added = Vec::new();
        for candidate in raw.split(rules.delimiter.as_str()) {
            let Some(value) = rules.whitespace.normalize(candidate) else {
                continue;
            };
            if rules.unique && self.contains(&value) {
                tracing::trace!(%value, "skipping duplicate tag");
                continue;
            }
            self.last_id += 1;
            let id = TagId::from_raw(self.last_id);
            self.tags.push(Tag { id, value });
            added.push(id);
        }
        added
    }

    /// Remove the entry with `id`; `None` if it is not present
    pub fn remove(&mut self, id: TagId) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.id == id)?;
        Some(self.tags.remove(index))
    }

    /// Remove the first entry whose value equals `value`
    pub fn remove_value(&mut self, value: &str) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.value == value)?;
        Some(self.tags.remove(index))
    }

    /// Remove every entry, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.tags.len();
        self.tags.clear();
        count
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|tag| tag.value == value)
    }

    #[must_use]
    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[Tag] {
        &self.tags
    }

    /// Tag values in insertion order
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.value.clone()).collect()
    }

    /// Join the non-empty values with `delimiter`
    #[must_use]
    pub fn serialize(&self, delimiter: &str) -> String {
        self.tags
            .iter()
            .map(|tag| tag.value.as_str())
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// Inverse of [`TagCollection::serialize`] for values without the delimiter
    #[must_use]
    pub fn split(serialized: &str, delimiter: &str) -> Vec<String> {
        if serialized.is_empty() {
            return Vec::new();
        }
        serialized.split(delimiter).map(String::from).collect()
    }
}
