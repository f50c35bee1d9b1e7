//! Autocomplete suggestions
//!
//! Suggestions are a projection of the configured candidate list through
//! the current input text. They are recomputed on every qualifying key
//! and never stored beyond the panel state.

/// Default minimum query length (in characters) for suggestions to show
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// State of the suggestion panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionPanel {
    /// Nothing to show; the panel is hidden
    #[default]
    Hidden,
    /// Matching candidates, in candidate order (never empty)
    Visible(Vec<String>),
}

impl SuggestionPanel {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    /// Suggestions currently shown (empty when hidden)
    #[must_use]
    pub fn items(&self) -> &[String] {
        match self {
            Self::Hidden => &[],
            Self::Visible(items) => items,
        }
    }
}

/// Case-insensitive substring filter over a fixed candidate list
#[derive(Debug, Clone)]
pub struct SuggestionFilter {
    candidates: Vec<String>,
    lowered: Vec<String>,
    min_query_len: usize,
}

impl SuggestionFilter {
    /// Create a filter over `candidates`
    #[must_use]
    pub fn new(candidates: Vec<String>) -> Self {
        let lowered = candidates.iter().map(|c| c.to_lowercase()).collect();
        Self {
            candidates,
            lowered,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }

    /// Require at least `len` characters of trimmed input
    #[must_use]
    pub const fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates containing the trimmed query, ignoring case
    #[must_use]
    pub fn matches(&self, query: &str) -> Vec<String> {
        let needle = query.trim().to_lowercase();
        self.lowered
            .iter()
            .zip(&self.candidates)
            .filter(|(lowered, _)| lowered.contains(&needle))
            .map(|(_, original)| original.clone())
            .collect()
    }

    /// Panel state for the given input text.
    ///
    /// Hidden when the trimmed input is shorter than the minimum or when
    /// nothing matches.
    #[must_use]
    pub fn panel(&self, input: &str) -> SuggestionPanel {
        if input.trim().chars().count() < self.min_query_len {
            return SuggestionPanel::Hidden;
        }
        let found = self.matches(input);
        if found.is_empty() {
            SuggestionPanel::Hidden
        } else {
            SuggestionPanel::Visible(found)
        }
    }
}
