//! Configuration for a tag input
//!
//! One typed structure with documented defaults, validated once when a
//! controller is built. It can be written by hand, loaded from a TOML
//! file (`~/.config/taginput/config.toml` on Linux), or both, with CLI
//! flags layered on top by the binary.

use crate::controller::{SetupError, TargetRole};
use crate::keys::KeyRules;
use crate::model::{TagRules, WhitespacePolicy};
use crate::render::Targets;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`TAGINPUT_UNIQUE=true`)
const ENV_PREFIX: &str = "TAGINPUT";

fn default_delimiter() -> String {
    ",".to_string()
}

const fn default_min_suggest_len() -> usize {
    crate::autocomplete::DEFAULT_MIN_QUERY_LEN
}

/// Tag input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInputConfig {
    /// Id of the text field keys are read from (required)
    pub input_id: String,

    /// Id of the list tags are rendered into (required)
    pub list_id: String,

    /// Id of a field that receives the serialized tags
    pub output_id: Option<String>,

    /// Reject values already present
    pub unique: bool,

    /// Separator for splitting input and joining output
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Record special keys and chords as tags
    pub special_keys: bool,

    /// Tags added at construction
    pub tags: Vec<String>,

    /// Autocomplete candidates
    pub autocomplete_list: Vec<String>,

    /// Internal whitespace handling
    pub whitespace: WhitespacePolicy,

    /// Minimum trimmed input length (characters) before suggestions show
    #[serde(default = "default_min_suggest_len")]
    pub min_suggest_len: usize,

    /// Commit on Space as well as Enter (ignored with special keys)
    pub commit_on_space: bool,
}

impl Default for TagInputConfig {
    fn default() -> Self {
        Self {
            input_id: String::new(),
            list_id: String::new(),
            output_id: None,
            unique: false,
            delimiter: default_delimiter(),
            special_keys: false,
            tags: Vec::new(),
            autocomplete_list: Vec::new(),
            whitespace: WhitespacePolicy::Preserve,
            min_suggest_len: default_min_suggest_len(),
            commit_on_space: false,
        }
    }
}

impl TagInputConfig {
    /// Configuration bound to the given input and list ids
    #[must_use]
    pub fn new(input_id: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            input_id: input_id.into(),
            list_id: list_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_output_id(mut self, output_id: impl Into<String>) -> Self {
        self.output_id = Some(output_id.into());
        self
    }

    #[must_use]
    pub const fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub const fn with_special_keys(mut self, special_keys: bool) -> Self {
        self.special_keys = special_keys;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_autocomplete<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autocomplete_list = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_whitespace(mut self, whitespace: WhitespacePolicy) -> Self {
        self.whitespace = whitespace;
        self
    }

    #[must_use]
    pub const fn with_min_suggest_len(mut self, len: usize) -> Self {
        self.min_suggest_len = len;
        self
    }

    #[must_use]
    pub const fn with_commit_on_space(mut self, commit_on_space: bool) -> Self {
        self.commit_on_space = commit_on_space;
        self
    }

    /// Check everything that does not need a renderer
    ///
    /// # Errors
    ///
    /// Returns the first [`SetupError`] found.
    pub fn validate(&self) -> Result<(), SetupError> {
        check_id(TargetRole::Input, &self.input_id)?;
        check_id(TargetRole::List, &self.list_id)?;
        if let Some(output_id) = &self.output_id {
            check_id(TargetRole::Output, output_id)?;
        }
        if self.input_id == self.list_id {
            return Err(SetupError::InvalidTarget {
                role: TargetRole::List,
                id: self.list_id.clone(),
                reason: "must differ from the input id".to_string(),
            });
        }
        if self.delimiter.is_empty() {
            return Err(SetupError::EmptyDelimiter);
        }
        if self.min_suggest_len == 0 {
            return Err(SetupError::InvalidSuggestLength);
        }
        Ok(())
    }

    /// Rules for turning input into tags
    #[must_use]
    pub fn tag_rules(&self) -> TagRules {
        TagRules {
            delimiter: self.delimiter.clone(),
            whitespace: self.whitespace,
            unique: self.unique,
        }
    }

    /// Rules for interpreting keys
    #[must_use]
    pub const fn key_rules(&self) -> KeyRules {
        KeyRules {
            special_keys: self.special_keys,
            commit_on_space: self.commit_on_space,
        }
    }

    /// Target ids handed to the renderer
    #[must_use]
    pub fn targets(&self) -> Targets {
        Targets {
            input_id: self.input_id.clone(),
            list_id: self.list_id.clone(),
            output_id: self.output_id.clone(),
        }
    }

    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("taginput").join("config.toml"))
    }

    /// Load from the default config file (defaults if it does not exist)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined
    /// or the file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, with `TAGINPUT_*` environment overrides.
    ///
    /// A missing file yields the defaults (plus overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid TOML for this structure.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Save to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

fn check_id(role: TargetRole, id: &str) -> Result<(), SetupError> {
    if id.is_empty() {
        return Err(SetupError::MissingTarget(role));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(SetupError::InvalidTarget {
            role,
            id: id.to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }
    Ok(())
}
