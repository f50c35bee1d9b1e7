//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for taginput using the `clap` crate. Tag
//! options are global, so they can be given before or after the
//! subcommand, and layer on top of the configuration file.
//!
//! # Commands
//!
//! - **edit**: Interactive tag input in the terminal (default)
//! - **replay**: Feed key names through a headless controller
//! - **suggest**: Show the autocomplete panel for a query
//! - **escape**: Encode text the way tag labels are rendered
//! - **init**: Write the effective configuration to the config file
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use taginput::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["taginput", "--unique", "replay", "a", "Enter", "-q"]);
//! assert!(cli.options.unique);
//! assert!(cli.options.quiet);
//! assert!(matches!(cli.get_command(), Commands::Replay { .. }));
//! ```

use crate::config::TagInputConfig;
use crate::model::WhitespacePolicy;
use ::config::ConfigError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Input id used when neither the file nor the flags name one
pub const DEFAULT_INPUT_ID: &str = "tagsInput";

/// List id used when neither the file nor the flags name one
pub const DEFAULT_LIST_ID: &str = "tagsList";

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "taginput")]
#[command(about = "Turn keystrokes into a list of tags", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub options: TagOptions,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct TagOptions {
    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Id of the input field
    #[arg(long = "input-id", value_name = "ID", global = true)]
    pub input_id: Option<String>,

    /// Id of the tag list
    #[arg(long = "list-id", value_name = "ID", global = true)]
    pub list_id: Option<String>,

    /// Id of the field receiving the serialized tags
    #[arg(long = "output-id", value_name = "ID", global = true)]
    pub output_id: Option<String>,

    /// Reject tags already in the list
    #[arg(short = 'u', long = "unique", global = true)]
    pub unique: bool,

    /// Tag delimiter
    #[arg(short = 'd', long = "delimiter", value_name = "DELIM", global = true)]
    pub delimiter: Option<String>,

    /// Record special keys and chords as tags
    #[arg(short = 'k', long = "special-keys", global = true)]
    pub special_keys: bool,

    /// Initial tag (can specify multiple: -t a -t b)
    #[arg(short = 't', long = "tag", value_name = "TAG", global = true)]
    pub tags: Vec<String>,

    /// Autocomplete candidate (can specify multiple: -s a -s b)
    #[arg(short = 's', long = "suggest", value_name = "ITEM", global = true)]
    pub suggest: Vec<String>,

    /// Remove all whitespace from tag values
    #[arg(long = "strip-whitespace", global = true)]
    pub strip_whitespace: bool,

    /// Commit the input on Space as well as Enter
    #[arg(long = "commit-on-space", global = true)]
    pub commit_on_space: bool,

    /// Minimum input length before suggestions show
    #[arg(long = "min-suggest-len", value_name = "N", global = true)]
    pub min_suggest_len: Option<usize>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Edit tags interactively (default)
    #[command(visible_alias = "e")]
    Edit,

    /// Press and release each named key, then print the tags
    #[command(visible_alias = "r")]
    Replay {
        /// Key names; a single character is typed literally (use `--` before `-`)
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,

        /// Also print the rendered list markup
        #[arg(short = 'm', long = "markup")]
        markup: bool,
    },

    /// Print the suggestions shown for a query
    Suggest {
        /// Text as typed into the input
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Print text with markup-sensitive characters encoded
    Escape {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Save the effective configuration
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Edit if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Edit)
    }

    /// Path of the configuration file in effect
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path was given and the config directory
    /// cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        self.options
            .config
            .clone()
            .map_or_else(TagInputConfig::config_path, Ok)
    }

    /// Load the configuration file and apply the command-line overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_config(&self) -> Result<TagInputConfig, ConfigError> {
        let file_config = TagInputConfig::load_from(&self.config_path()?)?;
        Ok(self.options.apply(file_config))
    }
}

impl TagOptions {
    /// Layer these options over `config`.
    ///
    /// Switches only turn settings on; lists extend the file's lists.
    /// Missing ids fall back to [`DEFAULT_INPUT_ID`] and [`DEFAULT_LIST_ID`].
    #[must_use]
    pub fn apply(&self, mut config: TagInputConfig) -> TagInputConfig {
        if let Some(id) = &self.input_id {
            config.input_id.clone_from(id);
        }
        if let Some(id) = &self.list_id {
            config.list_id.clone_from(id);
        }
        if config.input_id.is_empty() {
            config.input_id = DEFAULT_INPUT_ID.to_string();
        }
        if config.list_id.is_empty() {
            config.list_id = DEFAULT_LIST_ID.to_string();
        }
        if self.output_id.is_some() {
            config.output_id.clone_from(&self.output_id);
        }
        if let Some(delimiter) = &self.delimiter {
            config.delimiter.clone_from(delimiter);
        }
        if let Some(len) = self.min_suggest_len {
            config.min_suggest_len = len;
        }

        config.unique |= self.unique;
        config.special_keys |= self.special_keys;
        config.commit_on_space |= self.commit_on_space;
        if self.strip_whitespace {
            config.whitespace = WhitespacePolicy::Strip;
        }

        config.tags.extend(self.tags.iter().cloned());
        config.autocomplete_list.extend(self.suggest.iter().cloned());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_command_is_edit() {
        let cli = Cli::parse_from(["taginput"]);
        assert_eq!(cli.get_command(), Commands::Edit);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["taginput", "suggest", "ru", "-s", "Rust", "-s", "Ruby"]);
        assert_eq!(cli.options.suggest, vec!["Rust", "Ruby"]);
        assert_eq!(
            cli.get_command(),
            Commands::Suggest {
                query: "ru".into()
            }
        );
    }

    #[test]
    fn test_replay_keys() {
        let cli = Cli::parse_from(["taginput", "replay", "-m", "a", "Enter", "--", "-"]);
        assert_eq!(
            cli.get_command(),
            Commands::Replay {
                keys: vec!["a".into(), "Enter".into(), "-".into()],
                markup: true,
            }
        );
    }

    #[test]
    fn test_apply_fills_default_ids() {
        let config = TagOptions::default().apply(TagInputConfig::default());
        assert_eq!(config.input_id, DEFAULT_INPUT_ID);
        assert_eq!(config.list_id, DEFAULT_LIST_ID);
        assert_eq!(config.delimiter, ",");
        assert!(!config.unique);
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "input_id = \"in\"\nlist_id = \"out\"\ndelimiter = \";\"\ntags = [\"a\"]\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "taginput",
            "--config",
            path.to_str().unwrap(),
            "-d",
            "|",
            "-t",
            "b",
            "--strip-whitespace",
            "--unique",
        ]);
        let config = cli.load_config().unwrap();

        assert_eq!(config.input_id, "in");
        assert_eq!(config.list_id, "out");
        assert_eq!(config.delimiter, "|");
        assert_eq!(config.tags, vec!["a", "b"]);
        assert_eq!(config.whitespace, WhitespacePolicy::Strip);
        assert!(config.unique);
    }
}
