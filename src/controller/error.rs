//! Setup error types

use thiserror::Error;

/// Which target a setup error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    Input,
    List,
    Output,
}

impl std::fmt::Display for TargetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::List => "list",
            Self::Output => "output",
        })
    }
}

/// Errors that abort construction of a tag input.
///
/// Nothing is attached when one of these is returned.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required target id was not given
    #[error("Missing {0} target id")]
    MissingTarget(TargetRole),

    /// A target id is syntactically unusable
    #[error("Invalid {role} target id {id:?}: {reason}")]
    InvalidTarget {
        role: TargetRole,
        id: String,
        reason: String,
    },

    /// The target exists but is the wrong kind of element
    #[error("The {role} target {id:?} must be {expected}")]
    WrongElementKind {
        role: TargetRole,
        id: String,
        expected: &'static str,
    },

    /// The target could not be found by the renderer
    #[error("The {role} target {id:?} does not exist")]
    UnknownTarget { role: TargetRole, id: String },

    /// Delimiter must be non-empty
    #[error("Delimiter must not be empty")]
    EmptyDelimiter,

    /// Suggestion threshold must be at least one character
    #[error("Minimum suggestion length must be at least 1")]
    InvalidSuggestLength,
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;
