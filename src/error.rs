use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for relver operations
#[derive(Error, Debug)]
pub enum RelverError {
    #[error("Version format error: {0}")]
    Format(String),

    #[error("No previous version found: {0}")]
    NoPriorVersion(String),

    #[error("Version increment error: {0}")]
    Increment(String),

    #[error("Target version error: {0}")]
    TargetVersion(String),

    #[error("Version marker missing in `{}`: {}", .path.display(), .reason)]
    MissingMarker { path: PathBuf, reason: String },

    #[error("Ambiguous version marker in `{}`: {}", .path.display(), .reason)]
    AmbiguousMarker { path: PathBuf, reason: String },

    #[error("Sub-process `{command}` failed: {reason}")]
    Process { command: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relver
pub type Result<T> = std::result::Result<T, RelverError>;

impl RelverError {
    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        RelverError::Format(msg.into())
    }

    /// Create a missing-previous-version error with context
    pub fn no_prior_version(msg: impl Into<String>) -> Self {
        RelverError::NoPriorVersion(msg.into())
    }

    /// Create an increment error with context
    pub fn increment(msg: impl Into<String>) -> Self {
        RelverError::Increment(msg.into())
    }

    /// Create a secondary-target version error with context
    pub fn target_version(msg: impl Into<String>) -> Self {
        RelverError::TargetVersion(msg.into())
    }

    /// Create a missing-marker error naming the offending file
    pub fn missing_marker(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RelverError::MissingMarker {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguous-marker error naming the offending file
    pub fn ambiguous_marker(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RelverError::AmbiguousMarker {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a process error for a failed external command
    pub fn process(command: impl Into<String>, reason: impl Into<String>) -> Self {
        RelverError::Process {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelverError::Config(msg.into())
    }
}
