//! Error types for tracklet operations.

use crate::domain::{IssueId, ValidationError};
use crate::id_generation::IdGenerationError;
use std::io;
use thiserror::Error;

/// The error type for tracklet operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A caller-supplied field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Issue not found.
    #[error("Issue not found: {0}")]
    IssueNotFound(IssueId),

    /// A unique issue ID could not be generated.
    #[error(transparent)]
    IdGeneration(#[from] IdGenerationError),
}

impl From<tracklet_kv::Error> for Error {
    fn from(err: tracklet_kv::Error) -> Self {
        Error::Storage(StorageError::Backend(err))
    }
}

/// Broad category of an [`Error`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was rejected; nothing changed.
    Validation,
    /// The referenced issue does not exist; nothing changed.
    NotFound,
    /// Persistence, configuration or other environmental failure.
    Storage,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::IssueNotFound(_) => ErrorKind::NotFound,
            Error::Io(_) | Error::Config(_) | Error::Storage(_) | Error::IdGeneration(_) => {
                ErrorKind::Storage
            }
        }
    }
}

/// Errors raised while reading or writing the persisted collection.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key-value backend failed.
    #[error("Storage backend error: {0}")]
    Backend(#[from] tracklet_kv::Error),

    /// The persisted blob could not be parsed.
    #[error("Stored data under '{key}' is corrupted: {source}")]
    Corrupted {
        /// The slot holding the unreadable blob.
        key: String,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be serialized.
    #[error("Failed to serialize issues: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Configuration and workspace errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.tracklet/` directory was found.
    #[error("Not a tracklet repository (or any parent directory). Run 'tracklet init' first.")]
    NotInitialized,

    /// `init` was run where a `.tracklet/` directory already exists.
    #[error("Tracklet is already initialized in {0}")]
    AlreadyInitialized(String),

    /// The config file could not be parsed or written.
    #[error("Invalid configuration file: {0}")]
    Parse(String),

    /// The issue ID prefix is malformed.
    #[error("Invalid prefix: {0}")]
    InvalidPrefix(String),

    /// A configuration value is out of range or unknown.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The offending config field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// A specialized Result type for tracklet operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_issue() {
        let err = Error::IssueNotFound(IssueId::new("abc"));
        assert_eq!(err.to_string(), "Issue not found: abc");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn validation_errors_are_transparent() {
        let err: Error = ValidationError::TitleRequired.into();
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn corrupted_storage_is_a_storage_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = StorageError::Corrupted {
            key: "issue-tracker-data".to_string(),
            source,
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().starts_with("Stored data under 'issue-tracker-data' is corrupted"));
    }
}
