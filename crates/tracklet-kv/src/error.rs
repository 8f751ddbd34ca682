//! Error types for tracklet-kv operations.

use std::io;
use thiserror::Error;

/// The error type for key-value backend operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing a slot.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The key cannot be used as a slot name.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: &'static str,
    },
}

/// A specialized Result type for tracklet-kv operations.
pub type Result<T> = std::result::Result<T, Error>;
