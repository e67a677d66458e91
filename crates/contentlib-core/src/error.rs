//! Error types for contentlib

use thiserror::Error;

/// Result type alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Main error type for content operations
///
/// Data problems found while registering content (duplicates, mismatched
/// names, closed phases) are not errors; they are logged and reported as a
/// rejection. These variants cover caller bugs and unreadable packages.
#[derive(Error, Debug)]
pub enum ContentError {
    /// A required argument was missing, blank, or degenerate
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Package does not contain exactly one manifest
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// Package archive could not be decoded
    #[error("Archive error: {0}")]
    Archive(String),

    /// A single content descriptor failed to initialize
    #[error("Failed to load {name} ({kind}): {message}")]
    Descriptor {
        name: String,
        kind: String,
        message: String,
    },

    /// Invalid version format
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Serialization(err.to_string())
    }
}

impl From<semver::Error> for ContentError {
    fn from(err: semver::Error) -> Self {
        ContentError::InvalidVersion(err.to_string())
    }
}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        ContentError::Io(err.to_string())
    }
}
