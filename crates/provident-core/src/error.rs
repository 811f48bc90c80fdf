//! Error types for the split pipeline

use std::path::Path;
use thiserror::Error;

/// Split pipeline errors
///
/// Every variant names the offending file; all of them abort the current
/// run. Recovery is manual: restore `packages-all.json` over `packages.json`
/// and discard the shard tree (the `unwind` operation).
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Content-addressed file already exists with different content: {path}")]
    Collision { path: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl SplitError {
    /// Create a not-found error for a path
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a parse error for a path
    pub fn parse(path: &Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create an IO error for a path
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result type for split pipeline operations
pub type Result<T> = std::result::Result<T, SplitError>;
