//! Error types for choice-content

use crate::path::KeyPath;

/// Result type for choice-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in choice-content operations
///
/// A missing key on read is not an error: `ConfigDocument::read` returns
/// `Ok(None)` for it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: KeyPath, reason: String },

    #[error("Malformed selection chain at {group}: {reason}")]
    MalformedSelectionChain { group: KeyPath, reason: String },

    #[error("Unknown option '{option}' in group {group}")]
    UnknownOption { group: KeyPath, option: String },

    #[error(transparent)]
    Store(#[from] choice_store::Error),
}

impl Error {
    pub fn invalid_path(path: impl Into<KeyPath>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(group: impl Into<KeyPath>, reason: impl Into<String>) -> Self {
        Self::MalformedSelectionChain {
            group: group.into(),
            reason: reason.into(),
        }
    }
}
