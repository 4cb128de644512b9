//! Error types for DWI metadata handling.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or writing DWI metadata.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key is absent from the dictionary.
    #[error("metadata key not found: {0}")]
    NotFound(String),

    /// A key is present but its value does not have the expected shape.
    #[error("malformed value for '{key}': {reason}")]
    MalformedValue {
        /// Offending key.
        key: String,
        /// What went wrong while parsing.
        reason: String,
    },

    /// A value parses but is not allowed for the field.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The axis kinds match no known interleaving scheme.
    #[error("unknown interleaving for kinds {0:?}")]
    UnclassifiedPattern(Vec<String>),

    /// The operation has no mapping onto the metadata dictionary.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl Error {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
