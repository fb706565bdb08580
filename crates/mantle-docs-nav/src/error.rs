//! Navigation error types.

use crate::DocumentReference;

/// Error returned while building, validating, or resolving navigation trees.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Malformed section prefix or slug.
    #[error("Invalid input {value:?}: {reason}")]
    InvalidInput {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// Requested version label is absent from a versioned tree.
    #[error("Unknown documentation version: {0}")]
    UnknownVersion(String),

    /// The same document appears twice among a tree's leaves.
    #[error("Duplicate document reference in sidebar: {0}")]
    DuplicateReference(DocumentReference),

    /// Sidebar declaration could not be parsed.
    #[error("Invalid sidebar declaration: {0}")]
    Declaration(String),
}

impl NavError {
    pub(crate) fn invalid(value: &str, reason: &'static str) -> Self {
        Self::InvalidInput {
            value: value.to_owned(),
            reason,
        }
    }
}
