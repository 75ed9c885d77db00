//! Error types for key path parsing and content tree lookups.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyPathError {
    /// The textual key path had no segments at all
    #[error("key path is empty")]
    EmptyPath,

    /// A `.`-separated segment was empty (e.g. `"a..b"`)
    #[error("key path segment {index} is empty")]
    EmptySegment { index: usize },

    /// A child-index address no longer points at a node
    #[error("no content node at address {address:?}")]
    NodeNotFound { address: Vec<usize> },
}

impl KeyPathError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyPath | Self::EmptySegment { .. } => "parse",
            Self::NodeNotFound { .. } => "lookup",
        }
    }
}
