//! Error types for the tree engine.

use thiserror::Error;

/// Errors surfaced by the tree engine.
///
/// Malformed trees (duplicate ids, cycles) are caller contract violations and
/// are not reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The rendering layer asked for a row past the end of the flat list.
    #[error("node index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of nodes in the current flat list.
        len: usize,
    },

    /// No item with this unique id exists.
    #[error("no item with id '{0}'")]
    UnknownId(String),

    /// The controller was dropped before a pending collapse committed.
    #[error("controller dropped before the pending collapse committed")]
    Abandoned,
}

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
