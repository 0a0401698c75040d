//! Error types for document operations.

use thiserror::Error;

/// A document rejected a mutation.
///
/// The stream writer treats every variant as a transient conflict: the render
/// tick is skipped and retried on the next frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The position is past the end of the document or not addressable.
    #[error("invalid position {position} (document length {len})")]
    InvalidPosition {
        /// Requested position.
        position: usize,
        /// Document length at the time of the call.
        len: usize,
    },

    /// The range is inverted, out of bounds or not addressable.
    #[error("range {start}..{end} out of bounds (document length {len})")]
    RangeOutOfBounds {
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Document length at the time of the call.
        len: usize,
    },

    /// The document does not accept edits of this kind right now.
    #[error("document is read-only")]
    ReadOnly,

    /// The document refused the markup.
    #[error("document rejected markup: {0}")]
    Rejected(String),
}
