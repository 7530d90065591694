//! Error types for lexref.
//!
//! Malformed input text never produces a hard error; it is accumulated as
//! diagnostics instead. The error enum is reserved for programmer-contract
//! violations and I/O in the file-loading helpers.

use thiserror::Error;

/// Main error type for the lexref library.
#[derive(Debug, Error)]
pub enum LexrefError {
    /// Citations handed to the resolver were not in document order.
    ///
    /// The demonstrative sub-resolvers ("that", "those", "thereof")
    /// depend on accumulated history, so callers must process citations
    /// in pre-order across nodes and left-to-right within a node.
    #[error(
        "citations must be resolved in document order: \
         offset {found} follows offset {previous}"
    )]
    CitationOrder { previous: usize, found: usize },

    /// IO error while loading a source document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lexref operations.
pub type Result<T> = std::result::Result<T, LexrefError>;
