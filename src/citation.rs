//! Detected citations and their resolved qualifier paths.

use serde::{Deserialize, Serialize};

use crate::tree::Specifier;

/// An ordered (ascending depth) list of node-pattern specifiers
/// describing one candidate target location in a document tree.
pub type QualifierPath = Vec<Specifier>;

/// A prose substring believed to name a location in this or another
/// document.
///
/// Produced by the detector with an empty `qualifiers` list; the
/// resolver fills in zero or more alternative qualifier paths. Multiple
/// alternatives capture genuine ambiguity and are never auto-picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Byte offset of the citation in the source text it was detected in.
    pub start: usize,

    /// The literal matched text.
    pub text: String,

    /// Alternative qualifier paths, filled in by the resolver.
    pub qualifiers: Vec<QualifierPath>,
}

impl Citation {
    /// Create an unresolved citation.
    #[must_use]
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
            qualifiers: Vec::new(),
        }
    }

    /// Whether the resolver found at least one qualifier path.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.qualifiers.is_empty()
    }
}
