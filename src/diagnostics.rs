//! Non-fatal issue reporting.
//!
//! Parsing and resolution never fail on malformed input text. Soft issues
//! (an unresolvable citation fragment, a demonstrative with no prior
//! reference in scope) are recorded in a [`Diagnostics`] sink and mirrored
//! to `tracing` so they stay out of the control flow.

use serde::{Deserialize, Serialize};

/// Classification of a soft failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A citation fragment matched no sub-resolver and was dropped.
    UnresolvedFragment,

    /// A demonstrative form ("that", "those", "thereof") was used with no
    /// qualifying prior citation in scope.
    MissingHistory,

    /// A positionally numbered node could not locate itself among its
    /// parent's children during finalization.
    OrphanNode,

    /// A citation already carried qualifier paths and was re-resolved.
    QualifierOverwritten,
}

/// A single recorded issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Accumulating sink for diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue and mirror it to the log.
    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = ?kind, "{message}");
        self.entries.push(Diagnostic { kind, message });
    }

    /// Iterate over recorded issues in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move all entries out of another sink into this one.
    pub fn absorb(&mut self, other: &mut Diagnostics) {
        self.entries.append(&mut other.entries);
    }
}
