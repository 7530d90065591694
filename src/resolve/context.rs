//! Explicit resolution history.
//!
//! The demonstrative sub-resolvers need to see earlier resolutions:
//! "that Article" looks at the citing node's own previous citations,
//! "those Articles" at everything resolved so far in the document walk.
//! Both histories live in this context value instead of hidden resolver
//! state, which is what makes the pre-order processing requirement
//! checkable.

use crate::citation::QualifierPath;
use crate::diagnostics::Diagnostics;

/// Mutable state threaded through a resolution pass.
///
/// One group of qualifier paths is recorded per resolved citation. The
/// node history is cleared at every node boundary; the walk history
/// spans the whole pass, including all documents under a synthetic root.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    node_history: Vec<Vec<QualifierPath>>,
    walk_history: Vec<Vec<QualifierPath>>,
    pub(super) last_offset: Option<usize>,
    pub diagnostics: Diagnostics,
}

impl ResolutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the transition to a new citing node: prior citations of the
    /// old node stop being visible to "that" and "thereof", and offsets
    /// restart from zero.
    pub fn start_node(&mut self) {
        self.node_history.clear();
        self.last_offset = None;
    }

    /// Record the resolved qualifier paths of one citation. Empty groups
    /// are recorded too; they keep the group indices aligned with the
    /// citation sequence.
    pub(super) fn record(&mut self, group: Vec<QualifierPath>) {
        self.node_history.push(group.clone());
        self.walk_history.push(group);
    }

    pub(super) fn node_groups(&self) -> &[Vec<QualifierPath>] {
        &self.node_history
    }

    pub(super) fn walk_groups(&self) -> &[Vec<QualifierPath>] {
        &self.walk_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, Specifier};

    #[test]
    fn test_start_node_clears_only_node_history() {
        let mut ctx = ResolutionContext::new();
        ctx.record(vec![vec![Specifier::new(NodeKind::Article, Some(5))]]);
        ctx.last_offset = Some(12);

        ctx.start_node();
        assert!(ctx.node_groups().is_empty());
        assert_eq!(ctx.walk_groups().len(), 1);
        assert_eq!(ctx.last_offset, None);
    }

    #[test]
    fn test_record_keeps_group_order() {
        let mut ctx = ResolutionContext::new();
        ctx.record(vec![vec![Specifier::new(NodeKind::Article, Some(5))]]);
        ctx.record(Vec::new());
        ctx.record(vec![vec![Specifier::new(NodeKind::Article, Some(6))]]);

        assert_eq!(ctx.node_groups().len(), 3);
        assert!(ctx.node_groups()[1].is_empty());
        assert_eq!(
            ctx.walk_groups()[2][0][0],
            Specifier::new(NodeKind::Article, Some(6))
        );
    }
}
