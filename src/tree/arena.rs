//! Flat storage for document trees.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId, NodeKind};

/// A document tree stored as a flat vector of nodes.
///
/// Parent and child links are arena indices, so the parent back-reference
/// does not create an ownership cycle. Nodes are allocated during the
/// single streaming parse pass and never removed, which makes [`NodeId`]
/// a stable identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an unlinked node of the given kind.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            number: None,
            title: None,
            content: String::new(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Children keep document order; the tree never reorders them by
    /// number.
    pub fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the subtree under `start` in pre-order, `start`
    /// included.
    pub fn pre_order(&self, start: NodeId) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![start],
        }
    }

    /// Iterate over the ancestors of `id`, nearest first, `id` excluded.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self[id].parent, move |&p| self[p].parent)
    }

    /// 1-based position of `id` among its parent's children, if linked.
    #[must_use]
    pub fn position_among_siblings(&self, id: NodeId) -> Option<usize> {
        let parent = self[id].parent?;
        self[parent]
            .children
            .iter()
            .position(|&c| c == id)
            .map(|i| i + 1)
    }
}

impl Index<NodeId> for DocumentTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for DocumentTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Pre-order traversal over a [`DocumentTree`].
pub struct PreOrder<'a> {
    tree: &'a DocumentTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree[current].children.iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new();
        let doc = tree.alloc(NodeKind::Document);
        let chapter = tree.alloc(NodeKind::Chapter);
        let art1 = tree.alloc(NodeKind::Article);
        let art2 = tree.alloc(NodeKind::Article);
        let para = tree.alloc(NodeKind::Paragraph);
        tree.push_child(doc, chapter);
        tree.push_child(chapter, art1);
        tree.push_child(chapter, art2);
        tree.push_child(art1, para);
        (tree, doc)
    }

    #[test]
    fn test_pre_order_visits_document_order() {
        let (tree, doc) = sample_tree();
        let kinds: Vec<_> = tree.pre_order(doc).map(|id| tree[id].kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Document,
                NodeKind::Chapter,
                NodeKind::Article,
                NodeKind::Paragraph,
                NodeKind::Article,
            ]
        );
    }

    #[test]
    fn test_depth_increases_along_parent_chain() {
        let (tree, doc) = sample_tree();
        for id in tree.pre_order(doc) {
            let mut depth = tree[id].depth();
            for ancestor in tree.ancestors(id) {
                assert!(tree[ancestor].depth() < depth);
                depth = tree[ancestor].depth();
            }
        }
    }

    #[test]
    fn test_position_among_siblings() {
        let (tree, doc) = sample_tree();
        let chapter = tree[doc].children[0];
        let art2 = tree[chapter].children[1];
        assert_eq!(tree.position_among_siblings(art2), Some(2));
        assert_eq!(tree.position_among_siblings(doc), None);
    }
}
