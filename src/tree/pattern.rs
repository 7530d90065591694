//! Node-pattern specifiers.

use serde::{Deserialize, Serialize};

use super::node::{Node, NodeId, NodeKind, WILDCARD};
use super::DocumentTree;

/// One element of a qualifier path: a kind, a number (or wildcard) and an
/// optional title to match against a tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifier {
    pub kind: NodeKind,
    pub number: Option<i32>,
    pub title: Option<String>,
}

impl Specifier {
    #[must_use]
    pub fn new(kind: NodeKind, number: Option<i32>) -> Self {
        Self {
            kind,
            number,
            title: None,
        }
    }

    /// A specifier matching any node of the given kind.
    #[must_use]
    pub fn wildcard(kind: NodeKind) -> Self {
        Self::new(kind, Some(WILDCARD))
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Snapshot specifier for an existing tree node.
    #[must_use]
    pub fn from_node(tree: &DocumentTree, id: NodeId) -> Self {
        let node = &tree[id];
        Self {
            kind: node.kind,
            number: node.number,
            title: node.title.clone(),
        }
    }

    /// Depth of the kind this specifier addresses.
    #[must_use]
    pub fn depth(&self) -> i32 {
        self.kind.depth()
    }

    /// Whether this specifier matches a tree node.
    ///
    /// Kind must be equal and the number must be equal or the wildcard.
    /// Titles are only compared for documents, and leniently: citations
    /// rarely reproduce the official title verbatim, so a case-insensitive
    /// substring match in either direction is accepted.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        if self.kind != node.kind {
            return false;
        }
        if self.number != node.number && self.number != Some(WILDCARD) {
            return false;
        }
        if self.kind == NodeKind::Document {
            return self.title_matches(node);
        }
        true
    }

    fn title_matches(&self, node: &Node) -> bool {
        let Some(wanted) = self.title.as_deref() else {
            return true;
        };
        let Some(actual) = node.title.as_deref() else {
            return false;
        };
        let wanted = wanted.to_lowercase();
        let actual = actual.to_lowercase();
        wanted == actual || actual.contains(&wanted) || wanted.contains(&actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_node(title: &str) -> Node {
        Node {
            id: NodeId(0),
            kind: NodeKind::Document,
            number: None,
            title: Some(title.to_string()),
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn article_node(number: i32) -> Node {
        Node {
            id: NodeId(1),
            kind: NodeKind::Article,
            number: Some(number),
            title: None,
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_number_match_and_wildcard() {
        let node = article_node(5);
        assert!(Specifier::new(NodeKind::Article, Some(5)).matches(&node));
        assert!(Specifier::wildcard(NodeKind::Article).matches(&node));
        assert!(!Specifier::new(NodeKind::Article, Some(6)).matches(&node));
        assert!(!Specifier::new(NodeKind::Paragraph, Some(5)).matches(&node));
    }

    #[test]
    fn test_none_number_only_matches_none() {
        let node = article_node(5);
        assert!(!Specifier::new(NodeKind::Article, None).matches(&node));
    }

    #[test]
    fn test_document_title_lenient_match() {
        let node = doc_node("Regulation (EU) 2016/679 (General Data Protection Regulation)");
        let spec = Specifier::new(NodeKind::Document, None)
            .with_title("regulation (eu) 2016/679");
        assert!(spec.matches(&node));

        // Substring in the other direction is also accepted.
        let node = doc_node("GDPR");
        let spec = Specifier::new(NodeKind::Document, None).with_title("the GDPR rules");
        assert!(spec.matches(&node));

        let spec = Specifier::new(NodeKind::Document, None).with_title("Directive 95/46/EC");
        assert!(!spec.matches(&node));
    }

    #[test]
    fn test_document_without_requested_title_matches() {
        let node = doc_node("GDPR");
        assert!(Specifier::new(NodeKind::Document, None).matches(&node));
    }
}
