//! Loose resolution of qualifier paths against a built tree.

use super::node::NodeId;
use super::pattern::Specifier;
use super::DocumentTree;

/// Find all nodes reachable from `start` that terminate the given
/// pattern.
///
/// Depth-first search: when the current node matches the specifier at
/// the current pattern index, the index is advanced for the recursion
/// into its children; when it matched the *last* specifier the node is
/// returned as a match. Nodes matching no specifier are skipped with the
/// index held, so arbitrary intervening nodes are tolerated before the
/// first specifier and between specifiers - but never after the last
/// one: a match is only ever produced by a node that itself satisfies
/// the final specifier.
///
/// Matches are returned in pre-order (document order). An empty pattern
/// matches nothing. The tree must be fully built; resolution never
/// mutates it.
#[must_use]
pub fn resolve_loose(tree: &DocumentTree, start: NodeId, pattern: &[Specifier]) -> Vec<NodeId> {
    let mut matches = Vec::new();
    if !pattern.is_empty() {
        walk(tree, start, pattern, 0, &mut matches);
    }
    matches
}

fn walk(
    tree: &DocumentTree,
    id: NodeId,
    pattern: &[Specifier],
    index: usize,
    matches: &mut Vec<NodeId>,
) {
    let node = &tree[id];
    if pattern[index].matches(node) {
        if index + 1 == pattern.len() {
            matches.push(id);
            return;
        }
        for &child in &node.children {
            walk(tree, child, pattern, index + 1, matches);
        }
    } else {
        for &child in &node.children {
            walk(tree, child, pattern, index, matches);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    /// Document > Chapter 2 > { Article 5 > Paragraph 1 > Subparagraph 1 >
    /// Points 1..=6, Article 6 > Paragraph 1 }
    fn gdpr_excerpt() -> (DocumentTree, NodeId) {
        let mut tree = DocumentTree::new();
        let doc = tree.alloc(NodeKind::Document);
        tree[doc].title = Some("Test Regulation".to_string());

        let chapter = tree.alloc(NodeKind::Chapter);
        tree[chapter].number = Some(2);
        tree.push_child(doc, chapter);

        for article_number in [5, 6] {
            let article = tree.alloc(NodeKind::Article);
            tree[article].number = Some(article_number);
            tree.push_child(chapter, article);

            let paragraph = tree.alloc(NodeKind::Paragraph);
            tree[paragraph].number = Some(1);
            tree.push_child(article, paragraph);

            if article_number == 5 {
                let subparagraph = tree.alloc(NodeKind::Subparagraph);
                tree[subparagraph].number = Some(1);
                tree.push_child(paragraph, subparagraph);

                for point_number in 1..=6 {
                    let point = tree.alloc(NodeKind::Point);
                    tree[point].number = Some(point_number);
                    tree.push_child(subparagraph, point);
                }
            }
        }
        (tree, doc)
    }

    #[test]
    fn test_wildcard_article_returns_both_in_document_order() {
        let (tree, doc) = gdpr_excerpt();
        let matches = resolve_loose(&tree, doc, &[Specifier::wildcard(NodeKind::Article)]);
        assert_eq!(matches.len(), 2);
        assert_eq!(tree[matches[0]].number, Some(5));
        assert_eq!(tree[matches[1]].number, Some(6));
    }

    #[test]
    fn test_intervening_nodes_are_skipped() {
        let (tree, doc) = gdpr_excerpt();
        // Chapter, Paragraph and Subparagraph sit between the specifiers.
        let pattern = vec![
            Specifier::new(NodeKind::Article, Some(5)),
            Specifier::new(NodeKind::Point, Some(5)),
        ];
        let matches = resolve_loose(&tree, doc, &pattern);
        assert_eq!(matches.len(), 1);
        assert_eq!(tree[matches[0]].kind, NodeKind::Point);
        assert_eq!(tree[matches[0]].number, Some(5));
    }

    #[test]
    fn test_no_match_via_skipped_final_specifier() {
        let (tree, doc) = gdpr_excerpt();
        let pattern = vec![
            Specifier::new(NodeKind::Article, Some(5)),
            Specifier::new(NodeKind::Point, Some(7)),
        ];
        assert!(resolve_loose(&tree, doc, &pattern).is_empty());
    }

    #[test]
    fn test_empty_pattern_matches_nothing() {
        let (tree, doc) = gdpr_excerpt();
        assert!(resolve_loose(&tree, doc, &[]).is_empty());
    }
}
