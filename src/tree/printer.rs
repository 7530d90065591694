//! Plain-text rendering of a document tree for inspection.

use super::node::NodeId;
use super::DocumentTree;

const CONTENT_PREVIEW_LENGTH: usize = 20;

/// Render the subtree under `start`, one node per line, indented by kind
/// depth. Content is truncated to a short preview.
#[must_use]
pub fn render_tree(tree: &DocumentTree, start: NodeId, indent: usize) -> String {
    let mut lines = Vec::new();
    for id in tree.pre_order(start) {
        let node = &tree[id];

        let number = node
            .number
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let title = node
            .title
            .as_deref()
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();

        let preview: String = node.content.chars().take(CONTENT_PREVIEW_LENGTH).collect();
        let content = if node.content.is_empty() {
            String::new()
        } else if preview.len() < node.content.len() {
            format!(" {preview}...")
        } else {
            format!(" {preview}")
        };

        let pad = " ".repeat(indent * usize::try_from(node.depth().max(0)).unwrap_or(0));
        lines.push(format!("{pad}{} {number}{title}:{content}", node.kind.name()));
    }
    lines.join("\n")
}
