//! Document tree parser.
//!
//! Turns the plain text of a regulation into a [`DocumentTree`] in a
//! single streaming pass: blocks are classified against a
//! priority-ordered kind table and attached via an explicit stack of
//! open nodes.

mod kinds;
mod preprocess;

use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::tree::{DocumentTree, NodeId, NodeKind};

pub use kinds::{accept_block, default_kind_table, finalize, KindSpec, Seed};
pub use preprocess::{
    BlockPreprocessor, FootnoteAppend, FootnoteDelete, HeaderFilter, InitialSpaceNormalizer,
};

/// A parsed document: the tree, its root and any soft issues found
/// while building it.
#[derive(Debug)]
pub struct ParsedDocument {
    pub tree: DocumentTree,
    pub root: NodeId,
    pub diagnostics: Diagnostics,
}

/// Parser for EU-style regulations in text form.
pub struct DocumentTreeParser {
    kind_table: Vec<KindSpec>,
    preprocessors: Vec<Box<dyn BlockPreprocessor>>,
}

impl Default for DocumentTreeParser {
    fn default() -> Self {
        Self::new(
            default_kind_table(),
            vec![
                Box::new(HeaderFilter),
                Box::new(InitialSpaceNormalizer),
                Box::new(FootnoteAppend),
            ],
        )
    }
}

impl DocumentTreeParser {
    /// Create a parser with an explicit kind table and preprocessor
    /// chain. The kind table order matters whenever a non-consuming kind
    /// is present; the preprocessor order is always significant.
    #[must_use]
    pub fn new(
        kind_table: Vec<KindSpec>,
        preprocessors: Vec<Box<dyn BlockPreprocessor>>,
    ) -> Self {
        Self {
            kind_table,
            preprocessors,
        }
    }

    /// Parse the source text of a regulation into a document tree.
    ///
    /// Malformed input never fails: blocks that open no node accumulate
    /// as content of the innermost open node.
    #[must_use]
    pub fn parse_document(&self, title: &str, text: &str) -> ParsedDocument {
        let mut tree = DocumentTree::new();
        let mut diagnostics = Diagnostics::new();

        let root = tree.alloc(NodeKind::Document);
        tree[root].title = Some(title.to_string());
        let mut stack: Vec<NodeId> = vec![root];

        let mut blocks = blockize(text);
        for preprocessor in &self.preprocessors {
            blocks = preprocessor.process(blocks);
        }

        for block in &blocks {
            let mut consumed = false;
            for spec in &self.kind_table {
                let top = *stack.last().unwrap_or(&root);
                let Some(seed) = accept_block(spec.kind, block, &tree[top]) else {
                    continue;
                };

                // Close every open node at or below the new depth. Depth
                // works as a threshold here, which uniformly ends both
                // siblings and deeper descendants.
                while stack.len() > 1
                    && tree[*stack.last().unwrap_or(&root)].depth() >= spec.kind.depth()
                {
                    if let Some(done) = stack.pop() {
                        finalize(&mut tree, done, &mut diagnostics);
                    }
                }

                let id = tree.alloc(seed.kind);
                tree[id].number = seed.number;
                tree[id].content = seed.content;
                let parent = *stack.last().unwrap_or(&root);
                tree.push_child(parent, id);
                stack.push(id);

                if spec.consumes {
                    consumed = true;
                    break;
                }
            }

            if !consumed {
                // Raw content for the innermost open node.
                let top = *stack.last().unwrap_or(&root);
                if !tree[top].content.is_empty() {
                    tree[top].content.push_str("\n\n");
                }
                tree[top].content.push_str(block);
            }
        }

        while let Some(open) = stack.pop() {
            finalize(&mut tree, open, &mut diagnostics);
        }

        ParsedDocument {
            tree,
            root,
            diagnostics,
        }
    }

    /// Read a source file and parse it.
    pub fn parse_file(&self, title: &str, path: impl AsRef<Path>) -> Result<ParsedDocument> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse_document(title, &text))
    }
}

/// Aggregate already parsed documents under a synthetic root so that
/// cross-document references can be resolved against one tree.
///
/// Every constituent document must be fully parsed before aggregation;
/// the combined tree is immutable from the resolver's point of view.
#[must_use]
pub fn aggregate_documents(documents: Vec<ParsedDocument>) -> ParsedDocument {
    let mut tree = DocumentTree::new();
    let mut diagnostics = Diagnostics::new();
    let root = tree.alloc(NodeKind::Root);

    for document in documents {
        let ParsedDocument {
            tree: source,
            root: source_root,
            diagnostics: mut source_diagnostics,
        } = document;

        // Source arenas may have been allocated in any order, so the
        // copy keeps an explicit id mapping instead of assuming that
        // arena index equals pre-order position.
        let mut mapping: Vec<Option<NodeId>> = vec![None; source.len()];
        for id in source.pre_order(source_root) {
            let node = &source[id];
            let new_id = tree.alloc(node.kind);
            tree[new_id].number = node.number;
            tree[new_id].title = node.title.clone();
            tree[new_id].content = node.content.clone();
            mapping[id.index()] = Some(new_id);
        }
        for id in source.pre_order(source_root) {
            // Every visited node and all of its children are mapped.
            let Some(new_id) = mapping[id.index()] else {
                continue;
            };
            for &child in &source[id].children {
                if let Some(new_child) = mapping[child.index()] {
                    tree.push_child(new_id, new_child);
                }
            }
        }
        if let Some(new_root) = mapping[source_root.index()] {
            tree.push_child(root, new_root);
        }
        diagnostics.absorb(&mut source_diagnostics);
    }

    ParsedDocument {
        tree,
        root,
        diagnostics,
    }
}

/// Split raw text into classification blocks.
///
/// Block boundary is a blank line. Within a block, newlines collapse to
/// spaces, soft hyphens (U+00AD) left over from extraction are stripped
/// and the text is NFC-normalized.
#[must_use]
pub fn blockize(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            block
                .replace('\n', " ")
                .replace('\u{00AD}', "")
                .nfc()
                .collect()
        })
        .collect()
}
