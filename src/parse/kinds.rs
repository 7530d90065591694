//! Per-kind block acceptance predicates and finalization rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::numerals::{alpha_to_decimal, roman_to_decimal};
use crate::tree::{DocumentTree, Node, NodeId, NodeKind};

/// One row of the parser's priority-ordered kind table.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: NodeKind,

    /// When true the block is fully claimed by a match and no further
    /// kinds are tested against it. Paragraph markers are non-consuming
    /// so that the same block can still be claimed as a subparagraph.
    pub consumes: bool,
}

impl KindSpec {
    #[must_use]
    pub fn new(kind: NodeKind, consumes: bool) -> Self {
        Self { kind, consumes }
    }
}

/// The default kind table for EU-style regulations, in priority order.
#[must_use]
pub fn default_kind_table() -> Vec<KindSpec> {
    vec![
        KindSpec::new(NodeKind::Chapter, true),
        KindSpec::new(NodeKind::Title, true),
        KindSpec::new(NodeKind::Article, true),
        KindSpec::new(NodeKind::Paragraph, false),
        KindSpec::new(NodeKind::Section, true),
        KindSpec::new(NodeKind::Point, true),
        KindSpec::new(NodeKind::Indent, true),
        KindSpec::new(NodeKind::Subparagraph, true),
    ]
}

/// Field values for a node about to be created by an accepted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub kind: NodeKind,
    pub number: Option<i32>,
    pub content: String,
}

impl Seed {
    fn numbered(kind: NodeKind, number: i32) -> Self {
        Self {
            kind,
            number: Some(number),
            content: String::new(),
        }
    }

    fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }
}

static CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Chapter\s((?:[IVXLCDM]+)|(?:[1-9][0-9]*))\s*$").expect("valid regex")
});

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Title ([IVXLCDM]+)\s*$").expect("valid regex"));

static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Article ([1-9][0-9]*)\s*").expect("valid regex"));

static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Section\s*([1-9][0-9]*)").expect("valid regex"));

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:([1-9][0-9]*)\.|\(([1-9][0-9]*)\))\s?").expect("valid regex")
});

static POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\(([a-z]|ii)\)").expect("valid regex"));

static INDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- ").expect("valid regex"));

/// Test whether `block` opens a node of the given kind under `parent`.
///
/// Pure: no tree mutation happens here. Returns the field values for the
/// new node on a match.
#[must_use]
pub fn accept_block(kind: NodeKind, block: &str, parent: &Node) -> Option<Seed> {
    match kind {
        NodeKind::Chapter => {
            let caps = CHAPTER.captures(block)?;
            let token = &caps[1];
            let number = token
                .parse::<i32>()
                .unwrap_or_else(|_| roman_to_decimal(token));
            Some(Seed::numbered(kind, number))
        }
        NodeKind::Title => {
            let caps = TITLE.captures(block)?;
            Some(Seed::numbered(kind, roman_to_decimal(&caps[1])))
        }
        NodeKind::Article => {
            let caps = ARTICLE.captures(block)?;
            Some(Seed::numbered(kind, caps[1].parse().ok()?))
        }
        NodeKind::Section => {
            let caps = SECTION.captures(block)?;
            Some(Seed::numbered(kind, caps[1].parse().ok()?))
        }
        NodeKind::Paragraph => {
            let caps = PARAGRAPH.captures(block)?;
            let token = caps.get(1).or_else(|| caps.get(2))?.as_str();
            // The block is deliberately not claimed as content so that a
            // subparagraph can capture it.
            Some(Seed::numbered(kind, token.parse().ok()?))
        }
        NodeKind::Point => {
            let caps = POINT.captures(block)?;
            Some(Seed::numbered(kind, alpha_to_decimal(&caps[1])).with_content(block))
        }
        NodeKind::Indent => {
            INDENT.is_match(block).then(|| Seed {
                kind,
                number: None,
                content: block.to_string(),
            })
        }
        NodeKind::Subparagraph => {
            if parent.depth() >= NodeKind::Paragraph.depth() {
                // Provisional number; the real one is derived from the
                // sibling position at finalization.
                Some(Seed {
                    kind,
                    number: Some(i32::try_from(parent.children.len()).unwrap_or(0) + 1),
                    content: block.to_string(),
                })
            } else {
                None
            }
        }
        NodeKind::Document | NodeKind::Root => None,
    }
}

/// Kind-specific cleanup, run exactly once per node after its subtree is
/// complete.
pub fn finalize(tree: &mut DocumentTree, id: NodeId, diagnostics: &mut Diagnostics) {
    match tree[id].kind {
        // First content line becomes the heading.
        NodeKind::Article | NodeKind::Chapter | NodeKind::Title => {
            let lines: Vec<String> = tree[id]
                .content
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            if let Some((first, rest)) = lines.split_first() {
                tree[id].title = Some(first.clone());
                tree[id].content = rest.join("\n");
            }
        }
        // Sections carry a heading only; promote all content to title.
        NodeKind::Section => {
            let trimmed = tree[id].content.trim().to_string();
            tree[id].title = (!trimmed.is_empty()).then_some(trimmed);
            tree[id].content = String::new();
        }
        // Position-derived numbering.
        NodeKind::Subparagraph | NodeKind::Indent => {
            match tree.position_among_siblings(id) {
                Some(position) => {
                    tree[id].number = i32::try_from(position).ok();
                }
                None => diagnostics.push(
                    DiagnosticKind::OrphanNode,
                    format!(
                        "could not find {} node among its parent's children",
                        tree[id].kind.keyword()
                    ),
                ),
            }
        }
        NodeKind::Document | NodeKind::Root | NodeKind::Paragraph | NodeKind::Point => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(kind: NodeKind) -> Node {
        Node {
            id: crate::tree::NodeId(0),
            kind,
            number: None,
            title: None,
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_chapter_accepts_roman_and_decimal() {
        let doc = parent(NodeKind::Document);
        let seed = accept_block(NodeKind::Chapter, "CHAPTER IV", &doc).unwrap();
        assert_eq!(seed.number, Some(4));

        let seed = accept_block(NodeKind::Chapter, "Chapter 2", &doc).unwrap();
        assert_eq!(seed.number, Some(2));

        assert!(accept_block(NodeKind::Chapter, "Chapter 2 trailing", &doc).is_none());
    }

    #[test]
    fn test_title_requires_roman() {
        let doc = parent(NodeKind::Document);
        let seed = accept_block(NodeKind::Title, "Title III", &doc).unwrap();
        assert_eq!(seed.number, Some(3));
        assert!(accept_block(NodeKind::Title, "Title 3", &doc).is_none());
    }

    #[test]
    fn test_article_number() {
        let doc = parent(NodeKind::Document);
        let seed = accept_block(NodeKind::Article, "Article 17", &doc).unwrap();
        assert_eq!(seed.number, Some(17));
        assert!(accept_block(NodeKind::Article, "Articles 17", &doc).is_none());
    }

    #[test]
    fn test_paragraph_both_marker_forms() {
        let art = parent(NodeKind::Article);
        let seed = accept_block(NodeKind::Paragraph, "3. The controller shall", &art).unwrap();
        assert_eq!(seed.number, Some(3));
        assert!(seed.content.is_empty());

        let seed = accept_block(NodeKind::Paragraph, "(4) The processor shall", &art).unwrap();
        assert_eq!(seed.number, Some(4));
    }

    #[test]
    fn test_point_letters_and_double_i() {
        let sub = parent(NodeKind::Subparagraph);
        let seed = accept_block(NodeKind::Point, "(a) processed lawfully;", &sub).unwrap();
        assert_eq!(seed.number, Some(1));
        assert_eq!(seed.content, "(a) processed lawfully;");

        let seed = accept_block(NodeKind::Point, "(ii) the second i point", &sub).unwrap();
        assert_eq!(seed.number, Some(10));

        assert!(accept_block(NodeKind::Point, "(3) not a point", &sub).is_none());
    }

    #[test]
    fn test_subparagraph_only_below_paragraph_depth() {
        let para = parent(NodeKind::Paragraph);
        assert!(accept_block(NodeKind::Subparagraph, "any text", &para).is_some());

        let art = parent(NodeKind::Article);
        assert!(accept_block(NodeKind::Subparagraph, "any text", &art).is_none());
    }

    #[test]
    fn test_finalize_article_promotes_heading() {
        let mut tree = DocumentTree::new();
        let mut diags = Diagnostics::new();
        let article = tree.alloc(NodeKind::Article);
        tree[article].content = "\n\nRight to erasure\n\nBody text".to_string();

        finalize(&mut tree, article, &mut diags);
        assert_eq!(tree[article].title.as_deref(), Some("Right to erasure"));
        assert_eq!(tree[article].content, "Body text");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_finalize_section_promotes_all_content() {
        let mut tree = DocumentTree::new();
        let mut diags = Diagnostics::new();
        let section = tree.alloc(NodeKind::Section);
        tree[section].content = "  Transparency and modalities  ".to_string();

        finalize(&mut tree, section, &mut diags);
        assert_eq!(
            tree[section].title.as_deref(),
            Some("Transparency and modalities")
        );
        assert!(tree[section].content.is_empty());
    }

    #[test]
    fn test_finalize_subparagraph_positional_number() {
        let mut tree = DocumentTree::new();
        let mut diags = Diagnostics::new();
        let paragraph = tree.alloc(NodeKind::Paragraph);
        let first = tree.alloc(NodeKind::Subparagraph);
        let second = tree.alloc(NodeKind::Subparagraph);
        tree.push_child(paragraph, first);
        tree.push_child(paragraph, second);

        finalize(&mut tree, second, &mut diags);
        assert_eq!(tree[second].number, Some(2));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_finalize_orphan_indent_diagnostic() {
        let mut tree = DocumentTree::new();
        let mut diags = Diagnostics::new();
        let indent = tree.alloc(NodeKind::Indent);

        finalize(&mut tree, indent, &mut diags);
        assert_eq!(diags.len(), 1);
    }
}
