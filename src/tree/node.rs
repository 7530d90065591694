//! Node kinds and the tree node itself.

use serde::{Deserialize, Serialize};

/// Sentinel number matching any ordinal for a given kind.
pub const WILDCARD: i32 = -1;

/// Rung of the legal hierarchy.
///
/// Depth is fixed per kind and strictly increases from root to any
/// descendant. It is not necessarily contiguous along a path, since
/// optional rungs (a Section inside a Chapter, say) may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Synthetic root used to aggregate several parsed documents.
    Root,
    /// A whole regulation, directive or treaty.
    Document,
    Title,
    Chapter,
    Section,
    Article,
    Paragraph,
    Subparagraph,
    Point,
    Indent,
}

impl NodeKind {
    /// Fixed depth of this kind. Used as the closing threshold by the
    /// parser stack and as the sort key of qualifier paths.
    #[must_use]
    pub fn depth(self) -> i32 {
        match self {
            Self::Root => -1,
            Self::Document => 0,
            Self::Title => 1,
            Self::Chapter => 2,
            Self::Section => 3,
            Self::Article => 4,
            Self::Paragraph => 5,
            Self::Subparagraph => 6,
            Self::Point => 7,
            Self::Indent => 8,
        }
    }

    /// The singular keyword under which this kind is cited in prose.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Document => "document",
            Self::Title => "title",
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Article => "article",
            Self::Paragraph => "paragraph",
            Self::Subparagraph => "subparagraph",
            Self::Point => "point",
            Self::Indent => "indent",
        }
    }

    /// Display name used by the tree renderer.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Document => "Document",
            Self::Title => "Title",
            Self::Chapter => "Chapter",
            Self::Section => "Section",
            Self::Article => "Article",
            Self::Paragraph => "Paragraph",
            Self::Subparagraph => "Subparagraph",
            Self::Point => "Point",
            Self::Indent => "Indent",
        }
    }

    /// Whether this kind is left out when a qualifier path is completed
    /// with the citing node's ancestors. Titles, chapters and sections
    /// are structurally present but not customarily cited.
    #[must_use]
    pub fn ignore_in_qualifier(self) -> bool {
        matches!(self, Self::Root | Self::Title | Self::Chapter | Self::Section)
    }

    /// Parse a singular citation keyword. Document synonyms
    /// ("regulation", "directive", "treaty") all map to [`NodeKind::Document`]
    /// since there is no distinction between them when resolving.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "chapter" => Some(Self::Chapter),
            "section" => Some(Self::Section),
            "article" => Some(Self::Article),
            "paragraph" => Some(Self::Paragraph),
            "subparagraph" => Some(Self::Subparagraph),
            "point" => Some(Self::Point),
            "indent" => Some(Self::Indent),
            "document" | "regulation" | "directive" | "treaty" => Some(Self::Document),
            _ => None,
        }
    }
}

/// Stable synthetic identity of a node, independent of its structural
/// fields. Nodes are never removed from the arena, so ids stay valid for
/// the lifetime of the tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A part of a legal document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,

    /// Ordinal within the logical context; `None` for untitled
    /// containers. [`WILDCARD`] is reserved for resolution patterns.
    pub number: Option<i32>,

    /// Optional label, e.g. an article heading.
    pub title: Option<String>,

    /// Accumulated text that no child node claimed.
    pub content: String,

    pub parent: Option<NodeId>,

    /// Children in document order; never reordered by number.
    pub children: Vec<NodeId>,
}

impl Node {
    #[must_use]
    pub fn depth(&self) -> i32 {
        self.kind.depth()
    }
}
