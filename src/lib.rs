//! lexref - Parse EU-style legal regulations and resolve cross-references.
//!
//! This crate ingests plain-text regulations and directives, parses them
//! into a hierarchical document tree (chapters, articles, paragraphs,
//! points, ...) and detects and resolves natural-language citations such
//! as "Article 5(2)(a) of this Regulation" into structured qualifier
//! paths that address locations in the tree.
//!
//! # Example
//!
//! ```
//! use lexref::{CitationDetector, DocumentTreeParser};
//!
//! let text = "Article 1\n\nSubject-matter\n\n1. This Regulation lays down rules.";
//! let parsed = DocumentTreeParser::default().parse_document("GDPR", text);
//! assert!(parsed.diagnostics.is_empty());
//!
//! let detector = CitationDetector::new();
//! let citations = detector.detect("Articles 8, 11 and 12");
//! assert_eq!(citations.len(), 1);
//! ```
//!
//! # Architecture
//!
//! - [`tree`]: Arena-backed document tree, node kinds, qualifier
//!   specifiers and loose resolution
//! - [`parse`]: Block preprocessors and the document tree parser
//! - [`detect`]: Regular-expression citation detector
//! - [`resolve`]: Context-sensitive reference resolver
//! - [`citation`]: Detected citations and their qualifier paths
//! - [`numerals`]: Roman/alphabetic/ordinal token translation
//! - [`diagnostics`]: Non-fatal issue reporting
//! - [`error`]: Error types and Result alias

pub mod citation;
pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod numerals;
pub mod parse;
pub mod resolve;
pub mod tree;

// Re-export the main entry points
pub use citation::{Citation, QualifierPath};
pub use detect::CitationDetector;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{LexrefError, Result};
pub use parse::{aggregate_documents, DocumentTreeParser, ParsedDocument};
pub use resolve::{ReferenceResolver, ResolutionContext};
pub use tree::{
    render_tree, resolve_loose, DocumentTree, Node, NodeId, NodeKind, Specifier, WILDCARD,
};
