//! Arena-backed document tree.
//!
//! The legal hierarchy (Document > Title > Chapter > Section > Article >
//! Paragraph > Subparagraph > Point > Indent) is stored in a flat arena
//! with parent/child links as indices, which keeps the structural cycle
//! (child ownership plus parent back-reference) out of the type system.

mod arena;
mod node;
mod pattern;
mod printer;
mod resolve;

pub use arena::{DocumentTree, PreOrder};
pub use node::{Node, NodeId, NodeKind, WILDCARD};
pub use pattern::Specifier;
pub use printer::render_tree;
pub use resolve::resolve_loose;
