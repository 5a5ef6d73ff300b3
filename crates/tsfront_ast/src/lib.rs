//! tsfront_ast: syntax tree definitions for the front end.
//!
//! Nodes are stored in a per-file [`AstArena`] and addressed by [`NodeId`].
//! [`visitor::for_each_child`] is the single child dispatch table; parent
//! linking and the tree queries in [`link`] are built on it.

pub mod link;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use link::{
    ancestors, contains_parse_error, descendants, descendants_of_kind, find_ancestor,
    find_descendant, link_parents,
};
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::{children, for_each_child, for_each_child_with_arrays, walk_children, AstVisitor};
