//! # fudelint_ast
//!
//! Structural tree definitions for fudelint.
//!
//! Processors turn source text into a tree of [`TxtNode`]s, and rules
//! observe that tree. The node shape follows textlint's TxtAST, laid out
//! for Rust with arena allocation:
//!
//! - All nodes of one parse live in a single [`AstArena`] (`bumpalo`)
//! - Nodes are `Copy` and borrow their children and text from the arena
//! - The whole tree is freed at once when the pass that parsed it ends
//!
//! ## Example
//!
//! ```rust
//! use fudelint_ast::{AstArena, TxtNode, NodeType, Span};
//!
//! let arena = AstArena::new();
//! let text = arena.alloc(TxtNode::new_text(NodeType::Str, Span::new(0, 5), "hello"));
//! let children = arena.alloc_slice_copy(&[*text]);
//! let doc = TxtNode::new_parent(NodeType::Document, Span::new(0, 5), children);
//!
//! assert!(doc.has_children());
//! ```

mod arena;
mod node;
mod node_type;
mod span;
pub mod visitor;

pub use arena::AstArena;
pub use node::{DefinitionData, LinkData, NodeData, ReferenceData, TxtNode};
pub use node_type::NodeType;
pub use span::{Position, Span};

pub use visitor::{VisitResult, Visitor};
