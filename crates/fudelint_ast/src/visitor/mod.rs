//! Read-only traversal of the structural tree.
//!
//! - [`Visitor`] - hooks called on entering and leaving each node
//! - [`walk_node`] - depth-first, document-order traversal
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use fudelint_ast::{AstArena, NodeType, Span, TxtNode};
//! use fudelint_ast::visitor::{VisitResult, Visitor, walk_node};
//!
//! struct StrCounter(usize);
//!
//! impl<'a> Visitor<'a> for StrCounter {
//!     fn enter_node(&mut self, node: &TxtNode<'a>) -> VisitResult {
//!         if node.node_type == NodeType::Str {
//!             self.0 += 1;
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let text = arena.alloc(TxtNode::new_text(NodeType::Str, Span::new(0, 5), "hello"));
//! let children = arena.alloc_slice_copy(&[*text]);
//! let doc = TxtNode::new_parent(NodeType::Document, Span::new(0, 5), children);
//!
//! let mut counter = StrCounter(0);
//! let _ = walk_node(&mut counter, &doc);
//! assert_eq!(counter.0, 1);
//! ```

mod walk;

use std::ops::ControlFlow;

use crate::TxtNode;

pub use walk::{walk_children, walk_node};

/// Result type for visitor hooks.
///
/// - `ControlFlow::Continue(())` - keep walking
/// - `ControlFlow::Break(())` - stop the whole traversal
pub type VisitResult = ControlFlow<()>;

/// Read-only visitor over [`TxtNode`]s.
///
/// Both hooks default to continuing, so implementors override only what
/// they need.
pub trait Visitor<'a> {
    /// Called before the node's children are visited.
    #[inline]
    fn enter_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after the node and all of its children were visited.
    #[inline]
    fn exit_node(&mut self, _node: &TxtNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}
