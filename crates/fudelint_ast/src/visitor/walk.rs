//! Walk functions for tree traversal.

use std::ops::ControlFlow;

use crate::TxtNode;

use super::{VisitResult, Visitor};

/// Walks `node` depth-first: `enter_node`, every child, then `exit_node`.
///
/// Traversal stops as soon as any hook returns `ControlFlow::Break`.
pub fn walk_node<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a> + ?Sized,
{
    visitor.enter_node(node)?;
    walk_children(visitor, node)?;
    visitor.exit_node(node)
}

/// Walks all children of a node in order.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, node: &TxtNode<'a>) -> VisitResult
where
    V: Visitor<'a> + ?Sized,
{
    for child in node.children {
        walk_node(visitor, child)?;
    }
    ControlFlow::Continue(())
}
