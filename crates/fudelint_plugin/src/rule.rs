//! Rule interface.
//!
//! A rule is asked once per pass to [`create`](Rule::create) an observer.
//! The kernel then walks the tree, calling the observer's
//! [`enter`](RuleObserver::enter) and [`exit`](RuleObserver::exit) hooks
//! for every node in document order, and finally awaits
//! [`finish`](RuleObserver::finish). Work that needs to await external
//! effects belongs in `finish`; all rules of a pass are polled
//! concurrently there.

use async_trait::async_trait;

use fudelint_ast::TxtNode;

use crate::{RuleContext, RuleError};

/// A lint rule.
///
/// Rules may keep private state across calls, but must be safe to invoke
/// from concurrent kernel calls: the kernel shares the rule by reference.
pub trait Rule: Send + Sync {
    /// Creates the observer for one pass.
    fn create<'r>(
        &'r self,
        context: &RuleContext<'_>,
    ) -> Result<Box<dyn RuleObserver + 'r>, RuleError>;
}

/// Per-pass observer returned by [`Rule::create`].
#[async_trait]
pub trait RuleObserver: Send {
    /// Called when the walk enters `node`, before its children.
    fn enter(&mut self, _node: &TxtNode<'_>, _context: &RuleContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }

    /// Called when the walk leaves `node`, after its children.
    fn exit(&mut self, _node: &TxtNode<'_>, _context: &RuleContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }

    /// Called once after the walk. The pass waits for every rule's
    /// `finish` to settle.
    async fn finish(&mut self, _context: &RuleContext<'_>) -> Result<(), RuleError> {
        Ok(())
    }
}
