//! # fudelint_plugin
//!
//! Extension API of the fudelint kernel.
//!
//! This crate provides:
//! - The message model (`Message`, `Severity`, `Fix`)
//! - The processor interface plugins implement (`Plugin`, `Processor`)
//! - The rule interface (`Rule`, `RuleObserver`, `FilterRule`)
//! - The capability object handed to rules (`RuleContext`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use fudelint_plugin::{Report, Rule, RuleContext, RuleError, RuleObserver};
//! use fudelint_ast::{NodeType, TxtNode};
//!
//! struct NoTodo;
//! struct NoTodoObserver;
//!
//! impl Rule for NoTodo {
//!     fn create<'r>(&'r self, _ctx: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
//!         Ok(Box::new(NoTodoObserver))
//!     }
//! }
//!
//! #[async_trait::async_trait]
//! impl RuleObserver for NoTodoObserver {
//!     fn enter(&mut self, node: &TxtNode<'_>, ctx: &RuleContext<'_>) -> Result<(), RuleError> {
//!         if node.node_type == NodeType::Str {
//!             if let Some(pos) = node.text().and_then(|t| t.find("TODO")) {
//!                 ctx.report(Report::new("Found TODO").at(node.span.start + pos as u32))?;
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//! ```

mod context;
mod error;
mod filter;
mod message;
mod processor;
mod rule;
mod source;

pub use context::{Report, RuleContext};
pub use error::{ParseError, PluginError, RuleError};
pub use filter::{FilterContext, FilterRule, IgnoreRange, IgnoreScope};
pub use message::{Fix, Message, MessageType, Severity};
pub use processor::{Plugin, Processor};
pub use rule::{Rule, RuleObserver};
pub use source::SourceCode;

pub use async_trait::async_trait;
