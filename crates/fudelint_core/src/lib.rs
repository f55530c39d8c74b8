//! # fudelint_core
//!
//! Kernel of the fudelint text linter.
//!
//! This crate provides:
//! - The `Kernel` orchestrator with `lint_text` and `fix_text`
//! - Per-call options (`KernelOptions`) and their validation
//! - Processor selection by file extension
//! - The rule runner and the fix reconciler
//!
//! Parsing is delegated to plugins and linting to rules, both defined
//! against the traits in `fudelint_plugin`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fudelint_core::{Kernel, KernelOptions, PluginEntry, RuleEntry};
//! use fudelint_parser::TextPlugin;
//!
//! let kernel = Kernel::default();
//! let options = KernelOptions::new(".txt")
//!     .with_plugin(PluginEntry::new("text", TextPlugin))
//!     .with_rule(RuleEntry::new("no-todo", NoTodo));
//!
//! let result = kernel.fix_text("TODO: ship it", &options).await?;
//! println!("{}", result.output);
//! ```

mod config;
mod error;
mod fixer;
mod kernel;
mod options;
mod processor;
mod result;
mod runner;

pub use config::KernelConfig;
pub use error::KernelError;
pub use kernel::Kernel;
pub use options::{FilterRuleEntry, KernelOptions, PluginEntry, RuleEntry};
pub use result::{FixResult, LintResult};
