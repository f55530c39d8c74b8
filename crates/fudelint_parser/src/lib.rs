//! # fudelint_parser
//!
//! Built-in processors for the fudelint kernel.
//!
//! - [`TextPlugin`] - plain text (`.txt`, `.text`), paragraphs split on blank lines
//! - [`MarkdownPlugin`] - Markdown (`.md`, `.markdown`, ...) via `markdown-rs`
//!
//! The kernel treats these exactly like third-party plugins.
//!
//! ## Example
//!
//! ```rust
//! use fudelint_ast::{AstArena, NodeType};
//! use fudelint_parser::MarkdownPlugin;
//! use fudelint_plugin::Plugin;
//!
//! let processor = MarkdownPlugin.create_processor(None).unwrap();
//! let arena = AstArena::new();
//! let root = processor.parse(&arena, "# Hello\n\nThis is a paragraph.").unwrap();
//!
//! assert_eq!(root.node_type, NodeType::Document);
//! assert_eq!(root.children.len(), 2);
//! ```

mod markdown;
mod text;

pub use self::markdown::{MarkdownOptions, MarkdownPlugin, MarkdownProcessor};
pub use text::{TextPlugin, TextProcessor};
