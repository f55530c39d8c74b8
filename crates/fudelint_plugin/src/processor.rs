//! Processor interface.
//!
//! A [`Plugin`] is configured once per kernel call and builds a
//! [`Processor`], which turns source text of its format into a tree.
//! Extensions are always written with their leading dot (`".md"`).

use serde_json::Value;

use fudelint_ast::{AstArena, TxtNode};

use crate::{Fix, ParseError, PluginError};

/// A plugin contributing a processor for one or more file formats.
pub trait Plugin: Send + Sync {
    /// Extensions this plugin handles without having to build a processor
    /// first, e.g. `&[".md", ".markdown"]`.
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Builds a processor. `options` is the plugin's configuration payload,
    /// passed through untouched.
    fn create_processor(&self, options: Option<&Value>) -> Result<Box<dyn Processor>, PluginError>;

    /// Returns true if the static extension list claims `extension`.
    fn declares(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Parses source text into a tree and, optionally, applies fixes.
pub trait Processor: Send + Sync {
    /// Returns the name of this processor, for diagnostics.
    fn name(&self) -> &str;

    /// Returns true if this processor can handle `extension`.
    fn supports(&self, _extension: &str) -> bool {
        false
    }

    /// Parses `source` into a tree allocated in `arena`.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError>;

    /// Applies accepted fixes to `source`.
    ///
    /// `fixes` are non-overlapping, sorted by start offset and clamped to
    /// `source`. Returning `None` lets the kernel splice them itself.
    fn apply_fixes(&self, _source: &str, _fixes: &[&Fix]) -> Option<String> {
        None
    }
}
