//! Kernel error types.

use thiserror::Error;

use fudelint_plugin::{ParseError, PluginError, RuleError};

/// Errors that abort a `lint_text` or `fix_text` call.
///
/// No partial result is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum KernelError {
    /// The call's options are malformed. Raised before any plugin or rule
    /// code runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No configured plugin handles the extension.
    #[error("No processor found for extension '{extension}'")]
    NoMatchingProcessor { extension: String },

    /// The selected processor failed to parse the text.
    #[error("Processor '{processor}' failed to parse: {source}")]
    Parse {
        processor: String,
        source: ParseError,
    },

    /// A plugin failed to build its processor.
    #[error("Plugin '{plugin_id}' failed: {source}")]
    Plugin {
        plugin_id: String,
        source: PluginError,
    },

    /// A rule or filter rule failed during a pass.
    #[error("Rule '{rule_id}' failed: {source}")]
    RuleExecution { rule_id: String, source: RuleError },
}

impl KernelError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a no-matching-processor error.
    pub fn no_matching_processor(extension: impl Into<String>) -> Self {
        Self::NoMatchingProcessor {
            extension: extension.into(),
        }
    }

    /// Wraps a processor's parse failure.
    pub fn parse(processor: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            processor: processor.into(),
            source,
        }
    }

    /// Wraps a plugin failure.
    pub fn plugin(plugin_id: impl Into<String>, source: PluginError) -> Self {
        Self::Plugin {
            plugin_id: plugin_id.into(),
            source,
        }
    }

    /// Wraps a rule failure.
    pub fn rule_execution(rule_id: impl Into<String>, source: RuleError) -> Self {
        Self::RuleExecution {
            rule_id: rule_id.into(),
            source,
        }
    }

    /// The failing rule's id, for `RuleExecution` errors.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Self::RuleExecution { rule_id, .. } => Some(rule_id),
            _ => None,
        }
    }
}
