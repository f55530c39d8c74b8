//! Error types raised by collaborators: processors, plugins and rules.

use thiserror::Error;

/// Errors a processor returns when it cannot parse its input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is invalid.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred.
        offset: Option<usize>,
    },

    /// The processor encountered an unsupported construct.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// An internal processor fault.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new invalid source error with offset.
    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates a new unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported(feature.into())
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Errors a plugin returns while building its processor.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The processor could not be created, usually because of bad options.
    #[error("Failed to create processor: {0}")]
    Creation(String),

    /// Options could not be decoded.
    #[error("Invalid plugin options: {0}")]
    Options(#[from] serde_json::Error),

    /// An internal plugin fault.
    #[error("Internal plugin error: {0}")]
    Internal(String),
}

impl PluginError {
    /// Creates a creation error.
    pub fn creation(message: impl Into<String>) -> Self {
        Self::Creation(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Faults raised by a rule while it runs.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule gave up.
    #[error("{0}")]
    Failed(String),

    /// The rule reported a message that violates the message invariants.
    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// The rule panicked.
    #[error("Rule panicked: {0}")]
    Panicked(String),

    /// Rule options could not be decoded.
    #[error("Invalid rule options: {0}")]
    Options(#[from] serde_json::Error),

    /// Any other error surfaced by the rule's own dependencies.
    #[error(transparent)]
    External(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl RuleError {
    /// Creates a failure error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates an invalid report error.
    pub fn invalid_report(message: impl Into<String>) -> Self {
        Self::InvalidReport(message.into())
    }
}
