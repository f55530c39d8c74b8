//! The lint message model.
//!
//! The serialized shape is the contract consumed by formatters and editor
//! integrations, so field names and the `[start, end)` fix range layout
//! must not change.

use serde::{Deserialize, Serialize};

use fudelint_ast::{Position, Span};

/// Severity level for messages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Should be reviewed.
    Warning,
    /// Must be fixed.
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Discriminator of a [`Message`]. Lint messages are the only kind.
///
/// The "lint message" discriminator goes over the wire as `"lint"`, the
/// value textlint emits, not as the literal string `"lint message"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Lint,
}

/// A textual patch: replace `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fix {
    /// Half-open byte range `[start, end)`.
    pub range: [u32; 2],

    /// The replacement text.
    pub text: String,
}

impl Fix {
    /// Creates a fix replacing `span` with `text`.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            range: [span.start, span.end],
            text: text.into(),
        }
    }

    /// Creates a fix that inserts text at a position.
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::new(offset, offset), text)
    }

    /// Creates a fix that deletes a span.
    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    /// Returns the range as a [`Span`].
    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.range[0], self.range[1])
    }

    /// Start offset of the replaced range.
    #[inline]
    pub const fn start(&self) -> u32 {
        self.range[0]
    }

    /// End offset of the replaced range.
    #[inline]
    pub const fn end(&self) -> u32 {
        self.range[1]
    }
}

/// One diagnostic produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Always [`MessageType::Lint`].
    #[serde(rename = "type", default)]
    pub message_type: MessageType,

    /// The rule that reported this message.
    pub rule_id: String,

    /// Human-readable text.
    pub message: String,

    /// Byte offset into the text the rule observed.
    pub index: u32,

    /// 1-based line derived from `index`.
    pub line: u32,

    /// 1-based column (in chars) derived from `index`.
    pub column: u32,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Optional patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Message {
    /// Creates a message at `index` with the given resolved position.
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        index: u32,
        position: Position,
    ) -> Self {
        Self {
            message_type: MessageType::Lint,
            rule_id: rule_id.into(),
            message: message.into(),
            index,
            line: position.line,
            column: position.column,
            severity: Severity::Error,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets a fix.
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Returns the resolved position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}
