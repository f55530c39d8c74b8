//! The capability object handed to rules.
//!
//! A [`RuleContext`] is scoped to one rule in one pass. It gives read-only
//! access to the tree, the source text and the rule's options, and collects
//! the rule's reports. Reports are write-only: no rule sees another rule's
//! messages.

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use fudelint_ast::{Position, TxtNode};

use crate::{Fix, RuleError, Severity, SourceCode};

/// A partial message as reported by a rule.
///
/// The kernel stamps `ruleId`, `type`, `line` and `column` when it turns a
/// report into a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Human-readable text.
    pub message: String,
    /// Absolute byte offset into the source text.
    pub index: u32,
    /// Severity, `Error` when left unset.
    pub severity: Option<Severity>,
    /// Optional patch.
    pub fix: Option<Fix>,
}

impl Report {
    /// Creates a report at offset 0.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            index: 0,
            severity: None,
            fix: None,
        }
    }

    /// Creates a report at the start of `node`.
    pub fn for_node(node: &TxtNode<'_>, message: impl Into<String>) -> Self {
        Self::new(message).at(node.span.start)
    }

    /// Sets the absolute offset.
    pub fn at(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Sets the offset relative to the start of `node`.
    pub fn at_offset_in(self, node: &TxtNode<'_>, offset: u32) -> Self {
        self.at(node.span.start.saturating_add(offset))
    }

    /// Sets the severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Attaches a fix.
    pub fn fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// Per-rule, per-pass view of the document.
pub struct RuleContext<'a> {
    rule_id: &'a str,
    options: Option<&'a Value>,
    file_path: &'a str,
    ext: &'a str,
    root: &'a TxtNode<'a>,
    source: &'a SourceCode<'a>,
    reports: Mutex<Vec<Report>>,
    faults: Mutex<Vec<String>>,
}

impl<'a> RuleContext<'a> {
    /// Creates a context for `rule_id`. Called by the kernel once per rule
    /// and pass.
    pub fn new(
        rule_id: &'a str,
        options: Option<&'a Value>,
        file_path: &'a str,
        ext: &'a str,
        root: &'a TxtNode<'a>,
        source: &'a SourceCode<'a>,
    ) -> Self {
        Self {
            rule_id,
            options,
            file_path,
            ext,
            root,
            source,
            reports: Mutex::new(Vec::new()),
            faults: Mutex::new(Vec::new()),
        }
    }

    /// The id this rule was registered under.
    pub fn rule_id(&self) -> &'a str {
        self.rule_id
    }

    /// The rule's options, exactly as configured.
    pub fn options(&self) -> Option<&'a Value> {
        self.options
    }

    /// Decodes the rule's options, falling back to `T::default()` when unset.
    pub fn options_as<T>(&self) -> Result<T, RuleError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.options {
            Some(value) => Ok(T::deserialize(value)?),
            None => Ok(T::default()),
        }
    }

    /// The file path the caller passed in. Not checked against the filesystem.
    pub fn file_path(&self) -> &'a str {
        self.file_path
    }

    /// The extension the processor was selected for, with its leading dot.
    pub fn ext(&self) -> &'a str {
        self.ext
    }

    /// Root of the parsed tree.
    pub fn root(&self) -> &'a TxtNode<'a> {
        self.root
    }

    /// The source text of this pass.
    pub fn source(&self) -> &'a SourceCode<'a> {
        self.source
    }

    /// Resolves an offset to its line and column.
    pub fn position(&self, index: u32) -> Position {
        self.source.position(index)
    }

    /// Records a report.
    ///
    /// Fix ranges reaching past the end of the text are kept as reported;
    /// the kernel clamps them to the text when applying. A report whose
    /// index is out of bounds, or whose fix range is inverted or splits a
    /// character, is rejected; the rejection also fails the pass, even if
    /// the rule discards the returned error.
    pub fn report(&self, report: Report) -> Result<(), RuleError> {
        if let Err(reason) = self.validate(&report) {
            self.faults.lock().push(reason.clone());
            return Err(RuleError::invalid_report(reason));
        }
        debug!(rule = self.rule_id, index = report.index, "report");
        self.reports.lock().push(report);
        Ok(())
    }

    fn validate(&self, report: &Report) -> Result<(), String> {
        let len = self.source.len();
        if report.index > len {
            return Err(format!(
                "index {} is out of range for text of length {}",
                report.index, len
            ));
        }
        if !self.source.is_valid_offset(report.index) {
            return Err(format!("index {} is not on a char boundary", report.index));
        }

        if let Some(fix) = report.fix.as_ref() {
            let [start, end] = fix.range;
            if start > end {
                return Err(format!("fix range [{}, {}) is inverted", start, end));
            }
            let (start, end) = (start.min(len), end.min(len));
            if !self.source.is_valid_offset(start) || !self.source.is_valid_offset(end) {
                return Err(format!(
                    "fix range [{}, {}) is not on char boundaries",
                    start, end
                ));
            }
        }

        Ok(())
    }

    /// Consumes the context, returning the accepted reports in report order,
    /// or the first rejected report as an error.
    pub fn into_reports(self) -> Result<Vec<Report>, RuleError> {
        if let Some(reason) = self.faults.into_inner().into_iter().next() {
            return Err(RuleError::invalid_report(reason));
        }
        Ok(self.reports.into_inner())
    }
}
