//! Call results.

use serde::Serialize;

use fudelint_plugin::Message;

/// Result of [`Kernel::lint_text`](crate::Kernel::lint_text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// The caller's file path, echoed.
    pub file_path: String,
    /// Messages ordered by index, then rule configuration order.
    pub messages: Vec<Message>,
}

/// Result of [`Kernel::fix_text`](crate::Kernel::fix_text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixResult {
    /// The caller's file path, echoed.
    pub file_path: String,
    /// The text after all fix passes.
    pub output: String,
    /// Messages left after the last pass, ordered like [`LintResult::messages`].
    pub messages: Vec<Message>,
    /// Messages whose fixes were applied, in application order.
    pub applied: Vec<Message>,
}

impl FixResult {
    /// Returns true if any fix was applied.
    pub fn is_modified(&self) -> bool {
        !self.applied.is_empty()
    }
}
