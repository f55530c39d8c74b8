//! Kernel configuration.

use serde::{Deserialize, Serialize};

use crate::KernelError;

/// Settings that apply to every call made through one [`Kernel`](crate::Kernel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KernelConfig {
    /// Upper bound on fix passes in `fix_text`.
    #[serde(default = "default_max_fix_passes")]
    pub max_fix_passes: usize,

    /// Collapse messages that are identical in rule, index, text, severity
    /// and fix.
    #[serde(default = "default_dedupe_messages")]
    pub dedupe_messages: bool,
}

fn default_max_fix_passes() -> usize {
    10
}

fn default_dedupe_messages() -> bool {
    true
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_fix_passes: default_max_fix_passes(),
            dedupe_messages: default_dedupe_messages(),
        }
    }
}

impl KernelConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, KernelError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| KernelError::configuration(format!("Invalid kernel config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the fix pass bound.
    pub fn with_max_fix_passes(mut self, passes: usize) -> Self {
        self.max_fix_passes = passes;
        self
    }

    /// Enables or disables duplicate collapsing.
    pub fn with_dedupe_messages(mut self, dedupe: bool) -> Self {
        self.dedupe_messages = dedupe;
        self
    }

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.max_fix_passes == 0 {
            return Err(KernelError::configuration(
                "maxFixPasses must be at least 1",
            ));
        }
        Ok(())
    }
}
