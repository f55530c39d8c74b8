//! Per-call kernel options and their validation.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use fudelint_plugin::{FilterRule, Plugin, Rule, Severity};

use crate::KernelError;

/// A configured plugin.
#[derive(Clone)]
pub struct PluginEntry {
    /// Unique key among the call's plugins.
    pub plugin_id: String,
    /// The plugin implementation.
    pub plugin: Arc<dyn Plugin>,
    /// Passed verbatim to [`Plugin::create_processor`].
    pub options: Option<Value>,
}

impl PluginEntry {
    /// Creates an entry without options.
    pub fn new(plugin_id: impl Into<String>, plugin: impl Plugin + 'static) -> Self {
        Self::shared(plugin_id, Arc::new(plugin))
    }

    /// Creates an entry for a plugin shared with the caller.
    pub fn shared(plugin_id: impl Into<String>, plugin: Arc<dyn Plugin>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            plugin,
            options: None,
        }
    }

    /// Sets the plugin options.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

impl fmt::Debug for PluginEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginEntry")
            .field("plugin_id", &self.plugin_id)
            .field("extensions", &self.plugin.extensions())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A configured rule.
#[derive(Clone)]
pub struct RuleEntry {
    /// Unique key among the call's rules and filter rules.
    pub rule_id: String,
    /// The rule implementation.
    pub rule: Arc<dyn Rule>,
    /// Exposed to the rule as [`RuleContext::options`](fudelint_plugin::RuleContext::options).
    pub options: Option<Value>,
    /// Replaces the severity of every message this rule reports.
    pub severity: Option<Severity>,
}

impl RuleEntry {
    /// Creates an entry without options.
    pub fn new(rule_id: impl Into<String>, rule: impl Rule + 'static) -> Self {
        Self::shared(rule_id, Arc::new(rule))
    }

    /// Creates an entry for a rule shared with the caller.
    pub fn shared(rule_id: impl Into<String>, rule: Arc<dyn Rule>) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule,
            options: None,
            severity: None,
        }
    }

    /// Sets the rule options.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Overrides the severity of the rule's messages.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("rule_id", &self.rule_id)
            .field("options", &self.options)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// A configured filter rule.
#[derive(Clone)]
pub struct FilterRuleEntry {
    /// Unique key among the call's rules and filter rules.
    pub rule_id: String,
    /// The filter implementation.
    pub rule: Arc<dyn FilterRule>,
    /// Exposed as [`FilterContext::options`](fudelint_plugin::FilterContext::options).
    pub options: Option<Value>,
}

impl FilterRuleEntry {
    /// Creates an entry without options.
    pub fn new(rule_id: impl Into<String>, rule: impl FilterRule + 'static) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule: Arc::new(rule),
            options: None,
        }
    }

    /// Sets the filter options.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

impl fmt::Debug for FilterRuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRuleEntry")
            .field("rule_id", &self.rule_id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Everything one `lint_text` or `fix_text` call needs besides the text.
#[derive(Debug, Clone, Default)]
pub struct KernelOptions {
    /// Echoed into the result. Never touched on disk.
    pub file_path: String,
    /// Extension with its leading dot, used for processor selection.
    pub ext: String,
    /// Plugins in priority order.
    pub plugins: Vec<PluginEntry>,
    /// Rules in configuration order.
    pub rules: Vec<RuleEntry>,
    /// Filter rules in configuration order.
    pub filter_rules: Vec<FilterRuleEntry>,
}

impl KernelOptions {
    /// Creates empty options for the given extension.
    pub fn new(ext: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            ..Self::default()
        }
    }

    /// Sets the file path echoed in results.
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    /// Appends a plugin.
    pub fn with_plugin(mut self, entry: PluginEntry) -> Self {
        self.plugins.push(entry);
        self
    }

    /// Appends a rule.
    pub fn with_rule(mut self, entry: RuleEntry) -> Self {
        self.rules.push(entry);
        self
    }

    /// Appends a filter rule.
    pub fn with_filter_rule(mut self, entry: FilterRuleEntry) -> Self {
        self.filter_rules.push(entry);
        self
    }

    /// Checks the options without calling into any plugin or rule.
    pub fn validate(&self) -> Result<(), KernelError> {
        if !self.ext.starts_with('.') || self.ext.len() < 2 {
            return Err(KernelError::configuration(format!(
                "extension '{}' must start with '.' followed by a name",
                self.ext
            )));
        }

        if self.plugins.is_empty() {
            return Err(KernelError::configuration(format!(
                "no plugins configured, cannot process '{}'",
                self.ext
            )));
        }

        let mut plugin_ids = HashSet::new();
        for entry in &self.plugins {
            check_id("plugin", &entry.plugin_id, &mut plugin_ids)?;
        }

        // Filter rules report under rule ids too.
        let mut rule_ids = HashSet::new();
        for entry in &self.rules {
            check_id("rule", &entry.rule_id, &mut rule_ids)?;
        }
        for entry in &self.filter_rules {
            check_id("rule", &entry.rule_id, &mut rule_ids)?;
        }

        Ok(())
    }
}

fn check_id<'a>(kind: &str, id: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), KernelError> {
    if id.is_empty() {
        return Err(KernelError::configuration(format!("{} id must not be empty", kind)));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(KernelError::configuration(format!(
            "{} id '{}' must not contain whitespace",
            kind, id
        )));
    }
    if !seen.insert(id) {
        return Err(KernelError::configuration(format!(
            "duplicate {} id '{}'",
            kind, id
        )));
    }
    Ok(())
}
