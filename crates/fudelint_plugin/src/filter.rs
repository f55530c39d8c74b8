//! Filter rules suppress messages instead of reporting them.
//!
//! A filter rule runs after every rule of the pass has settled and marks
//! ranges of the text as ignored, either for all rules or for one rule id.
//! Messages whose `index` falls inside an ignored range are dropped.

use std::cell::RefCell;

use serde_json::Value;

use fudelint_ast::{Span, TxtNode};

use crate::{RuleError, SourceCode};

/// Which messages an [`IgnoreRange`] suppresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreScope {
    /// Messages of every rule.
    All,
    /// Messages of the named rule only.
    Rule(String),
}

impl IgnoreScope {
    /// Returns true if messages of `rule_id` fall under this scope.
    pub fn matches(&self, rule_id: &str) -> bool {
        match self {
            IgnoreScope::All => true,
            IgnoreScope::Rule(id) => id == rule_id,
        }
    }
}

/// A range of the text in which matching messages are suppressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRange {
    /// Ignored byte range `[start, end)`.
    pub span: Span,
    /// Which rules are silenced.
    pub scope: IgnoreScope,
}

impl IgnoreRange {
    /// Returns true if a message of `rule_id` at `index` is suppressed.
    pub fn suppresses(&self, rule_id: &str, index: u32) -> bool {
        self.span.contains(index) && self.scope.matches(rule_id)
    }
}

/// A rule that marks ignored ranges.
pub trait FilterRule: Send + Sync {
    /// Inspects the pass and records ignored ranges on `context`.
    fn filter(&self, context: &FilterContext<'_>) -> Result<(), RuleError>;
}

/// Per-filter, per-pass view of the document.
pub struct FilterContext<'a> {
    rule_id: &'a str,
    options: Option<&'a Value>,
    root: &'a TxtNode<'a>,
    source: &'a SourceCode<'a>,
    ignored: RefCell<Vec<IgnoreRange>>,
}

impl<'a> FilterContext<'a> {
    /// Creates a context for the filter rule `rule_id`.
    pub fn new(
        rule_id: &'a str,
        options: Option<&'a Value>,
        root: &'a TxtNode<'a>,
        source: &'a SourceCode<'a>,
    ) -> Self {
        Self {
            rule_id,
            options,
            root,
            source,
            ignored: RefCell::new(Vec::new()),
        }
    }

    /// The id this filter rule was registered under.
    pub fn rule_id(&self) -> &'a str {
        self.rule_id
    }

    /// The filter rule's options, exactly as configured.
    pub fn options(&self) -> Option<&'a Value> {
        self.options
    }

    /// Root of the parsed tree.
    pub fn root(&self) -> &'a TxtNode<'a> {
        self.root
    }

    /// The source text of this pass.
    pub fn source(&self) -> &'a SourceCode<'a> {
        self.source
    }

    /// Suppresses messages in `span` for the given scope.
    pub fn ignore(&self, span: Span, scope: IgnoreScope) {
        self.ignored.borrow_mut().push(IgnoreRange { span, scope });
    }

    /// Consumes the context, returning the recorded ranges.
    pub fn into_ignored(self) -> Vec<IgnoreRange> {
        self.ignored.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fudelint_ast::NodeType;

    #[test]
    fn test_ignore_range_scope() {
        let all = IgnoreRange {
            span: Span::new(0, 10),
            scope: IgnoreScope::All,
        };
        let one = IgnoreRange {
            span: Span::new(0, 10),
            scope: IgnoreScope::Rule("no-todo".to_string()),
        };

        assert!(all.suppresses("anything", 3));
        assert!(!all.suppresses("anything", 10));
        assert!(one.suppresses("no-todo", 0));
        assert!(!one.suppresses("max-ten", 0));
    }

    #[test]
    fn test_filter_context_records_ranges() {
        let source = SourceCode::new("abc");
        let root = TxtNode::new_leaf(NodeType::Document, Span::new(0, 3));
        let ctx = FilterContext::new("ignore-all", None, &root, &source);

        ctx.ignore(Span::new(0, 1), IgnoreScope::All);
        ctx.ignore(Span::new(1, 2), IgnoreScope::Rule("r".into()));

        assert_eq!(ctx.rule_id(), "ignore-all");
        assert_eq!(ctx.into_ignored().len(), 2);
    }
}
