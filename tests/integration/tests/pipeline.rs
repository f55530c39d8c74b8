//! End-to-end tests: built-in processors, kernel and realistic rules.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

use fudelint_ast::visitor::walk_node;
use fudelint_ast::{NodeType, Span, TxtNode, VisitResult, Visitor};
use fudelint_core::{FilterRuleEntry, Kernel, KernelError, KernelOptions, PluginEntry, RuleEntry};
use fudelint_parser::{MarkdownPlugin, TextPlugin};
use fudelint_plugin::{
    FilterContext, FilterRule, Fix, IgnoreScope, Report, Rule, RuleContext, RuleError,
    RuleObserver, Severity, async_trait,
};

/// Flags every `TODO` in the raw text, code included.
struct NoTodo;

struct NoTodoObserver;

impl Rule for NoTodo {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(NoTodoObserver))
    }
}

#[async_trait]
impl RuleObserver for NoTodoObserver {
    async fn finish(&mut self, context: &RuleContext<'_>) -> Result<(), RuleError> {
        for (offset, _) in context.source().text().match_indices("TODO") {
            context.report(
                Report::new("Found TODO")
                    .at(offset as u32)
                    .severity(Severity::Warning),
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct PreferTermOptions {
    terms: BTreeMap<String, String>,
}

/// Replaces discouraged spellings in prose.
struct PreferTerm;

struct PreferTermObserver {
    terms: BTreeMap<String, String>,
}

impl Rule for PreferTerm {
    fn create<'r>(&'r self, context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        let options: PreferTermOptions = context.options_as()?;
        Ok(Box::new(PreferTermObserver {
            terms: options.terms,
        }))
    }
}

#[async_trait]
impl RuleObserver for PreferTermObserver {
    fn enter(&mut self, node: &TxtNode<'_>, context: &RuleContext<'_>) -> Result<(), RuleError> {
        if node.node_type != NodeType::Str {
            return Ok(());
        }
        let Some(text) = context.source().node_text(node) else {
            return Ok(());
        };

        for (wrong, right) in &self.terms {
            for (offset, matched) in text.match_indices(wrong.as_str()) {
                let start = node.span.start + offset as u32;
                let span = Span::new(start, start + matched.len() as u32);
                context.report(
                    Report::new(format!("Use '{}' instead of '{}'", right, wrong))
                        .at(start)
                        .fix(Fix::new(span, right.as_str())),
                )?;
            }
        }
        Ok(())
    }
}

/// Silences every rule inside code blocks and inline code.
struct IgnoreCode;

struct CodeSpans(Vec<Span>);

impl<'a> Visitor<'a> for CodeSpans {
    fn enter_node(&mut self, node: &TxtNode<'a>) -> VisitResult {
        if matches!(node.node_type, NodeType::CodeBlock | NodeType::Code) {
            self.0.push(node.span);
        }
        VisitResult::Continue(())
    }
}

impl FilterRule for IgnoreCode {
    fn filter(&self, context: &FilterContext<'_>) -> Result<(), RuleError> {
        let mut spans = CodeSpans(Vec::new());
        let _ = walk_node(&mut spans, context.root());
        for span in spans.0 {
            context.ignore(span, IgnoreScope::All);
        }
        Ok(())
    }
}

const MARKDOWN: &str = "# Title\n\nUse javascript here. TODO: more\n\n```js\nTODO javascript\n```\n";

fn markdown_options() -> KernelOptions {
    KernelOptions::new(".md")
        .with_file_path("docs/guide.md")
        .with_plugin(PluginEntry::new("markdown", MarkdownPlugin))
        .with_plugin(PluginEntry::new("text", TextPlugin))
        .with_rule(RuleEntry::new("no-todo", NoTodo))
        .with_rule(
            RuleEntry::new("prefer-term", PreferTerm)
                .with_options(json!({ "terms": { "javascript": "JavaScript" } })),
        )
        .with_filter_rule(FilterRuleEntry::new("ignore-code", IgnoreCode))
}

fn summary(messages: &[fudelint_plugin::Message]) -> Vec<(&str, u32, u32, u32)> {
    messages
        .iter()
        .map(|m| (m.rule_id.as_str(), m.index, m.line, m.column))
        .collect()
}

#[tokio::test]
async fn lints_markdown_outside_code() {
    let result = Kernel::default()
        .lint_text(MARKDOWN, &markdown_options())
        .await
        .unwrap();

    assert_eq!(result.file_path, "docs/guide.md");
    assert_eq!(
        summary(&result.messages),
        vec![("prefer-term", 13, 3, 5), ("no-todo", 30, 3, 22)]
    );
    assert_eq!(result.messages[0].message, "Use 'JavaScript' instead of 'javascript'");
    assert_eq!(result.messages[1].severity, Severity::Warning);
}

#[tokio::test]
async fn code_is_reported_without_filter() {
    let mut options = markdown_options();
    options.filter_rules.clear();

    let result = Kernel::default().lint_text(MARKDOWN, &options).await.unwrap();

    let todos: Vec<_> = result
        .messages
        .iter()
        .filter(|m| m.rule_id == "no-todo")
        .map(|m| (m.line, m.column))
        .collect();
    assert_eq!(todos, vec![(3, 22), (6, 1)]);
}

#[tokio::test]
async fn fixes_markdown_prose_only() {
    let result = Kernel::default()
        .fix_text(MARKDOWN, &markdown_options())
        .await
        .unwrap();

    assert_eq!(
        result.output,
        "# Title\n\nUse JavaScript here. TODO: more\n\n```js\nTODO javascript\n```\n"
    );
    assert_eq!(summary(&result.messages), vec![("no-todo", 30, 3, 22)]);
    assert_eq!(result.applied.len(), 1);
    assert_eq!(result.applied[0].rule_id, "prefer-term");
}

#[tokio::test]
async fn selects_text_processor_for_txt() {
    let mut options = markdown_options();
    options.ext = ".txt".to_string();
    let text = "First line with javascript.\nSecond line.\n\nNew paragraph TODO";

    let result = Kernel::default().lint_text(text, &options).await.unwrap();

    assert_eq!(
        summary(&result.messages),
        vec![("prefer-term", 16, 1, 17), ("no-todo", 56, 4, 15)]
    );
}

#[tokio::test]
async fn columns_count_characters() {
    let mut options = markdown_options();
    options.ext = ".txt".to_string();

    let result = Kernel::default()
        .fix_text("日本語でjavascript", &options)
        .await
        .unwrap();

    assert_eq!(result.output, "日本語でJavaScript");
    assert_eq!(summary(&result.applied), vec![("prefer-term", 12, 1, 5)]);
}

#[tokio::test]
async fn unknown_extension_has_no_builtin_processor() {
    let mut options = markdown_options();
    options.ext = ".rst".to_string();

    let err = Kernel::default().lint_text("text", &options).await.unwrap_err();

    assert!(matches!(err, KernelError::NoMatchingProcessor { .. }));
}

#[tokio::test]
async fn bad_plugin_options_fail_the_call() {
    let options = KernelOptions::new(".md")
        .with_plugin(PluginEntry::new("markdown", MarkdownPlugin).with_options(json!({ "gfm": "yes" })))
        .with_rule(RuleEntry::new("no-todo", NoTodo));

    let err = Kernel::default().lint_text("TODO", &options).await.unwrap_err();

    assert!(matches!(err, KernelError::Plugin { ref plugin_id, .. } if plugin_id == "markdown"));
}

#[tokio::test]
async fn bad_rule_options_fail_the_call() {
    let options = KernelOptions::new(".md")
        .with_plugin(PluginEntry::new("markdown", MarkdownPlugin))
        .with_rule(RuleEntry::new("prefer-term", PreferTerm).with_options(json!({ "terms": 3 })));

    let err = Kernel::default().lint_text("text", &options).await.unwrap_err();

    assert!(matches!(
        err,
        KernelError::RuleExecution { source: RuleError::Options(_), .. }
    ));
}
