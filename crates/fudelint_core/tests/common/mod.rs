//! Stub collaborators shared by the kernel tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use fudelint_ast::{AstArena, NodeType, Span, TxtNode};
use fudelint_plugin::{
    Fix, ParseError, Plugin, PluginError, Processor, Report, Rule, RuleContext, RuleError,
    RuleObserver, Severity, async_trait,
};

/// Counts calls and records the options each call received.
#[derive(Clone, Default)]
pub struct Probe {
    calls: Arc<AtomicUsize>,
    options: Arc<Mutex<Vec<Option<Value>>>>,
}

impl Probe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, options: Option<&Value>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.options.lock().unwrap().push(options.cloned());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn options(&self) -> Vec<Option<Value>> {
        self.options.lock().unwrap().clone()
    }
}

/// Plugin whose processor wraps the whole text in one paragraph.
pub struct StubPlugin {
    pub probe: Probe,
    pub extensions: &'static [&'static str],
}

impl StubPlugin {
    pub fn new(probe: &Probe) -> Self {
        Self {
            probe: probe.clone(),
            extensions: &[".txt"],
        }
    }
}

impl Plugin for StubPlugin {
    fn extensions(&self) -> &[&str] {
        self.extensions
    }

    fn create_processor(&self, options: Option<&Value>) -> Result<Box<dyn Processor>, PluginError> {
        self.probe.record(options);
        Ok(Box::new(StubProcessor))
    }
}

/// Fails to parse any text containing `<<`.
pub struct StubProcessor;

impl Processor for StubProcessor {
    fn name(&self) -> &str {
        "stub"
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        if let Some(offset) = source.find("<<") {
            return Err(ParseError::invalid_source_at("unbalanced '<<'", offset));
        }

        let span = Span::new(0, source.len() as u32);
        let text = arena.alloc(TxtNode::new_text(NodeType::Str, span, arena.alloc_str(source)));
        let paragraph = arena.alloc(TxtNode::new_parent(
            NodeType::Paragraph,
            span,
            arena.alloc_slice_copy(&[*text]),
        ));
        Ok(TxtNode::new_parent(
            NodeType::Document,
            span,
            arena.alloc_slice_copy(&[*paragraph]),
        ))
    }
}

/// Claims `.txt`; its processor panics on text containing `!!` and on
/// every attempt to apply fixes.
pub struct FaultyPlugin;

impl Plugin for FaultyPlugin {
    fn extensions(&self) -> &[&str] {
        &[".txt"]
    }

    fn create_processor(&self, _options: Option<&Value>) -> Result<Box<dyn Processor>, PluginError> {
        Ok(Box::new(FaultyProcessor))
    }
}

pub struct FaultyProcessor;

impl Processor for FaultyProcessor {
    fn name(&self) -> &str {
        "faulty"
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        if source.contains("!!") {
            panic!("processor internal fault");
        }
        StubProcessor.parse(arena, source)
    }

    fn apply_fixes(&self, _source: &str, _fixes: &[&Fix]) -> Option<String> {
        panic!("fix table corrupted")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRuleOptions {
    #[serde(default)]
    pub errors: Vec<ReportedError>,
    /// Only report while the text equals this value.
    pub when_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportedError {
    pub message: String,
    #[serde(default)]
    pub index: u32,
    pub severity: Option<Severity>,
    pub range: Option<[u32; 2]>,
    pub output: Option<String>,
}

/// Reports whatever its options list, after the walk.
pub struct ErrorRule {
    pub probe: Probe,
}

impl ErrorRule {
    pub fn new(probe: &Probe) -> Self {
        Self {
            probe: probe.clone(),
        }
    }
}

impl Rule for ErrorRule {
    fn create<'r>(&'r self, context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        self.probe.record(context.options());
        Ok(Box::new(ErrorObserver))
    }
}

struct ErrorObserver;

#[async_trait]
impl RuleObserver for ErrorObserver {
    async fn finish(&mut self, context: &RuleContext<'_>) -> Result<(), RuleError> {
        let options: ErrorRuleOptions = context.options_as()?;
        if let Some(expected) = &options.when_text {
            if context.source().text() != expected {
                return Ok(());
            }
        }

        for error in options.errors {
            let mut report = Report::new(error.message).at(error.index);
            if let Some(severity) = error.severity {
                report = report.severity(severity);
            }
            if let Some(range) = error.range {
                report = report.fix(Fix {
                    range,
                    text: error.output.unwrap_or_default(),
                });
            }
            context.report(report)?;
        }
        Ok(())
    }
}

/// Sleeps, then reports one message per configured index.
pub struct SlowRule {
    pub delay_ms: u64,
    pub indexes: Vec<u32>,
}

struct SlowObserver<'r> {
    rule: &'r SlowRule,
}

impl Rule for SlowRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(SlowObserver { rule: self }))
    }
}

#[async_trait]
impl RuleObserver for SlowObserver<'_> {
    async fn finish(&mut self, context: &RuleContext<'_>) -> Result<(), RuleError> {
        tokio::time::sleep(Duration::from_millis(self.rule.delay_ms)).await;
        for index in &self.rule.indexes {
            context.report(Report::new(format!("at {}", index)).at(*index))?;
        }
        Ok(())
    }
}

/// Replaces every occurrence of `from` in `Str` nodes with `to`.
pub struct ReplaceRule {
    pub from: &'static str,
    pub to: &'static str,
}

struct ReplaceObserver<'r> {
    rule: &'r ReplaceRule,
}

impl Rule for ReplaceRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(ReplaceObserver { rule: self }))
    }
}

#[async_trait]
impl RuleObserver for ReplaceObserver<'_> {
    fn enter(&mut self, node: &TxtNode<'_>, context: &RuleContext<'_>) -> Result<(), RuleError> {
        if node.node_type != NodeType::Str {
            return Ok(());
        }
        let Some(text) = context.source().node_text(node) else {
            return Ok(());
        };
        for (offset, matched) in text.match_indices(self.rule.from) {
            let start = node.span.start + offset as u32;
            let span = Span::new(start, start + matched.len() as u32);
            context.report(
                Report::new(format!("Use '{}' instead of '{}'", self.rule.to, self.rule.from))
                    .at(start)
                    .fix(Fix::new(span, self.rule.to)),
            )?;
        }
        Ok(())
    }
}

/// Always proposes to replace the whole text with `b` if it is `a`, and
/// with `a` otherwise.
pub struct FlipFlopRule;

struct FlipFlopObserver;

impl Rule for FlipFlopRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(FlipFlopObserver))
    }
}

#[async_trait]
impl RuleObserver for FlipFlopObserver {
    async fn finish(&mut self, context: &RuleContext<'_>) -> Result<(), RuleError> {
        let text = context.source().text();
        let replacement = if text == "a" { "b" } else { "a" };
        context.report(Report::new("flip").fix(Fix::new(Span::new(0, text.len() as u32), replacement)))
    }
}

/// Always appends `!`.
pub struct ShoutRule;

struct ShoutObserver;

impl Rule for ShoutRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(ShoutObserver))
    }
}

#[async_trait]
impl RuleObserver for ShoutObserver {
    async fn finish(&mut self, context: &RuleContext<'_>) -> Result<(), RuleError> {
        let end = context.source().len();
        context.report(Report::new("more").at(end).fix(Fix::insert(end, "!")))
    }
}

/// Fails while creating its observer.
pub struct FailingRule;

impl Rule for FailingRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Err(RuleError::failed("dictionary unavailable"))
    }
}

/// Panics while observing.
pub struct PanickingRule;

struct PanickingObserver;

impl Rule for PanickingRule {
    fn create<'r>(&'r self, _context: &RuleContext<'_>) -> Result<Box<dyn RuleObserver + 'r>, RuleError> {
        Ok(Box::new(PanickingObserver))
    }
}

#[async_trait]
impl RuleObserver for PanickingObserver {
    fn enter(&mut self, _node: &TxtNode<'_>, _context: &RuleContext<'_>) -> Result<(), RuleError> {
        panic!("observer exploded");
    }
}
