//! Rule runner: executes every rule of one pass and collects its messages.
//!
//! All rules of a pass are polled concurrently inside the caller's task.
//! Completion order is irrelevant: messages are ordered afterwards by
//! `(index, rule order, report sequence)`.

use std::any::Any;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};

use futures_util::FutureExt;
use futures_util::future::join_all;
use tracing::{debug, warn};

use fudelint_ast::visitor::walk_node;
use fudelint_ast::{TxtNode, VisitResult, Visitor};
use fudelint_plugin::{
    FilterContext, IgnoreRange, Message, Report, RuleContext, RuleError, RuleObserver, SourceCode,
};

use crate::{KernelError, KernelOptions, RuleEntry};

/// A message together with the keys that order it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankedMessage {
    pub message: Message,
    /// Position of the reporting rule in the configuration.
    pub rule_order: usize,
    /// Position of the report among the rule's reports in this pass.
    pub seq: usize,
}

impl RankedMessage {
    fn sort_key(&self) -> (u32, usize, usize) {
        (self.message.index, self.rule_order, self.seq)
    }
}

/// Runs the configured rules over one parsed tree.
pub(crate) struct RuleRunner<'k> {
    options: &'k KernelOptions,
    dedupe: bool,
}

impl<'k> RuleRunner<'k> {
    pub(crate) fn new(options: &'k KernelOptions, dedupe: bool) -> Self {
        Self { options, dedupe }
    }

    /// Executes every rule once and returns the pass's ordered messages.
    ///
    /// Fails with the configuration-earliest failing rule if any rule
    /// fails; no messages are returned in that case.
    pub(crate) async fn run(
        &self,
        root: &TxtNode<'_>,
        source: &SourceCode<'_>,
    ) -> Result<Vec<RankedMessage>, KernelError> {
        let tasks = self.options.rules.iter().map(|entry| {
            let context = RuleContext::new(
                &entry.rule_id,
                entry.options.as_ref(),
                &self.options.file_path,
                &self.options.ext,
                root,
                source,
            );
            AssertUnwindSafe(run_rule(entry, context)).catch_unwind()
        });
        let outcomes = join_all(tasks).await;

        let mut messages = Vec::new();
        for (rule_order, (entry, outcome)) in self.options.rules.iter().zip(outcomes).enumerate() {
            let reports = match outcome {
                Ok(Ok(reports)) => reports,
                Ok(Err(err)) => {
                    warn!(rule = %entry.rule_id, error = %err, "Rule failed");
                    return Err(KernelError::rule_execution(&entry.rule_id, err));
                }
                Err(payload) => {
                    let err = RuleError::Panicked(panic_message(payload));
                    warn!(rule = %entry.rule_id, error = %err, "Rule panicked");
                    return Err(KernelError::rule_execution(&entry.rule_id, err));
                }
            };

            debug!(rule = %entry.rule_id, reports = reports.len(), "Rule settled");
            messages.extend(
                reports
                    .into_iter()
                    .enumerate()
                    .map(|(seq, report)| RankedMessage {
                        message: to_message(entry, report, source),
                        rule_order,
                        seq,
                    }),
            );
        }

        let ignored = self.collect_ignored(root, source)?;
        if !ignored.is_empty() {
            let before = messages.len();
            messages.retain(|m| {
                !ignored
                    .iter()
                    .any(|range| range.suppresses(&m.message.rule_id, m.message.index))
            });
            debug!(suppressed = before - messages.len(), "Applied ignore ranges");
        }

        messages.sort_by_key(RankedMessage::sort_key);

        if self.dedupe {
            let mut seen = HashSet::new();
            messages.retain(|m| seen.insert(m.message.clone()));
        }

        Ok(messages)
    }

    fn collect_ignored(
        &self,
        root: &TxtNode<'_>,
        source: &SourceCode<'_>,
    ) -> Result<Vec<IgnoreRange>, KernelError> {
        let mut ignored = Vec::new();

        for entry in &self.options.filter_rules {
            let context = FilterContext::new(&entry.rule_id, entry.options.as_ref(), root, source);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.rule.filter(&context)));

            match outcome {
                Ok(Ok(())) => ignored.extend(context.into_ignored()),
                Ok(Err(err)) => return Err(KernelError::rule_execution(&entry.rule_id, err)),
                Err(payload) => {
                    return Err(KernelError::rule_execution(
                        &entry.rule_id,
                        RuleError::Panicked(panic_message(payload)),
                    ));
                }
            }
        }

        Ok(ignored)
    }
}

/// One rule's pass: create, walk, finish.
async fn run_rule(entry: &RuleEntry, context: RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
    {
        let mut observer = entry.rule.create(&context)?;

        let walk_error = {
            let mut walk = ObserverWalk {
                observer: observer.as_mut(),
                context: &context,
                error: None,
            };
            let _ = walk_node(&mut walk, context.root());
            walk.error
        };
        if let Some(err) = walk_error {
            return Err(err);
        }

        observer.finish(&context).await?;
    }

    context.into_reports()
}

/// Forwards tree traversal to a rule's observer hooks, stopping at the
/// first error.
struct ObserverWalk<'w, 'r, 'c> {
    observer: &'w mut (dyn RuleObserver + 'r),
    context: &'w RuleContext<'c>,
    error: Option<RuleError>,
}

impl ObserverWalk<'_, '_, '_> {
    fn forward(&mut self, outcome: Result<(), RuleError>) -> VisitResult {
        match outcome {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                self.error = Some(err);
                ControlFlow::Break(())
            }
        }
    }
}

impl<'a> Visitor<'a> for ObserverWalk<'_, '_, '_> {
    fn enter_node(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let outcome = self.observer.enter(node, self.context);
        self.forward(outcome)
    }

    fn exit_node(&mut self, node: &TxtNode<'a>) -> VisitResult {
        let outcome = self.observer.exit(node, self.context);
        self.forward(outcome)
    }
}

fn to_message(entry: &RuleEntry, report: Report, source: &SourceCode<'_>) -> Message {
    let severity = entry.severity.or(report.severity).unwrap_or_default();
    let message = Message::new(
        entry.rule_id.as_str(),
        report.message,
        report.index,
        source.position(report.index),
    )
    .with_severity(severity);

    match report.fix {
        Some(fix) => message.with_fix(fix),
        None => message,
    }
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
