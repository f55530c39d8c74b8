//! Kernel orchestrator.

use std::panic::{self, AssertUnwindSafe};

use blake3::Hash;
use tracing::{debug, warn};

use fudelint_ast::AstArena;
use fudelint_plugin::{ParseError, Processor, SourceCode};

use crate::fixer::reconcile;
use crate::processor::select_processor;
use crate::runner::{RankedMessage, RuleRunner, panic_message};
use crate::{FixResult, KernelConfig, KernelError, KernelOptions, LintResult};

/// The linting kernel.
///
/// Holds no state besides its [`KernelConfig`]; every call builds its
/// processor and rule contexts from the [`KernelOptions`] it is given.
/// Calls may run concurrently on one kernel.
///
/// # Example
///
/// ```rust,ignore
/// use fudelint_core::{Kernel, KernelOptions, PluginEntry, RuleEntry};
/// use fudelint_parser::MarkdownPlugin;
///
/// let kernel = Kernel::default();
/// let options = KernelOptions::new(".md")
///     .with_file_path("README.md")
///     .with_plugin(PluginEntry::new("markdown", MarkdownPlugin))
///     .with_rule(RuleEntry::new("no-todo", NoTodo));
///
/// let result = kernel.lint_text("TODO: write docs", &options).await?;
/// assert_eq!(result.messages.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: KernelConfig,
}

impl Kernel {
    /// Creates a kernel with the given configuration.
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    /// Returns the kernel configuration.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Lints `text` in a single pass.
    pub async fn lint_text(
        &self,
        text: &str,
        options: &KernelOptions,
    ) -> Result<LintResult, KernelError> {
        let processor = self.prepare(options)?;
        let messages = self.lint_pass(text, processor.as_ref(), options).await?;

        Ok(LintResult {
            file_path: options.file_path.clone(),
            messages: into_messages(messages),
        })
    }

    /// Lints `text`, applies fixes and re-lints until no fix applies.
    ///
    /// Stops early, without error, after `max_fix_passes` fix passes or
    /// when a pass reproduces text seen before. The returned messages are
    /// always those of a lint pass over the returned output.
    pub async fn fix_text(
        &self,
        text: &str,
        options: &KernelOptions,
    ) -> Result<FixResult, KernelError> {
        let processor = self.prepare(options)?;
        let processor = processor.as_ref();

        let mut output = text.to_string();
        let mut applied = Vec::new();
        let mut history: Vec<Hash> = vec![hash_text(&output)];
        let mut messages = self.lint_pass(&output, processor, options).await?;
        let mut passes = 0;

        while messages.iter().any(|m| m.message.fix.is_some()) {
            if passes == self.config.max_fix_passes {
                warn!(
                    file = %options.file_path,
                    passes,
                    "Fix pass limit reached, returning current text"
                );
                break;
            }
            passes += 1;

            let reconciliation = reconcile(&output, messages, processor)?;
            debug!(
                pass = passes,
                applied = reconciliation.applied.len(),
                skipped = reconciliation.remaining.len(),
                "Fix pass"
            );
            output = reconciliation.output;
            applied.extend(reconciliation.applied);

            messages = self.lint_pass(&output, processor, options).await?;

            let current = hash_text(&output);
            if let Some(prev) = history.iter().position(|h| *h == current) {
                warn!(
                    file = %options.file_path,
                    cycle_length = history.len() - prev,
                    "Fix cycle detected, returning current text"
                );
                break;
            }
            history.push(current);
        }

        Ok(FixResult {
            file_path: options.file_path.clone(),
            output,
            messages: into_messages(messages),
            applied,
        })
    }

    /// Validates the options and selects the processor.
    fn prepare(&self, options: &KernelOptions) -> Result<Box<dyn Processor>, KernelError> {
        self.config.validate()?;
        options.validate()?;
        select_processor(options)
    }

    /// One pass: parse, then run every rule.
    ///
    /// A panicking processor fails the pass with [`ParseError::Internal`].
    async fn lint_pass(
        &self,
        text: &str,
        processor: &dyn Processor,
        options: &KernelOptions,
    ) -> Result<Vec<RankedMessage>, KernelError> {
        let arena = AstArena::with_capacity(text.len());
        let parsed = panic::catch_unwind(AssertUnwindSafe(|| processor.parse(&arena, text)))
            .unwrap_or_else(|payload| {
                let err = ParseError::internal(panic_message(payload));
                warn!(processor = processor.name(), error = %err, "Processor panicked");
                Err(err)
            });
        let root = parsed.map_err(|e| KernelError::parse(processor.name(), e))?;
        let source = SourceCode::new(text);

        debug!(
            processor = processor.name(),
            nodes = root.descendant_count(),
            rules = options.rules.len(),
            "Lint pass"
        );

        RuleRunner::new(options, self.config.dedupe_messages)
            .run(&root, &source)
            .await
    }
}

fn hash_text(text: &str) -> Hash {
    blake3::hash(text.as_bytes())
}

fn into_messages(messages: Vec<RankedMessage>) -> Vec<fudelint_plugin::Message> {
    messages.into_iter().map(|m| m.message).collect()
}
