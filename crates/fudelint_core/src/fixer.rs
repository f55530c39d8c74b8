//! Fix reconciliation: picks non-overlapping fixes and applies them.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use fudelint_plugin::{Fix, Message, ParseError, Processor};

use crate::KernelError;
use crate::runner::{RankedMessage, panic_message};

/// Outcome of reconciling one pass.
#[derive(Debug)]
pub(crate) struct Reconciliation {
    /// Text with the accepted fixes applied.
    pub output: String,
    /// Messages whose fixes were applied, in application order.
    pub applied: Vec<Message>,
    /// Messages without a fix or with a rejected fix, in pass order.
    pub remaining: Vec<Message>,
}

/// Applies as many fixes from `messages` as possible without overlap.
///
/// Candidates are taken by ascending range start, ties broken by rule
/// order and then report sequence. A candidate is accepted when it starts
/// at or after the end of the previously accepted fix, so zero-width
/// insertions at one offset all apply in that order. Ranges reaching past
/// the end of `text` are clamped to it.
///
/// A processor panicking while applying fixes fails with
/// [`KernelError::Parse`].
pub(crate) fn reconcile(
    text: &str,
    messages: Vec<RankedMessage>,
    processor: &dyn Processor,
) -> Result<Reconciliation, KernelError> {
    let len = text.len() as u32;
    let mut candidates: Vec<(usize, Fix)> = messages
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.message.fix.as_ref().map(|fix| (i, clamp(fix, len))))
        .collect();
    candidates.sort_by_key(|(i, fix)| (fix.start(), messages[*i].rule_order, messages[*i].seq));

    let mut accepted = Vec::with_capacity(candidates.len());
    let mut fixes = Vec::with_capacity(candidates.len());
    let mut last_end: Option<u32> = None;
    for (i, fix) in candidates {
        if last_end.is_none_or(|end| fix.start() >= end) {
            last_end = Some(fix.end());
            accepted.push(i);
            fixes.push(fix);
        } else {
            debug!(
                rule = %messages[i].message.rule_id,
                start = fix.start(),
                end = fix.end(),
                "Skipping overlapping fix"
            );
        }
    }

    if accepted.is_empty() {
        return Ok(Reconciliation {
            output: text.to_string(),
            applied: Vec::new(),
            remaining: messages.into_iter().map(|m| m.message).collect(),
        });
    }

    let fixes: Vec<&Fix> = fixes.iter().collect();
    let custom = panic::catch_unwind(AssertUnwindSafe(|| processor.apply_fixes(text, &fixes)))
        .map_err(|payload| {
            let err = ParseError::internal(panic_message(payload));
            warn!(processor = processor.name(), error = %err, "Processor panicked applying fixes");
            KernelError::parse(processor.name(), err)
        })?;
    let output = match custom {
        Some(output) => output,
        None => splice(text, &fixes),
    };
    debug!(applied = fixes.len(), "Applied fixes");

    let mut slots: Vec<Option<Message>> = messages.into_iter().map(|m| Some(m.message)).collect();
    let applied = accepted
        .iter()
        .filter_map(|&i| slots[i].take())
        .collect();
    let remaining = slots.into_iter().flatten().collect();

    Ok(Reconciliation {
        output,
        applied,
        remaining,
    })
}

fn clamp(fix: &Fix, len: u32) -> Fix {
    let [start, end] = fix.range;
    Fix {
        range: [start.min(len), end.min(len)],
        text: fix.text.clone(),
    }
}

/// Replaces each fix's range in one linear walk over `text`.
///
/// `fixes` must be sorted, non-overlapping and on char boundaries, which
/// the rule context guarantees for every reported fix.
pub(crate) fn splice(text: &str, fixes: &[&Fix]) -> String {
    let extra: usize = fixes.iter().map(|f| f.text.len()).sum();
    let mut output = String::with_capacity(text.len() + extra);
    let mut cursor = 0;

    for fix in fixes {
        let start = fix.start() as usize;
        let end = fix.end() as usize;
        output.push_str(&text[cursor..start]);
        output.push_str(&fix.text);
        cursor = end;
    }
    output.push_str(&text[cursor..]);

    output
}
