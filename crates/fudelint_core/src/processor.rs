//! Processor selection.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use fudelint_plugin::{PluginError, Processor};

use crate::runner::panic_message;
use crate::{KernelError, KernelOptions, PluginEntry};

/// Builds the processor for `options.ext`.
///
/// Plugins are asked in configuration order. A plugin matches when it
/// declares the extension statically or its processor reports support for
/// it; the first match wins.
///
/// A plugin that does not declare the extension is only probed through
/// its processor, so failing to build one skips it. The declaring
/// plugin's failure aborts the call.
pub(crate) fn select_processor(options: &KernelOptions) -> Result<Box<dyn Processor>, KernelError> {
    let ext = options.ext.as_str();

    for entry in &options.plugins {
        let declared = entry.plugin.declares(ext);
        let processor = match create_processor(entry) {
            Ok(processor) => processor,
            Err(err) if declared => return Err(KernelError::plugin(&entry.plugin_id, err)),
            Err(err) => {
                warn!(
                    plugin = %entry.plugin_id,
                    ext,
                    error = %err,
                    "Skipping plugin that failed to build its processor"
                );
                continue;
            }
        };

        if declared || processor.supports(ext) {
            debug!(
                plugin = %entry.plugin_id,
                processor = processor.name(),
                ext,
                "Selected processor"
            );
            return Ok(processor);
        }
    }

    Err(KernelError::no_matching_processor(ext))
}

fn create_processor(entry: &PluginEntry) -> Result<Box<dyn Processor>, PluginError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        entry.plugin.create_processor(entry.options.as_ref())
    }))
    .unwrap_or_else(|payload| Err(PluginError::internal(panic_message(payload))))
}
