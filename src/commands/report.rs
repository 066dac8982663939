use std::path::Path;

use anyhow::{Context, Result};

use tidybuild::{BuildOutcome, Config, Notifier, NotifierOptions, TidyError};

/// Report one build result file. Returns `true` when the build had errors.
pub fn cmd_report(file: &Path, config: &Config, json: bool) -> Result<bool> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let outcome: BuildOutcome =
        serde_json::from_str(&content).map_err(|e| TidyError::InvalidPayload {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;

    let options = NotifierOptions {
        // One-shot report; nothing to clear.
        clear_console: false,
        ..NotifierOptions::from(config)
    };

    super::with_reporter(config, json, |reporter| {
        let mut notifier = Notifier::with_options(reporter, options);
        let aggregate = notifier.on_done(&outcome)?;
        Ok(aggregate.has_errors)
    })
}
