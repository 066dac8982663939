pub mod config;
pub mod listen;
pub mod report;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use tidybuild::config::{find_config_file, ConfigWarning};
use tidybuild::terminal::detect_capabilities;
use tidybuild::{Config, JsonReporter, Reporter, TerminalReporter};

/// Resolve the effective configuration: explicit file or discovered file,
/// then `TIDYBUILD_*` environment overrides. CLI flags are applied by the caller.
pub fn load_config(explicit: Option<&Path>, json: bool, verbose: u8) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().ok();
            find_config_file(cwd.as_deref())
        }
    };

    let config = match path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            if !json {
                print_config_warnings(&path, &warnings);
            }
            if verbose > 0 {
                eprintln!("[config] loaded {}", path.display());
            }
            config
        }
        None => {
            if verbose > 0 {
                eprintln!("[config] no config file found, using defaults");
            }
            Config::default()
        }
    };

    Ok(config.with_env_overrides())
}

pub fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}

/// Run `f` with the reporter selected by `--json`, writing to stdout.
pub fn with_reporter<T>(
    config: &Config,
    json: bool,
    f: impl FnOnce(Box<dyn Reporter>) -> Result<T>,
) -> Result<T> {
    if json {
        return f(Box::new(JsonReporter::new(io::stdout())));
    }

    let caps = detect_capabilities();
    let color = caps.use_color(config.color);
    f(Box::new(TerminalReporter::new(
        io::stdout(),
        caps,
        color,
        config.log_level,
    )))
}
