//! Configuration module for tidybuild
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TIDYBUILD_*)
//! 3. Project config (./tidybuild.toml)
//! 4. User config (<config dir>/tidybuild/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{find_config_file, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{ColorMode, Config, LogLevel, SuccessInfo};
