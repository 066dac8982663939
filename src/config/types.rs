//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TidyResult;

use super::loader::{self, ConfigWarning};

/// Color output mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Minimum level of messages that reach the terminal
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Silent,
    Error,
    Warning,
    #[default]
    Info,
}

impl LogLevel {
    /// True when a message at `level` should be printed under this threshold
    pub fn allows(&self, level: LogLevel) -> bool {
        level != LogLevel::Silent && level <= *self
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "silent" => Some(LogLevel::Silent),
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            _ => None,
        }
    }
}

/// Extra lines printed below a successful compile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SuccessInfo {
    #[serde(default)]
    pub messages: Vec<String>,

    #[serde(default)]
    pub notes: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_true")]
    pub clear_console: bool,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub color: ColorMode,

    /// Command suggested for missing dependencies
    #[serde(default = "default_install_command")]
    pub install_command: String,

    #[serde(default)]
    pub success: SuccessInfo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clear_console: true,
            log_level: LogLevel::default(),
            color: ColorMode::default(),
            install_command: default_install_command(),
            success: SuccessInfo::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_install_command() -> String {
    "npm install --save".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TidyResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> TidyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (TIDYBUILD_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Render as TOML for `tidybuild config`
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
