use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tidybuild::{ColorMode, LogLevel};

/// tidybuild - friendly terminal reports for bundler compile events
#[derive(Parser, Debug)]
#[command(name = "tidybuild")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Host events are newline-delimited JSON, e.g. {\"event\":\"invalid\"} or {\"event\":\"done\",\"stats\":{...}}."
)]
pub struct Cli {
    /// Emit NDJSON report events instead of terminal output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    /// Config file (default: ./tidybuild.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Follow host compiler events and report every build
    Listen {
        /// Read events from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Keep previous output instead of clearing the console
        #[arg(long)]
        no_clear: bool,

        /// Minimum level of messages to print
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },

    /// Report a single build result (exits 1 when it has errors)
    Report {
        /// JSON file holding one build result or an array of them
        file: PathBuf,

        /// Minimum level of messages to print
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,
    },

    /// Print the effective configuration
    Config,
}
