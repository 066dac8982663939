//! tidybuild CLI - friendly terminal reports for bundler compile events
//!
//! Usage: tidybuild <COMMAND>
//!
//! Commands:
//!   listen  Follow host compiler events (NDJSON) and report every build
//!   report  Report a single build result file
//!   config  Print the effective configuration

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::load_config(cli.config.as_deref(), cli.json, cli.verbose)?;
    if let Some(color) = cli.color {
        config.color = color;
    }

    match cli.command {
        Commands::Listen {
            input,
            no_clear,
            log_level,
        } => {
            if no_clear {
                config.clear_console = false;
            }
            if let Some(level) = log_level {
                config.log_level = level;
            }
            commands::listen::cmd_listen(input.as_deref(), &config, cli.json, cli.verbose)
        }
        Commands::Report { file, log_level } => {
            if let Some(level) = log_level {
                config.log_level = level;
            }
            let failed = commands::report::cmd_report(&file, &config, cli.json)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config => commands::config::cmd_config(&config),
    }
}
