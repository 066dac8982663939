//! tidybuild - friendly terminal reports for bundler compile events
//!
//! tidybuild subscribes to a host bundler's `invalid` and `done` lifecycle
//! hooks and prints one concise report per build: a `DONE` line with the
//! elapsed time, or the most relevant errors/warnings grouped and cleaned of
//! stack-trace noise.

pub mod compiler;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod models;
pub mod output;
pub mod plugin;
pub mod stats;
pub mod terminal;
pub mod theme;
pub mod transform;

// Re-exports for convenience
pub use compiler::{Compiler, EventCompiler};
pub use config::{ColorMode, Config, LogLevel};
pub use error::{TidyError, TidyResult};
pub use events::{EventStream, HostEvent};
pub use models::{BuildResult, Problem, ProblemKind, Severity};
pub use output::{JsonReporter, Reporter, TerminalReporter};
pub use plugin::{Notifier, NotifierOptions, Phase};
pub use stats::{compile_time, Aggregate, BuildOutcome};
