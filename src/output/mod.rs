//! Report rendering
//!
//! The notifier decides *what* happened; a `Reporter` decides how it looks.
//!
//! - `human` - terminal output with badges, colors and console clearing
//! - `json` - NDJSON report events for CI and editor integrations

mod human;
mod json;

use std::io;
use std::time::Duration;

use crate::config::SuccessInfo;
use crate::models::{Problem, Severity};
use crate::theme::Palette;

pub use human::TerminalReporter;
pub use json::{JsonReporter, ReportEvent};

/// Payload of a successful compile
#[derive(Debug, Clone, Copy)]
pub struct SuccessSummary<'a> {
    /// `None` when the host did not report timestamps
    pub elapsed: Option<Duration>,
    pub info: &'a SuccessInfo,
}

impl SuccessSummary<'_> {
    pub fn subtitle(&self) -> String {
        match self.elapsed {
            Some(elapsed) => format!("Compiled successfully in {}ms", elapsed.as_millis()),
            None => "Compiled successfully".to_string(),
        }
    }
}

/// Payload of a compile with errors or warnings
#[derive(Debug, Clone, Copy)]
pub struct ProblemReport<'a> {
    pub severity: Severity,
    /// Problems of the highest priority, after transformation
    pub problems: &'a [Problem],
    /// Formatter output for `problems`
    pub lines: &'a [String],
}

impl ProblemReport<'_> {
    pub fn subtitle(&self) -> String {
        let count = self.problems.len();
        let noun = if count == 1 {
            self.severity.as_str().to_string()
        } else {
            format!("{}s", self.severity.as_str())
        };
        match self.severity {
            Severity::Error => format!("Failed to compile with {count} {noun}"),
            Severity::Warning => format!("Compiled with {count} {noun}"),
        }
    }
}

/// Receives compile notifications and renders them.
pub trait Reporter {
    /// A build started (or was invalidated by a file change).
    fn compiling(&mut self) -> io::Result<()>;

    /// A build finished without errors or warnings.
    fn compiled(&mut self, summary: &SuccessSummary<'_>) -> io::Result<()>;

    /// A build finished with errors or warnings.
    fn problems(&mut self, report: &ProblemReport<'_>) -> io::Result<()>;

    /// Wipe previous output before a new report.
    fn clear_console(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Styling used by formatters for this reporter's output.
    fn palette(&self) -> Palette {
        Palette::plain()
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn compiling(&mut self) -> io::Result<()> {
        (**self).compiling()
    }

    fn compiled(&mut self, summary: &SuccessSummary<'_>) -> io::Result<()> {
        (**self).compiled(summary)
    }

    fn problems(&mut self, report: &ProblemReport<'_>) -> io::Result<()> {
        (**self).problems(report)
    }

    fn clear_console(&mut self) -> io::Result<()> {
        (**self).clear_console()
    }

    fn palette(&self) -> Palette {
        (**self).palette()
    }
}
