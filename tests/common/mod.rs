//! Common test utilities for tidybuild integration tests.
//!
//! - `Recording`: a reporter that records every notification
//! - `plain_lines`: run a notifier over a plain terminal buffer
//! - Fixtures: host problem payloads as bundlers emit them

#![allow(dead_code)]

use std::io;

use tidybuild::output::{ProblemReport, SuccessSummary};
use tidybuild::{BuildOutcome, BuildResult, Notifier, Problem, Reporter, Severity, TerminalReporter};

/// One recorded reporter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Clear,
    Compiling,
    Compiled(String),
    Problems(Severity, usize),
}

#[derive(Debug, Default)]
pub struct Recording {
    pub calls: Vec<Call>,
}

impl Recording {
    pub fn clears(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Clear).count()
    }

    /// Calls other than console clears
    pub fn reports(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| **c != Call::Clear)
            .cloned()
            .collect()
    }
}

impl Reporter for Recording {
    fn compiling(&mut self) -> io::Result<()> {
        self.calls.push(Call::Compiling);
        Ok(())
    }

    fn compiled(&mut self, summary: &SuccessSummary<'_>) -> io::Result<()> {
        self.calls.push(Call::Compiled(summary.subtitle()));
        Ok(())
    }

    fn problems(&mut self, report: &ProblemReport<'_>) -> io::Result<()> {
        self.calls
            .push(Call::Problems(report.severity, report.problems.len()));
        Ok(())
    }

    fn clear_console(&mut self) -> io::Result<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }
}

/// Output lines of a plain terminal notifier.
pub fn lines(notifier: &Notifier<TerminalReporter<Vec<u8>>>) -> Vec<String> {
    String::from_utf8_lossy(notifier.reporter().get_ref())
        .lines()
        .map(str::to_string)
        .collect()
}

/// Report one `done` event on a fresh plain notifier.
pub fn report_done(outcome: impl Into<BuildOutcome>) -> Vec<String> {
    let mut notifier = Notifier::new(TerminalReporter::plain(Vec::new()));
    notifier.on_done(&outcome.into()).unwrap();
    lines(&notifier)
}

pub fn syntax_error(file: &str) -> Problem {
    Problem::new(
        "Module build failed (from ./node_modules/babel-loader/lib/index.js):\n\
         SyntaxError: /app/src/App.js: Unexpected token (3:4)\n\
         \x20   at Parser.raise (/app/node_modules/@babel/parser/lib/index.js:6344:17)",
    )
    .named("ModuleBuildError")
    .in_file(file)
}

pub fn module_not_found(module: &str, file: &str) -> Problem {
    Problem::new(format!(
        "Module not found: Error: Can't resolve '{module}' in '{file}'"
    ))
    .named("ModuleNotFoundError")
    .in_file(file)
}

pub fn lint_warning(message: &str) -> Problem {
    Problem::new(message).named("LintError")
}

pub fn failed(start: u64, end: u64, problem: Problem) -> BuildResult {
    BuildResult::timed(start, end).with_error(problem)
}

/// `tidybuild` binary isolated from the caller's config and environment.
pub fn tidybuild_cmd(dir: &std::path::Path) -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_tidybuild"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("TIDYBUILD_CLEAR_CONSOLE")
        .env_remove("TIDYBUILD_LOG_LEVEL")
        .env_remove("TIDYBUILD_COLOR");
    cmd
}
