//! The notifier plugin
//!
//! `Notifier` subscribes to a host compiler's `invalid` and `done` hooks and
//! turns each event into exactly one reporter call:
//!
//! - `invalid` → `compiling`
//! - `done` without problems → `compiled` with the elapsed time
//! - `done` with errors (or, failing that, warnings) → `problems`

use std::cell::RefCell;
use std::rc::Rc;

use crate::compiler::Compiler;
use crate::config::{Config, SuccessInfo};
use crate::error::TidyResult;
use crate::format::{default_formatters, format_problems, Formatter};
use crate::models::{Problem, Severity};
use crate::output::{ProblemReport, Reporter, SuccessSummary};
use crate::stats::{Aggregate, BuildOutcome};
use crate::transform::{default_transformers, process_problems, Transformer};

/// Name under which the notifier taps host hooks
pub const PLUGIN_NAME: &str = "tidybuild";

pub type ProblemsCallback = Box<dyn FnMut(Severity, &[Problem])>;

/// Notifier options; see `Config` for the file/env equivalents.
pub struct NotifierOptions {
    pub clear_console: bool,
    pub success: SuccessInfo,
    /// Run after the built-in transformers
    pub additional_transformers: Vec<Box<dyn Transformer>>,
    /// Run after the built-in formatters
    pub additional_formatters: Vec<Box<dyn Formatter>>,
    /// Called with the reported problems after every problem report
    pub on_errors: Option<ProblemsCallback>,
    pub install_command: String,
}

impl Default for NotifierOptions {
    fn default() -> Self {
        Self {
            clear_console: true,
            success: SuccessInfo::default(),
            additional_transformers: Vec::new(),
            additional_formatters: Vec::new(),
            on_errors: None,
            install_command: Config::default().install_command,
        }
    }
}

impl From<&Config> for NotifierOptions {
    fn from(config: &Config) -> Self {
        Self {
            clear_console: config.clear_console,
            success: config.success.clone(),
            install_command: config.install_command.clone(),
            ..Self::default()
        }
    }
}

/// Where the host is in its compile cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Compiling,
}

pub struct Notifier<R: Reporter> {
    reporter: R,
    clear_console: bool,
    success: SuccessInfo,
    transformers: Vec<Box<dyn Transformer>>,
    formatters: Vec<Box<dyn Formatter>>,
    on_errors: Option<ProblemsCallback>,
    phase: Phase,
}

impl<R: Reporter> Notifier<R> {
    pub fn new(reporter: R) -> Self {
        Self::with_options(reporter, NotifierOptions::default())
    }

    pub fn with_options(reporter: R, options: NotifierOptions) -> Self {
        let mut transformers = default_transformers();
        transformers.extend(options.additional_transformers);
        let mut formatters = default_formatters(&options.install_command);
        formatters.extend(options.additional_formatters);

        Self {
            reporter,
            clear_console: options.clear_console,
            success: options.success,
            transformers,
            formatters,
            on_errors: options.on_errors,
            phase: Phase::Idle,
        }
    }

    pub fn should_clear_console(&self) -> bool {
        self.clear_console
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    fn clear(&mut self) -> TidyResult<()> {
        if self.clear_console {
            self.reporter.clear_console()?;
        }
        Ok(())
    }

    /// A build started or was invalidated.
    pub fn on_invalid(&mut self) -> TidyResult<()> {
        self.phase = Phase::Compiling;
        self.clear()?;
        self.reporter.compiling()?;
        Ok(())
    }

    /// A build finished; report it and return to idle.
    ///
    /// Returns the aggregate so callers can derive exit codes.
    pub fn on_done(&mut self, outcome: &BuildOutcome) -> TidyResult<Aggregate> {
        self.phase = Phase::Idle;
        self.clear()?;

        let aggregate = Aggregate::of(outcome);
        match aggregate.severity() {
            None => {
                self.reporter.compiled(&SuccessSummary {
                    elapsed: aggregate.elapsed,
                    info: &self.success,
                })?;
            }
            Some(severity) => self.report_problems(outcome, severity)?,
        }
        Ok(aggregate)
    }

    fn report_problems(&mut self, outcome: &BuildOutcome, severity: Severity) -> TidyResult<()> {
        let problems = process_problems(outcome.problems(severity), &self.transformers);
        let lines = format_problems(
            &self.formatters,
            &problems,
            severity,
            self.reporter.palette(),
        );

        self.reporter.problems(&ProblemReport {
            severity,
            problems: &problems,
            lines: &lines,
        })?;

        if let Some(callback) = self.on_errors.as_mut() {
            callback(severity, &problems);
        }
        Ok(())
    }
}

impl<R: Reporter + 'static> Notifier<R> {
    /// Subscribe a shared notifier to `compiler`'s `invalid` and `done` hooks.
    pub fn apply<C: Compiler + ?Sized>(this: &Rc<RefCell<Self>>, compiler: &mut C) {
        let on_invalid = Rc::clone(this);
        compiler.tap_invalid(
            PLUGIN_NAME,
            Box::new(move || on_invalid.borrow_mut().on_invalid()),
        );

        let on_done = Rc::clone(this);
        compiler.tap_done(
            PLUGIN_NAME,
            Box::new(move |outcome: &BuildOutcome| {
                on_done.borrow_mut().on_done(outcome).map(|_| ())
            }),
        );
    }

    /// Wrap in `Rc<RefCell<_>>`, subscribe, and hand back the shared notifier.
    pub fn attach<C: Compiler + ?Sized>(self, compiler: &mut C) -> Rc<RefCell<Self>> {
        let shared = Rc::new(RefCell::new(self));
        Self::apply(&shared, compiler);
        shared
    }
}
