//! Compilation outcome aggregation
//!
//! Turns whatever the host delivered on `done` (one result or one per
//! project) into a single `Aggregate`: elapsed time plus error/warning flags.
//! Nothing is remembered between calls.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{BuildResult, Problem, Severity};

/// Payload of a `done` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildOutcome {
    /// Multi-project build (parallel configurations)
    Multi(Vec<BuildResult>),
    Single(BuildResult),
}

impl BuildOutcome {
    /// Per-project results, regardless of shape
    pub fn projects(&self) -> &[BuildResult] {
        match self {
            BuildOutcome::Single(result) => std::slice::from_ref(result),
            BuildOutcome::Multi(results) => results,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.projects().iter().any(BuildResult::has_errors)
    }

    pub fn has_warnings(&self) -> bool {
        self.projects().iter().any(BuildResult::has_warnings)
    }

    /// Problems of one severity across all projects, deduplicated by message.
    ///
    /// Within a project, children are only consulted when the parent
    /// reported nothing itself.
    pub fn problems(&self, severity: Severity) -> Vec<Problem> {
        let mut collected: Vec<Problem> = Vec::new();
        for project in self.projects() {
            collect_problems(project, severity, &mut collected);
        }
        dedupe_by_message(collected)
    }
}

impl From<BuildResult> for BuildOutcome {
    fn from(result: BuildResult) -> Self {
        BuildOutcome::Single(result)
    }
}

impl From<Vec<BuildResult>> for BuildOutcome {
    fn from(results: Vec<BuildResult>) -> Self {
        BuildOutcome::Multi(results)
    }
}

fn collect_problems(result: &BuildResult, severity: Severity, out: &mut Vec<Problem>) {
    let own = result.problems(severity);
    if !own.is_empty() {
        out.extend(own.iter().cloned());
        return;
    }
    for child in &result.children {
        collect_problems(child, severity, out);
    }
}

fn dedupe_by_message(problems: Vec<Problem>) -> Vec<Problem> {
    let mut seen = std::collections::HashSet::new();
    problems
        .into_iter()
        .filter(|p| seen.insert(p.message.clone()))
        .collect()
}

/// Time window covered by one project, children included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileSpan {
    pub start: u64,
    pub end: u64,
}

impl CompileSpan {
    /// Span of `result` and all its descendants; `None` when no node in the
    /// subtree carries both timestamps.
    pub fn of(result: &BuildResult) -> Option<Self> {
        let mut span: Option<CompileSpan> = None;
        widen(result, &mut span);
        span
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.end.saturating_sub(self.start))
    }
}

fn widen(result: &BuildResult, span: &mut Option<CompileSpan>) {
    if let (Some(start), Some(end)) = (result.start_time, result.end_time) {
        *span = Some(match *span {
            None => CompileSpan { start, end },
            Some(s) => CompileSpan {
                start: s.start.min(start),
                end: s.end.max(end),
            },
        });
    }
    for child in &result.children {
        widen(child, span);
    }
}

/// Elapsed time of the current build cycle.
///
/// Projects run in parallel, so the longest span wins. In watch mode the host
/// re-delivers the last result of projects that did not rebuild; such a span
/// ended before the most recent project started and is left out.
pub fn compile_time(outcome: &BuildOutcome) -> Option<Duration> {
    let spans: Vec<CompileSpan> = outcome.projects().iter().filter_map(CompileSpan::of).collect();
    let latest_start = spans.iter().map(|s| s.start).max()?;

    spans
        .iter()
        .filter(|s| s.end >= latest_start || s.start == latest_start)
        .map(CompileSpan::duration)
        .max()
}

/// Derived summary of one `done` event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    /// `None` when no result carried timestamps
    pub elapsed: Option<Duration>,
    pub has_errors: bool,
    pub has_warnings: bool,
}

impl Aggregate {
    pub fn of(outcome: &BuildOutcome) -> Self {
        Self {
            elapsed: compile_time(outcome),
            has_errors: outcome.has_errors(),
            has_warnings: outcome.has_warnings(),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.has_errors && !self.has_warnings
    }

    /// Severity to report: errors take precedence over warnings
    pub fn severity(&self) -> Option<Severity> {
        if self.has_errors {
            Some(Severity::Error)
        } else if self.has_warnings {
            Some(Severity::Warning)
        } else {
            None
        }
    }

    pub fn elapsed_ms(&self) -> Option<u128> {
        self.elapsed.map(|d| d.as_millis())
    }
}
