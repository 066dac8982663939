//! NDJSON report events.
//!
//! One JSON object per line, tagged by `event`, so CI logs and editor
//! integrations can follow builds without parsing terminal output.

use std::io::{self, Write};

use serde::Serialize;

use crate::models::{Problem, Severity};

use super::{ProblemReport, Reporter, SuccessSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReportEvent<'a> {
    Compiling,
    Compiled {
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    Problems {
        severity: Severity,
        count: usize,
        problems: &'a [Problem],
    },
}

impl ReportEvent<'_> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Writes one `ReportEvent` per notification.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, event: &ReportEvent<'_>) -> io::Result<()> {
        self.out.write_all(event.to_json().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn compiling(&mut self) -> io::Result<()> {
        self.emit(&ReportEvent::Compiling)
    }

    fn compiled(&mut self, summary: &SuccessSummary<'_>) -> io::Result<()> {
        let duration_ms = summary
            .elapsed
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self.emit(&ReportEvent::Compiled { duration_ms })
    }

    fn problems(&mut self, report: &ProblemReport<'_>) -> io::Result<()> {
        self.emit(&ReportEvent::Problems {
            severity: report.severity,
            count: report.problems.len(),
            problems: report.problems,
        })
    }
}
