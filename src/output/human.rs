use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::config::LogLevel;
use crate::models::Severity;
use crate::terminal::TerminalCapabilities;
use crate::theme::{badges, Palette, Tone};

use super::{ProblemReport, Reporter, SuccessSummary};

/// Human-readable reporter writing badge titles and formatter output.
///
/// Every title is followed by a blank line. On a colored TTY the title also
/// carries the local time, right-aligned.
#[derive(Debug)]
pub struct TerminalReporter<W: Write> {
    out: W,
    palette: Palette,
    log_level: LogLevel,
    caps: TerminalCapabilities,
}

impl<W: Write> TerminalReporter<W> {
    pub fn new(out: W, caps: TerminalCapabilities, color: bool, log_level: LogLevel) -> Self {
        Self {
            out,
            palette: Palette::new(color),
            log_level,
            caps,
        }
    }

    /// Uncolored, non-TTY reporter; what tests and pipes see.
    pub fn plain(out: W) -> Self {
        Self::new(out, TerminalCapabilities::piped(), false, LogLevel::Info)
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn title(&mut self, tone: Tone, label: &str, subtitle: &str) -> io::Result<()> {
        let mut line = format!(
            "{} {}",
            self.palette.badge(tone, label),
            self.palette.text(tone, subtitle)
        );

        if self.caps.is_tty && self.palette.is_colored() {
            let time = chrono::Local::now().format("%H:%M:%S").to_string();
            // Badge renders as ` LABEL ` on a colored terminal.
            let visible = label.width() + 2 + 1 + subtitle.width();
            let width = usize::from(self.caps.width);
            if visible + time.width() < width {
                let pad = width - visible - time.width();
                line.push_str(&" ".repeat(pad));
                line.push_str(&self.palette.dim(&time));
            }
        }

        writeln!(self.out, "{line}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn badged_line(&mut self, label: &str, message: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}",
            self.palette.badge(Tone::Info, label),
            message
        )
    }
}

fn severity_level(severity: Severity) -> LogLevel {
    match severity {
        Severity::Error => LogLevel::Error,
        Severity::Warning => LogLevel::Warning,
    }
}

impl<W: Write> Reporter for TerminalReporter<W> {
    fn compiling(&mut self) -> io::Result<()> {
        if !self.log_level.allows(LogLevel::Info) {
            return Ok(());
        }
        self.title(Tone::Info, badges::WAIT, "Compiling...")
    }

    fn compiled(&mut self, summary: &SuccessSummary<'_>) -> io::Result<()> {
        if !self.log_level.allows(LogLevel::Info) {
            return Ok(());
        }
        self.title(Tone::Success, badges::DONE, &summary.subtitle())?;

        for message in &summary.info.messages {
            self.badged_line(badges::INFO, message)?;
        }
        if !summary.info.notes.is_empty() {
            writeln!(self.out)?;
            for note in &summary.info.notes {
                self.badged_line(badges::NOTE, note)?;
            }
        }
        self.out.flush()
    }

    fn problems(&mut self, report: &ProblemReport<'_>) -> io::Result<()> {
        if !self.log_level.allows(severity_level(report.severity)) {
            return Ok(());
        }
        self.title(
            Tone::from(report.severity),
            report.severity.title(),
            &report.subtitle(),
        )?;
        for line in report.lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn clear_console(&mut self) -> io::Result<()> {
        if !self.caps.is_tty {
            return Ok(());
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.queue(terminal::Clear(terminal::ClearType::Purge))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.flush()
    }

    fn palette(&self) -> Palette {
        self.palette
    }
}
