use crossterm::style::{Color, Stylize};

use crate::models::Severity;

/// Design tokens for tidybuild terminal output.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All badge labels must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #3B82F6
    pub const INFO: Color = Color::Blue;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod badges {
    pub const DONE: &str = "DONE";
    pub const WAIT: &str = "WAIT";
    pub const INFO: &str = "I";
    pub const NOTE: &str = "N";
}

/// Semantic tone of a badge or text span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => colors::SUCCESS,
            Tone::Info => colors::INFO,
            Tone::Warning => colors::WARNING,
            Tone::Error => colors::ERROR,
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Error,
        }
    }
}

/// Styling handle passed to formatters; renders plain text when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Padded, background-filled label such as ` DONE `.
    ///
    /// Without color the padding is dropped and the label is followed by one
    /// extra space, so `badge + " " + text` reads `DONE  text` either way.
    pub fn badge(&self, tone: Tone, label: &str) -> String {
        if !self.color {
            return format!("{label} ");
        }
        format!(
            "{}",
            format!(" {label} ").with(Color::Black).on(tone.color())
        )
    }

    pub fn text(&self, tone: Tone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{}", text.with(tone.color()))
    }

    pub fn dim(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("{}", text.with(colors::DIM))
    }

    pub fn highlight(&self, text: &str) -> String {
        self.text(Tone::Warning, text)
    }
}
