//! Core data models for tidybuild
//!
//! A `BuildResult` is one compiler run as reported by the host bundler:
//! timestamps, problems, and nested child compilations.

use serde::{Deserialize, Serialize};

/// Severity of a problem report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Lowercase label used inside badges and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Uppercase label used in report titles
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification assigned by transformers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    #[default]
    Unclassified,
    SyntaxError,
    ModuleNotFound {
        module: String,
    },
    Lint,
}

/// One error or warning descriptor emitted by the host build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Dependency chain that led to the failing module, outermost last
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origin: Vec<String>,
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    /// Transformer-assigned priority; only the highest priority is reported
    #[serde(skip)]
    pub priority: u32,
}

impl Problem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            name: None,
            origin: Vec::new(),
            kind: ProblemKind::Unclassified,
            priority: 0,
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin.push(origin.into());
        self
    }

    /// True when the host reported this problem under the given error name
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

// Hosts send problems either as bare message strings or as objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProblemDe {
    Message(String),
    Detailed {
        message: String,
        #[serde(default)]
        file: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        origin: Option<OriginDe>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginDe {
    Text(String),
    Lines(Vec<String>),
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match ProblemDe::deserialize(deserializer)? {
            ProblemDe::Message(message) => Ok(Problem::new(message)),
            ProblemDe::Detailed {
                message,
                file,
                name,
                origin,
            } => {
                let origin = match origin {
                    None => Vec::new(),
                    Some(OriginDe::Text(text)) => text.lines().map(str::to_string).collect(),
                    Some(OriginDe::Lines(lines)) => lines,
                };
                Ok(Problem {
                    message,
                    file,
                    name,
                    origin,
                    kind: ProblemKind::Unclassified,
                    priority: 0,
                })
            }
        }
    }
}

/// One compiler run's outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    /// Project label for multi-project builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Wall-clock start in milliseconds
    #[serde(default)]
    pub start_time: Option<u64>,
    /// Wall-clock end in milliseconds
    #[serde(default)]
    pub end_time: Option<u64>,
    #[serde(default)]
    pub errors: Vec<Problem>,
    #[serde(default)]
    pub warnings: Vec<Problem>,
    /// Child compilations (e.g. html or worker compilations)
    #[serde(default)]
    pub children: Vec<BuildResult>,
}

impl BuildResult {
    /// A clean result spanning `start..end` milliseconds
    pub fn timed(start: u64, end: u64) -> Self {
        Self {
            start_time: Some(start),
            end_time: Some(end),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_error(mut self, problem: Problem) -> Self {
        self.errors.push(problem);
        self
    }

    pub fn with_warning(mut self, problem: Problem) -> Self {
        self.warnings.push(problem);
        self
    }

    pub fn with_child(mut self, child: BuildResult) -> Self {
        self.children.push(child);
        self
    }

    /// Problems of one severity reported directly on this result
    pub fn problems(&self, severity: Severity) -> &[Problem] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
        }
    }

    /// True when this result or any descendant has errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.children.iter().any(BuildResult::has_errors)
    }

    /// True when this result or any descendant has warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty() || self.children.iter().any(BuildResult::has_warnings)
    }
}
