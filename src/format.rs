//! Problem formatters
//!
//! Formatters turn the problems that survived transformation into output
//! lines. Every formatter sees the full list and picks the kinds it handles;
//! the notifier concatenates their outputs in order.

use crate::models::{Problem, ProblemKind, Severity};
use crate::theme::{Palette, Tone};

pub trait Formatter {
    fn format(&self, problems: &[Problem], severity: Severity, palette: Palette) -> Vec<String>;
}

/// Groups unresolved imports and suggests an install command.
#[derive(Debug, Clone)]
pub struct ModuleNotFoundFormatter {
    install_command: String,
}

impl ModuleNotFoundFormatter {
    pub fn new(install_command: impl Into<String>) -> Self {
        Self {
            install_command: install_command.into(),
        }
    }
}

impl Default for ModuleNotFoundFormatter {
    fn default() -> Self {
        Self::new("npm install --save")
    }
}

struct ModuleGroup<'a> {
    module: &'a str,
    files: Vec<&'a str>,
}

impl ModuleGroup<'_> {
    fn is_relative(&self) -> bool {
        self.module.starts_with("./") || self.module.starts_with("../")
    }

    fn render(&self) -> String {
        format!("* {}{}", self.module, format_file_list(&self.files))
    }
}

fn group_by_module(problems: &[Problem]) -> Vec<ModuleGroup<'_>> {
    let mut groups: Vec<ModuleGroup<'_>> = Vec::new();
    for problem in problems {
        let ProblemKind::ModuleNotFound { module } = &problem.kind else {
            continue;
        };
        let idx = match groups.iter().position(|g| g.module == module.as_str()) {
            Some(idx) => idx,
            None => {
                groups.push(ModuleGroup {
                    module,
                    files: Vec::new(),
                });
                groups.len() - 1
            }
        };
        if let Some(file) = problem.file.as_deref() {
            groups[idx].files.push(file);
        }
    }
    groups
}

fn format_file_list(files: &[&str]) -> String {
    match files {
        [] => String::new(),
        [a] => format!(" in {a}"),
        [a, b] => format!(" in {a}, {b}"),
        [a, b, rest @ ..] => {
            let others = if rest.len() == 1 { "other" } else { "others" };
            format!(" in {a}, {b} and {} {others}", rest.len())
        }
    }
}

impl ModuleNotFoundFormatter {
    fn dependencies_not_found(&self, groups: &[&ModuleGroup<'_>]) -> Vec<String> {
        if groups.is_empty() {
            return Vec::new();
        }
        let header = if groups.len() == 1 {
            "This dependency was not found:"
        } else {
            "These dependencies were not found:"
        };
        let modules: Vec<&str> = groups.iter().map(|g| g.module).collect();
        let pronoun = if groups.len() == 1 { "it" } else { "them" };

        let mut lines = vec![header.to_string(), String::new()];
        lines.extend(groups.iter().map(|g| g.render()));
        lines.push(String::new());
        lines.push(format!(
            "To install {pronoun}, you can run: {} {}",
            self.install_command,
            modules.join(" ")
        ));
        lines
    }
}

fn relative_modules_not_found(groups: &[&ModuleGroup<'_>]) -> Vec<String> {
    if groups.is_empty() {
        return Vec::new();
    }
    let header = if groups.len() == 1 {
        "This relative module was not found:"
    } else {
        "These relative modules were not found:"
    };
    let mut lines = vec![header.to_string(), String::new()];
    lines.extend(groups.iter().map(|g| g.render()));
    lines
}

impl Formatter for ModuleNotFoundFormatter {
    fn format(&self, problems: &[Problem], _severity: Severity, _palette: Palette) -> Vec<String> {
        let groups = group_by_module(problems);
        let (relative, dependencies): (Vec<_>, Vec<_>) =
            groups.iter().partition(|g| g.is_relative());

        let mut lines = self.dependencies_not_found(&dependencies);
        if !dependencies.is_empty() && !relative.is_empty() {
            lines.push(String::new());
            lines.push(String::new());
        }
        lines.extend(relative_modules_not_found(&relative));
        lines
    }
}

/// Lists lint messages followed by hints for silencing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LintFormatter;

impl Formatter for LintFormatter {
    fn format(&self, problems: &[Problem], _severity: Severity, palette: Palette) -> Vec<String> {
        let lint: Vec<&Problem> = problems
            .iter()
            .filter(|p| p.kind == ProblemKind::Lint)
            .collect();
        if lint.is_empty() {
            return Vec::new();
        }

        let mut lines: Vec<String> = lint.iter().map(|p| p.message.clone()).collect();
        lines.push("You may use special comments to disable some warnings.".to_string());
        lines.push(format!(
            "Use {} to ignore the next line.",
            palette.highlight("// eslint-disable-next-line")
        ));
        lines.push(format!(
            "Use {} to ignore all warnings in a file.",
            palette.highlight("/* eslint-disable */")
        ));
        lines
    }
}

/// Badge, file, message and origin for anything not handled elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl DefaultFormatter {
    fn handles(problem: &Problem) -> bool {
        matches!(
            problem.kind,
            ProblemKind::Unclassified | ProblemKind::SyntaxError
        )
    }
}

impl Formatter for DefaultFormatter {
    fn format(&self, problems: &[Problem], severity: Severity, palette: Palette) -> Vec<String> {
        let mut lines = Vec::new();
        for problem in problems.iter().filter(|p| Self::handles(p)) {
            let badge = palette.badge(Tone::from(severity), severity.as_str());
            let title = format!("{badge} {}", strip_loaders(problem.file.as_deref()));
            lines.push(title.trim_end().to_string());
            lines.push(String::new());
            lines.push(problem.message.clone());
            lines.extend(problem.origin.iter().cloned());
            lines.push(String::new());
        }
        lines
    }
}

/// `!`-separated loader chains are noise; keep only the resource path.
fn strip_loaders(file: Option<&str>) -> String {
    match file {
        None => String::new(),
        Some(file) => {
            let path = file.rsplit('!').next().unwrap_or(file);
            format!("in {path}")
        }
    }
}

pub fn default_formatters(install_command: &str) -> Vec<Box<dyn Formatter>> {
    vec![
        Box::new(ModuleNotFoundFormatter::new(install_command)),
        Box::new(LintFormatter),
        Box::new(DefaultFormatter),
    ]
}

/// Concatenate the output of every formatter.
pub fn format_problems(
    formatters: &[Box<dyn Formatter>],
    problems: &[Problem],
    severity: Severity,
    palette: Palette,
) -> Vec<String> {
    formatters
        .iter()
        .flat_map(|f| f.format(problems, severity, palette))
        .collect()
}
