//! Problem transformers
//!
//! Transformers classify raw host problems and clean up their messages. Each
//! one receives the output of the previous one; anything it does not
//! recognize passes through untouched.

use crate::models::{Problem, ProblemKind};

/// Priority of syntax errors; they hide everything else
pub const SYNTAX_ERROR_PRIORITY: u32 = 1000;
/// Priority of unresolved imports
pub const MODULE_NOT_FOUND_PRIORITY: u32 = 900;

pub trait Transformer {
    fn transform(&self, problem: Problem) -> Problem;
}

impl<F> Transformer for F
where
    F: Fn(Problem) -> Problem,
{
    fn transform(&self, problem: Problem) -> Problem {
        self(problem)
    }
}

/// Syntax errors surfaced through a loader (`ModuleBuildError`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxErrorTransformer;

impl Transformer for SyntaxErrorTransformer {
    fn transform(&self, mut problem: Problem) -> Problem {
        if !problem.is_named("ModuleBuildError") || !problem.message.contains("SyntaxError") {
            return problem;
        }
        problem.message = clean_syntax_message(&problem.message);
        problem.kind = ProblemKind::SyntaxError;
        problem.priority = SYNTAX_ERROR_PRIORITY;
        problem
    }
}

fn clean_syntax_message(message: &str) -> String {
    let stripped = strip_stack_frames(message);
    let cleaned = if stripped.starts_with("Module build failed") {
        replace_build_failed_prefix(&stripped)
    } else {
        stripped
    };
    cleaned.replacen("SyntaxError: ", "", 1)
}

/// Replace `Module build failed (from loader):` (first line, up to the last
/// colon followed by whitespace) with `Syntax Error: `.
fn replace_build_failed_prefix(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or_default();
    let colon = first_line
        .char_indices()
        .filter(|&(i, c)| {
            c == ':'
                && first_line[i + 1..]
                    .chars()
                    .next()
                    .map_or(true, char::is_whitespace)
        })
        .map(|(i, _)| i)
        .last();
    let Some(colon) = colon else {
        return message.to_string();
    };
    let rest = &message[colon + 1..];
    let rest = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
    format!("Syntax Error: {rest}")
}

/// Drop `    at fn (file.js:1:2)` frames that loaders append to messages.
fn strip_stack_frames(message: &str) -> String {
    message
        .lines()
        .filter(|line| !is_stack_frame(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_stack_frame(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("at ") else {
        return false;
    };
    let location = rest.trim_end().trim_end_matches(')');
    let mut parts = location.rsplitn(3, ':');
    let column = parts.next().unwrap_or_default();
    let row = parts.next().unwrap_or_default();
    parts.next().is_some()
        && !column.is_empty()
        && column.chars().all(|c| c.is_ascii_digit())
        && !row.is_empty()
        && row.chars().all(|c| c.is_ascii_digit())
}

/// `Module not found: Error: Can't resolve 'x' in '/dir'`
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleNotFoundTransformer;

impl Transformer for ModuleNotFoundTransformer {
    fn transform(&self, mut problem: Problem) -> Problem {
        if !problem.is_named("ModuleNotFoundError")
            || !problem.message.starts_with("Module not found")
        {
            return problem;
        }
        let Some(module) = unresolved_module(&problem.message) else {
            return problem;
        };
        problem.kind = ProblemKind::ModuleNotFound { module };
        problem.priority = MODULE_NOT_FOUND_PRIORITY;
        problem
    }
}

fn unresolved_module(message: &str) -> Option<String> {
    let rest = &message[message.find("Can't resolve '")? + "Can't resolve '".len()..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Problems raised by the eslint loader
#[derive(Debug, Default, Clone, Copy)]
pub struct LintTransformer;

impl Transformer for LintTransformer {
    fn transform(&self, mut problem: Problem) -> Problem {
        if !problem.is_named("LintError") && !problem.message.contains("eslint-loader") {
            return problem;
        }
        problem.name = Some("Lint error".to_string());
        problem.kind = ProblemKind::Lint;
        problem
    }
}

pub fn default_transformers() -> Vec<Box<dyn Transformer>> {
    vec![
        Box::new(SyntaxErrorTransformer),
        Box::new(ModuleNotFoundTransformer),
        Box::new(LintTransformer),
    ]
}

/// Run every transformer over every problem, then keep only those of the
/// highest priority.
pub fn process_problems(
    problems: Vec<Problem>,
    transformers: &[Box<dyn Transformer>],
) -> Vec<Problem> {
    let transformed: Vec<Problem> = problems
        .into_iter()
        .map(|p| transformers.iter().fold(p, |acc, t| t.transform(acc)))
        .collect();
    top_priority(transformed)
}

fn top_priority(problems: Vec<Problem>) -> Vec<Problem> {
    let Some(max) = problems.iter().map(|p| p.priority).max() else {
        return problems;
    };
    problems.into_iter().filter(|p| p.priority == max).collect()
}
