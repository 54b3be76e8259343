//! Diagnostic sinks used by processor validation.

use crate::quickfix::QuickFix;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemSeverity {
    Error,
    Warning,
}

impl fmt::Display for ProblemSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemSeverity::Error => f.write_str("error"),
            ProblemSeverity::Warning => f.write_str("warning"),
        }
    }
}

/// A reported problem with its suggested fixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub severity: ProblemSeverity,
    pub message: String,
    pub fixes: Vec<QuickFix>,
}

impl Problem {
    pub fn is_error(&self) -> bool {
        self.severity == ProblemSeverity::Error
    }
}

/// Receiver for validation findings.
pub trait ProblemSink {
    fn add_problem(&mut self, problem: Problem);

    fn add_warning(&mut self, message: String, fixes: Vec<QuickFix>) {
        self.add_problem(Problem {
            severity: ProblemSeverity::Warning,
            message,
            fixes,
        });
    }

    fn add_error(&mut self, message: String, fixes: Vec<QuickFix>) {
        self.add_problem(Problem {
            severity: ProblemSeverity::Error,
            message,
            fixes,
        });
    }
}

/// Discards everything; used on the member generation path.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyProblemSink;

impl ProblemSink for EmptyProblemSink {
    fn add_problem(&mut self, _problem: Problem) {}
}

/// Keeps problems in report order.
#[derive(Debug, Clone, Default)]
pub struct CollectingProblemSink {
    problems: Vec<Problem>,
}

impl CollectingProblemSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_errors(&self) -> bool {
        self.problems.iter().any(Problem::is_error)
    }

    pub fn into_problems(self) -> Vec<Problem> {
        self.problems
    }
}

impl ProblemSink for CollectingProblemSink {
    fn add_problem(&mut self, problem: Problem) {
        self.problems.push(problem);
    }
}
