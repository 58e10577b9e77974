//! Checks on a parsed program before it runs
//!
//! Findings come in two severities. Errors (no instructions, no trailing
//! exit) stop the program from running at all. Warnings (dead code after an
//! exit, names that are never declared) are reported and the program still
//! runs. Rules live one per file under `rules/` and are registered in
//! [`Validator::new`].

pub mod rules;


use std::fmt;

use tracing::debug;

use crate::executor::types::ast::{Program, Span};

/// One finding, anchored at the instruction that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub span: Span,
    pub message: String,
    pub severity: Severity,
    /// Id of the reporting rule, e.g. `missing-exit`
    pub rule_id: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The program will not be executed
    Error,
    /// Probably a mistake, execution still proceeds
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl ValidationError {
    pub fn error(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Error,
            rule_id,
        }
    }

    pub fn warning(span: Span, message: impl Into<String>, rule_id: &'static str) -> Self {
        Self {
            span,
            message: message.into(),
            severity: Severity::Warning,
            rule_id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at index {}: {} [{}]",
            self.severity, self.span.start, self.message, self.rule_id
        )
    }
}

impl std::error::Error for ValidationError {}

/// A single check over the whole program. Rules see only the AST, never
/// each other's findings.
pub trait ValidationRule: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn validate(&self, program: &Program) -> Vec<ValidationError>;
}

/// The registered rules, run in order
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                // Program contract
                Box::new(rules::EmptyProgramRule),
                Box::new(rules::MissingExitRule),
                // Likely mistakes
                Box::new(rules::UnreachableCodeRule),
                Box::new(rules::UndefinedVariableRule),
            ],
        }
    }

    pub fn validate(&self, program: &Program) -> Vec<ValidationError> {
        self.rules
            .iter()
            .flat_map(|rule| rule.validate(program))
            .collect()
    }

    /// Registered rules as (id, description) pairs
    pub fn rules(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|r| (r.id(), r.description()))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every rule over `program`
pub fn validate_program(program: &Program) -> Vec<ValidationError> {
    let findings = Validator::new().validate(program);
    debug!(
        errors = findings.iter().filter(|e| e.is_error()).count(),
        warnings = findings.iter().filter(|e| !e.is_error()).count(),
        "validated program"
    );
    findings
}

/// True if any finding blocks execution
pub fn has_errors(findings: &[ValidationError]) -> bool {
    findings.iter().any(ValidationError::is_error)
}
