pub mod cli;
pub mod config;
pub mod cursor;
pub mod executor;
pub mod loader;
pub mod parser;

use std::io::Write;

use thiserror::Error;
use tracing::warn;

use executor::types::{Control, Program};
use executor::{RuntimeError, VM};
use parser::semantic_validator::{self, ValidationError};
use parser::ParseError;

// Re-export main types
pub use config::Settings;
pub use executor::{InputProvider, ScriptedInput, StdinInput};

/// Any fault that stops a program from running to completion
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{}", format_findings(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

fn format_findings(findings: &[ValidationError]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and validate a program.
///
/// Warnings are logged; any error-level finding fails with `Error::Invalid`
/// carrying only the errors.
pub fn prepare(source: &str) -> Result<Program, Error> {
    let program = parser::parse_program(source)?;
    let (errors, warnings): (Vec<_>, Vec<_>) = semantic_validator::validate_program(&program)
        .into_iter()
        .partition(ValidationError::is_error);

    for warning in &warnings {
        warn!(rule = warning.rule_id, index = warning.span.start, "{}", warning.message);
    }
    if !errors.is_empty() {
        return Err(Error::Invalid(errors));
    }
    Ok(program)
}

/// Parse, validate and run `source` on `vm`
pub fn run_source<W: Write>(source: &str, vm: &mut VM<W>) -> Result<Control, Error> {
    let program = prepare(source)?;
    Ok(vm.run(&program)?)
}
