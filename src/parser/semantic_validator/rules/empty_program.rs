//! Rule: Empty Program
//!
//! A program without instructions cannot run.

use crate::executor::types::ast::Program;

use super::super::{ValidationError, ValidationRule};

pub struct EmptyProgramRule;

impl ValidationRule for EmptyProgramRule {
    fn id(&self) -> &'static str {
        "empty-program"
    }

    fn description(&self) -> &'static str {
        "A program must contain at least one instruction"
    }

    fn validate(&self, program: &Program) -> Vec<ValidationError> {
        if program.instructions.is_empty() {
            vec![ValidationError::error(
                program.span,
                "No instructions found",
                self.id(),
            )]
        } else {
            Vec::new()
        }
    }
}
