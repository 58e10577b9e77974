//! Rule: Missing Exit
//!
//! The last top-level instruction must be an exit. Exits inside bodies do not
//! count, since the body may never run.
//!
//! ```text
//! hi1il      error: falls off the end
//! hi1ilxl    ok
//! ```

use crate::executor::types::ast::Program;

use super::super::{ValidationError, ValidationRule};

pub struct MissingExitRule;

impl ValidationRule for MissingExitRule {
    fn id(&self) -> &'static str {
        "missing-exit"
    }

    fn description(&self) -> &'static str {
        "A program must end with an exit instruction"
    }

    fn validate(&self, program: &Program) -> Vec<ValidationError> {
        match program.instructions.last() {
            Some(last) if !last.is_exit() => vec![ValidationError::error(
                last.span(),
                format!(
                    "No exit instruction at the end of the program (last instruction is {})",
                    last.kind()
                ),
                self.id(),
            )],
            _ => Vec::new(),
        }
    }
}
