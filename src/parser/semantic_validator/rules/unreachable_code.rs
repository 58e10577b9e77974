//! Rule: Unreachable Code
//!
//! Warns about instructions that follow an exit in the same body. Only the
//! first unreachable instruction of each body is reported.

use crate::executor::types::ast::{Instruction, Program};

use super::super::{ValidationError, ValidationRule};

pub struct UnreachableCodeRule;

impl ValidationRule for UnreachableCodeRule {
    fn id(&self) -> &'static str {
        "unreachable-code"
    }

    fn description(&self) -> &'static str {
        "Instructions after an exit never run"
    }

    fn validate(&self, program: &Program) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_body(&program.instructions, &mut errors, self.id());
        errors
    }
}

fn check_body(body: &[Instruction], errors: &mut Vec<ValidationError>, rule_id: &'static str) {
    let mut exited = false;

    for instruction in body {
        if exited {
            errors.push(ValidationError::warning(
                instruction.span(),
                format!("Unreachable {} instruction after exit", instruction.kind()),
                rule_id,
            ));
            break;
        }

        match instruction {
            Instruction::If {
                then_body,
                else_body,
                ..
            } => {
                check_body(then_body, errors, rule_id);
                if let Some(else_body) = else_body {
                    check_body(else_body, errors, rule_id);
                }
            }
            Instruction::While { body, .. } => check_body(body, errors, rule_id),
            Instruction::For { body, .. } => check_body(body, errors, rule_id),
            Instruction::Exit { .. } => exited = true,
            Instruction::Print { .. }
            | Instruction::VarInit { .. }
            | Instruction::VarModify { .. } => {}
        }
    }
}
