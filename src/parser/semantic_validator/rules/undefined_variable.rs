//! Rule: Undefined Variable
//!
//! Warns when a variable is read or modified where no declaration is live.
//!
//! Scoping follows the runtime exactly: a body's frame records every name
//! declared in it, and leaving the body deletes those names even if they were
//! declared outside first. A body that may or may not run is assumed to have
//! run, so its deletions carry over.
//!
//! ```text
//! vXei1ilhXl                          ok
//! hXl                                 'x' is not declared
//! vXei1iljbtruebetbtruebtvXei2ilzhXl  'x' is deleted when the if body ends
//! ```

use std::collections::HashSet;

use crate::executor::types::ast::{Condition, Instruction, Modification, Program, Span};
use crate::executor::types::Value;

use super::super::{ValidationError, ValidationRule};

pub struct UndefinedVariableRule;

impl ValidationRule for UndefinedVariableRule {
    fn id(&self) -> &'static str {
        "undefined-variable"
    }

    fn description(&self) -> &'static str {
        "Variables must be declared in an enclosing body before use"
    }

    fn validate(&self, program: &Program) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut scope = Scope::default();
        check_body(&program.instructions, &mut scope, &mut errors, self.id());
        errors
    }
}

// ============================================================================
// Scope Tracking
// ============================================================================

/// Static mirror of the runtime variable store
#[derive(Debug, Clone, Default)]
struct Scope {
    defined: HashSet<String>,
    frames: Vec<Vec<String>>,
}

impl Scope {
    fn declare(&mut self, name: &str) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            if !frame.iter().any(|n| n == name) {
                frame.push(name.to_string());
            }
        }
        self.defined.insert(name.to_string());
    }

    fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Pop the top frame and return the names it deleted
    fn pop(&mut self) -> Vec<String> {
        let frame = self.frames.pop().unwrap_or_default();
        for name in &frame {
            self.defined.remove(name);
        }
        frame
    }

    fn forget(&mut self, names: &[String]) {
        for name in names {
            self.defined.remove(name);
        }
    }
}

// ============================================================================
// AST Traversal
// ============================================================================

fn check_body(
    body: &[Instruction],
    scope: &mut Scope,
    errors: &mut Vec<ValidationError>,
    rule_id: &'static str,
) {
    for instruction in body {
        check_instruction(instruction, scope, errors, rule_id);
    }
}

/// Check `body` inside a fresh frame on a copy of `scope`. Returns the names
/// deleted when the frame is popped.
fn check_branch(
    body: &[Instruction],
    scope: &Scope,
    errors: &mut Vec<ValidationError>,
    rule_id: &'static str,
) -> Vec<String> {
    let mut inner = scope.clone();
    inner.push();
    check_body(body, &mut inner, errors, rule_id);
    inner.pop()
}

fn check_instruction(
    instruction: &Instruction,
    scope: &mut Scope,
    errors: &mut Vec<ValidationError>,
    rule_id: &'static str,
) {
    let span = instruction.span();

    match instruction {
        Instruction::Exit { .. } => {}

        Instruction::Print { value, .. } => check_value(value, span, scope, errors, rule_id),

        Instruction::VarInit { name, value, .. } => {
            // The value is evaluated before the name exists
            check_value(value, span, scope, errors, rule_id);
            scope.declare(name);
        }

        Instruction::VarModify {
            name, modification, ..
        } => {
            if !scope.is_defined(name) {
                errors.push(ValidationError::warning(
                    span,
                    format!("Modifying undeclared variable '{}'", name),
                    rule_id,
                ));
            }
            if let Modification::Compound { value, .. } | Modification::Assign { value } =
                modification
            {
                check_value(value, span, scope, errors, rule_id);
            }
        }

        Instruction::If {
            condition,
            then_body,
            else_body,
            ..
        } => {
            check_condition(condition, span, scope, errors, rule_id);
            let mut removed = check_branch(then_body, scope, errors, rule_id);
            if let Some(else_body) = else_body {
                removed.extend(check_branch(else_body, scope, errors, rule_id));
            }
            scope.forget(&removed);
        }

        Instruction::While {
            condition, body, ..
        } => {
            check_condition(condition, span, scope, errors, rule_id);
            let removed = check_branch(body, scope, errors, rule_id);
            scope.forget(&removed);
        }

        Instruction::For {
            init,
            condition,
            update,
            body,
            ..
        } => {
            let mut head = scope.clone();
            head.push();
            check_body(init, &mut head, errors, rule_id);
            check_condition(condition, span, &head, errors, rule_id);

            let mut inner = head.clone();
            inner.push();
            check_body(body, &mut inner, errors, rule_id);
            check_body(update, &mut inner, errors, rule_id);

            let mut removed = inner.pop();
            removed.extend(head.pop());
            scope.forget(&removed);
        }
    }
}

fn check_condition(
    condition: &Condition,
    span: Span,
    scope: &Scope,
    errors: &mut Vec<ValidationError>,
    rule_id: &'static str,
) {
    for value in condition.values() {
        check_value(value, span, scope, errors, rule_id);
    }
}

fn check_value(
    value: &Value,
    span: Span,
    scope: &Scope,
    errors: &mut Vec<ValidationError>,
    rule_id: &'static str,
) {
    for name in value.variables() {
        if !scope.is_defined(name) {
            errors.push(ValidationError::warning(
                span,
                format!("Variable '{}' is not declared", name),
                rule_id,
            ));
        }
    }
}
