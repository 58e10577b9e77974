//! Statement execution handlers
//!
//! Each instruction type has its own handler. Handlers return the control
//! state; `Control::Exit` is passed straight up through every enclosing block
//! and loop.

use std::io::Write;

use tracing::trace;

use super::errors::RuntimeError;
use super::scope::Variable;
use super::types::{Condition, Control, Instruction, Modification, Operator, Value};
use super::vm::VM;

type ExecResult = Result<Control, RuntimeError>;

/* ===================== Blocks ===================== */

/// Execute instructions in order, stopping early on exit
pub fn execute_block<W: Write>(vm: &mut VM<W>, body: &[Instruction]) -> ExecResult {
    for instruction in body {
        if execute_instruction(vm, instruction)?.is_exit() {
            return Ok(Control::Exit);
        }
    }
    Ok(Control::None)
}

/// Run `f` inside a fresh scope frame. The frame is popped on every path,
/// including errors.
fn in_scope<W: Write>(
    vm: &mut VM<W>,
    f: impl FnOnce(&mut VM<W>) -> ExecResult,
) -> ExecResult {
    vm.store.push_scope();
    let result = f(vm);
    vm.store.pop_scope();
    result
}

pub fn execute_instruction<W: Write>(vm: &mut VM<W>, instruction: &Instruction) -> ExecResult {
    trace!(kind = instruction.kind(), start = instruction.span().start, "execute");

    match instruction {
        Instruction::Exit { .. } => Ok(Control::Exit),
        Instruction::Print { value, .. } => execute_print(vm, value),
        Instruction::VarInit { name, value, .. } => execute_var_init(vm, name, value),
        Instruction::VarModify {
            name, modification, ..
        } => execute_var_modify(vm, name, modification),
        Instruction::If {
            condition,
            then_body,
            else_body,
            ..
        } => execute_if(vm, condition, then_body, else_body.as_deref()),
        Instruction::While {
            condition, body, ..
        } => execute_while(vm, condition, body),
        Instruction::For {
            init,
            condition,
            update,
            body,
            ..
        } => execute_for(vm, init, condition, update, body),
    }
}

/* ===================== Simple Instructions ===================== */

fn execute_print<W: Write>(vm: &mut VM<W>, value: &Value) -> ExecResult {
    let scalar = value.evaluated(&mut vm.context())?;
    vm.write_line(&scalar.to_string())?;
    Ok(Control::None)
}

fn execute_var_init<W: Write>(vm: &mut VM<W>, name: &str, value: &Value) -> ExecResult {
    let scalar = value.evaluated(&mut vm.context())?;
    trace!(name, value = %scalar, "declare");
    vm.store.declare(Variable::new(name, Value::from_scalar(scalar)));
    Ok(Control::None)
}

fn execute_var_modify<W: Write>(
    vm: &mut VM<W>,
    name: &str,
    modification: &Modification,
) -> ExecResult {
    let mut current = vm
        .store
        .lookup(name)
        .map(|v| v.value.clone())
        .ok_or_else(|| RuntimeError::UnknownVariable {
            name: name.to_string(),
        })?;

    {
        let mut ctx = vm.context();
        match modification {
            Modification::Increment => current.modify(Operator::Plus, &Value::one(), &mut ctx)?,
            Modification::Decrement => current.modify(Operator::Minus, &Value::one(), &mut ctx)?,
            Modification::Compound { op, value } => current.modify(*op, value, &mut ctx)?,
            Modification::Assign { value } => current = Value::from_scalar(value.evaluated(&mut ctx)?),
        }
    }

    // The lookup above succeeded and evaluation cannot remove variables
    if let Some(variable) = vm.store.lookup_mut(name) {
        variable.value = current;
    }
    Ok(Control::None)
}

/* ===================== Control Flow ===================== */

fn execute_if<W: Write>(
    vm: &mut VM<W>,
    condition: &Condition,
    then_body: &[Instruction],
    else_body: Option<&[Instruction]>,
) -> ExecResult {
    in_scope(vm, |vm| {
        if condition.evaluate(&mut vm.context())? {
            execute_block(vm, then_body)
        } else if let Some(else_body) = else_body {
            execute_block(vm, else_body)
        } else {
            Ok(Control::None)
        }
    })
}

fn execute_while<W: Write>(
    vm: &mut VM<W>,
    condition: &Condition,
    body: &[Instruction],
) -> ExecResult {
    while condition.evaluate(&mut vm.context())? {
        if in_scope(vm, |vm| execute_block(vm, body))?.is_exit() {
            return Ok(Control::Exit);
        }
    }
    Ok(Control::None)
}

fn execute_for<W: Write>(
    vm: &mut VM<W>,
    init: &[Instruction],
    condition: &Condition,
    update: &[Instruction],
    body: &[Instruction],
) -> ExecResult {
    in_scope(vm, |vm| {
        if execute_block(vm, init)?.is_exit() {
            return Ok(Control::Exit);
        }
        while condition.evaluate(&mut vm.context())? {
            let control = in_scope(vm, |vm| {
                if execute_block(vm, body)?.is_exit() {
                    return Ok(Control::Exit);
                }
                execute_block(vm, update)
            })?;
            if control.is_exit() {
                return Ok(Control::Exit);
            }
        }
        Ok(Control::None)
    })
}
