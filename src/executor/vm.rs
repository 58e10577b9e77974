//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - store: Variables and scope frames
//! - input: Where `u` values come from
//! - out: Where print writes

use std::io::Write;

use tracing::debug;

use super::errors::RuntimeError;
use super::input::InputProvider;
use super::scope::VariableStore;
use super::statements::execute_block;
use super::types::{Control, Program};
use super::values::EvalContext;

pub struct VM<W: Write> {
    /// Variables visible to the running program
    pub store: VariableStore,

    input: Box<dyn InputProvider>,

    out: W,
}

impl<W: Write> VM<W> {
    pub fn new(out: W, input: Box<dyn InputProvider>) -> Self {
        VM {
            store: VariableStore::new(),
            input,
            out,
        }
    }

    /// Execute a program's top-level instructions in order.
    ///
    /// Returns `Control::Exit` once an exit instruction runs. A program that
    /// falls off the end returns `Control::None`.
    pub fn run(&mut self, program: &Program) -> Result<Control, RuntimeError> {
        debug!(
            instructions = program.instructions.len(),
            "starting execution"
        );
        let control = execute_block(self, &program.instructions)?;
        self.out.flush().map_err(RuntimeError::Output)?;
        debug!(?control, variables = self.store.len(), "execution finished");
        Ok(control)
    }

    /// Borrow the store and the input provider for evaluation
    pub fn context(&mut self) -> EvalContext<'_> {
        EvalContext {
            store: &self.store,
            input: self.input.as_mut(),
        }
    }

    pub(crate) fn write_line(&mut self, text: &str) -> Result<(), RuntimeError> {
        writeln!(self.out, "{}", text).map_err(RuntimeError::Output)
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
