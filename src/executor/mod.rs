//! # Executor - Tree-Walking Interpreter
//!
//! Runs a parsed [`Program`] directly off the AST.
//!
//! ## Core Principles
//!
//! 1. **Recursive execution**: bodies are walked in order, loops re-walk theirs
//! 2. **Runtime typing**: values are folded into scalars at evaluation time
//! 3. **Centralized control flow**: `Control` carries exit up to the VM
//! 4. **Pure executor**: all I/O goes through the VM's input provider and writer

pub mod conditions;
pub mod errors;
pub mod input;
pub mod scope;
pub mod statements;
pub mod types;
pub mod values;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use errors::RuntimeError;
pub use input::{InputProvider, ScriptedInput, StdinInput};
pub use scope::{Variable, VariableStore};
pub use types::{Control, Instruction, Program, Scalar, Value};
pub use values::EvalContext;
pub use vm::VM;
