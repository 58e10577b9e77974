//! Type definitions for the executor
//!
//! - AST nodes (Program, Instruction, Condition)
//! - Runtime values (Value, ValuePart, Scalar)
//! - Control flow state

pub mod ast;
pub mod control;
pub mod values;

pub use ast::{
    ChainLink, Comparator, Condition, Instruction, LogicalOp, Modification, Program, Span,
};
pub use control::Control;
pub use values::{Operand, Operator, Scalar, Value, ValuePart, ValueType};
