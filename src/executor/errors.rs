//! Runtime errors
//!
//! Every runtime fault aborts the program. Errors propagate with `?` out of
//! the executor and are reported by the caller.

use thiserror::Error;

use super::types::{Comparator, Operator, ValueType};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Variable '{name}' holds a value that has not been evaluated")]
    UnevaluatedVariable { name: String },

    #[error("Unsupported operation for {left} and {right}: {op}")]
    UnsupportedOperation {
        left: ValueType,
        right: ValueType,
        op: Operator,
    },

    #[error("Cannot combine a {left} with a {right}")]
    UnsupportedCombination { left: ValueType, right: ValueType },

    #[error("Cannot compare two different value types ({left}, {right})")]
    TypeMismatch { left: ValueType, right: ValueType },

    #[error("Strings can only be compared for equality, found {comparator}")]
    StringComparison { comparator: Comparator },

    #[error("Codepoint {codepoint} is not a valid character")]
    InvalidCodepoint { codepoint: i32 },

    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}
