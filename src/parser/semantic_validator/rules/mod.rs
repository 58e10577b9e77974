//! Validation Rules
//!
//! Each file in this module contains one validation rule:
//!
//! - `empty_program.rs` - A program needs at least one instruction
//! - `missing_exit.rs` - A program must end with an exit
//! - `unreachable_code.rs` - Instructions after an exit in the same body
//! - `undefined_variable.rs` - Variables used where no declaration is live

mod empty_program;
mod missing_exit;
mod undefined_variable;
mod unreachable_code;

pub use empty_program::EmptyProgramRule;
pub use missing_exit::MissingExitRule;
pub use undefined_variable::UndefinedVariableRule;
pub use unreachable_code::UnreachableCodeRule;
