//! Parser - character-level recursive descent for Lettercode
//!
//! Builds the executor's AST straight from the source characters through a
//! [`Cursor`]. There is no tokenizer: every grammar rule inspects the
//! character under the cursor and steps past what it consumes.
//!
//! Each rule leaves the cursor on the first character it did not consume, so
//! the caller can check for its own terminator (`l`, `t`, `k`, `z`).

use thiserror::Error;
use tracing::debug;

use crate::cursor::Cursor;
use crate::executor::types::ast::{Program, Span};

pub mod conditions;
pub mod instructions;
pub mod semantic_validator;
pub mod values;


pub use instructions::{parse_body, parse_instruction};

/* ===================== Error Types ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Source code cannot contain spaces (found one at index {index})")]
    SpaceInSource { index: usize },

    #[error("Source code is empty")]
    EmptySource,

    #[error("Expected {expected} at index {index}, found {found}")]
    Unexpected {
        expected: String,
        found: String,
        index: usize,
    },

    #[error("Unknown instruction '{found}' at index {index}")]
    UnknownInstruction { found: char, index: usize },

    #[error("Unknown value type '{found}' at index {index}")]
    UnknownValueType { found: char, index: usize },

    #[error("Unknown comparator '{found}' at index {index}")]
    UnknownComparator { found: String, index: usize },

    #[error("Invalid {kind} literal '{text}' at index {index}")]
    InvalidLiteral {
        kind: &'static str,
        text: String,
        index: usize,
    },

    #[error("Unterminated literal opened with '{delimiter}' at index {index}")]
    UnterminatedLiteral { delimiter: char, index: usize },

    #[error("Unclosed code body starting at index {index}")]
    UnclosedBody { index: usize },

    #[error("The {segment} of a for loop cannot contain a {kind} instruction (index {index})")]
    InvalidForSegment {
        segment: &'static str,
        kind: &'static str,
        index: usize,
    },
}

impl ParseError {
    /// Source index the error points at
    pub fn index(&self) -> usize {
        match self {
            ParseError::EmptySource => 0,
            ParseError::SpaceInSource { index }
            | ParseError::Unexpected { index, .. }
            | ParseError::UnknownInstruction { index, .. }
            | ParseError::UnknownValueType { index, .. }
            | ParseError::UnknownComparator { index, .. }
            | ParseError::InvalidLiteral { index, .. }
            | ParseError::UnterminatedLiteral { index, .. }
            | ParseError::UnclosedBody { index }
            | ParseError::InvalidForSegment { index, .. } => *index,
        }
    }

    /// Single-character span at the error position
    pub fn span(&self) -> Span {
        let index = self.index();
        Span::new(index, index + 1)
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Build an `Unexpected` error for the cursor's current character, or for
    /// the end of the source once the cursor is exhausted.
    pub(crate) fn unexpected(cursor: &Cursor, expected: impl Into<String>) -> Self {
        let found = if cursor.is_exhausted() {
            "end of source".to_string()
        } else {
            format!("'{}'", cursor.current())
        };
        ParseError::Unexpected {
            expected: expected.into(),
            found,
            index: cursor.offset(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/* ===================== Entry Point ===================== */

/// Parse a complete program.
///
/// The source is the single line of program text. Semantic checks (non-empty,
/// ends with exit) are left to [`semantic_validator`].
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let mut cursor = Cursor::new(source)?;
    let instructions = parse_body(&mut cursor, false)?;
    debug!(instructions = instructions.len(), "parsed program");
    Ok(Program {
        instructions,
        span: Span::new(0, cursor.len()),
    })
}

/// Step over `expected` or fail with an `Unexpected` error
pub(crate) fn expect_char(
    cursor: &mut Cursor,
    expected: char,
    what: &str,
) -> ParseResult<()> {
    if cursor.is_exhausted() || cursor.current() != expected {
        return Err(ParseError::unexpected(cursor, format!("{} '{}'", what, expected)));
    }
    cursor.next();
    Ok(())
}
