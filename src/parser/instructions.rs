//! Instruction parsing
//!
//! ```text
//! instruction := 'x' 'l'
//!              | 'h' value 'l'
//!              | 'v' IDENT 'e' value 'l'
//!              | IDENT modify 'l'
//!              | 'j' condition 't' body ['e' 't' body]
//!              | 'r' condition 't' body
//!              | 'f' head* 'k' condition 'k' update* 't' body
//! modify      := 'pp' | 'mm' | op 'e' value | 'e' value
//! body        := instruction* 'z'
//! ```

use crate::cursor::Cursor;
use crate::executor::types::{Instruction, Modification, Operator, Span};

use super::conditions::parse_condition;
use super::values::parse_value;
use super::{expect_char, ParseError, ParseResult};

const BODY_END: char = 'z';

/// Parse instructions until the end of the source, or until the closing `z`
/// when `closed` is set.
///
/// A closed body that runs into the end of the source is an error.
pub fn parse_body(cursor: &mut Cursor, closed: bool) -> ParseResult<Vec<Instruction>> {
    let start = cursor.offset();
    let mut instructions = Vec::new();

    while !cursor.is_exhausted() {
        if closed && cursor.current() == BODY_END {
            cursor.next();
            return Ok(instructions);
        }
        instructions.push(parse_instruction(cursor)?);
    }

    if closed {
        return Err(ParseError::UnclosedBody { index: start });
    }
    Ok(instructions)
}

/// Parse the instruction starting under the cursor
pub fn parse_instruction(cursor: &mut Cursor) -> ParseResult<Instruction> {
    let start = cursor.index();
    let c = cursor.current();

    if c.is_ascii_uppercase() {
        return parse_var_modify(cursor, start);
    }

    match c {
        'x' => {
            cursor.next();
            let end = expect_end(cursor)?;
            Ok(Instruction::Exit {
                span: Span::new(start, end),
            })
        }
        'h' => {
            cursor.next();
            let value = parse_value(cursor)?;
            let end = expect_end(cursor)?;
            Ok(Instruction::Print {
                value,
                span: Span::new(start, end),
            })
        }
        'v' => parse_var_init(cursor, start),
        'j' => parse_if(cursor, start),
        'r' => parse_while(cursor, start),
        'f' => parse_for(cursor, start),
        found => Err(ParseError::UnknownInstruction {
            found,
            index: start,
        }),
    }
}

/// Step over the `l` that ends a simple instruction and return the end index
fn expect_end(cursor: &mut Cursor) -> ParseResult<usize> {
    expect_char(cursor, 'l', "instruction end")?;
    Ok(cursor.offset())
}

/// Open a `t ... z` body
fn parse_block(cursor: &mut Cursor) -> ParseResult<Vec<Instruction>> {
    expect_char(cursor, 't', "body start")?;
    parse_body(cursor, true)
}

/* ===================== Variables ===================== */

fn parse_var_init(cursor: &mut Cursor, start: usize) -> ParseResult<Instruction> {
    cursor.next();
    if cursor.is_exhausted() || !cursor.current().is_ascii_uppercase() {
        return Err(ParseError::unexpected(cursor, "variable name"));
    }
    let name = cursor.read_identifier(false);

    expect_char(cursor, 'e', "assignment")?;
    let value = parse_value(cursor)?;
    let end = expect_end(cursor)?;

    Ok(Instruction::VarInit {
        name,
        value,
        span: Span::new(start, end),
    })
}

fn parse_var_modify(cursor: &mut Cursor, start: usize) -> ParseResult<Instruction> {
    let name = cursor.read_identifier(false);
    if cursor.is_exhausted() {
        return Err(ParseError::unexpected(cursor, "modification"));
    }

    let marker = cursor.current();
    let modification = if marker == 'e' {
        cursor.next();
        Modification::Assign {
            value: parse_value(cursor)?,
        }
    } else if let Some(op) = Operator::from_marker(marker) {
        let second = cursor.next();
        if cursor.is_exhausted() {
            return Err(ParseError::unexpected(cursor, "modification"));
        }
        match (op, second) {
            (_, 'e') => {
                cursor.next();
                Modification::Compound {
                    op,
                    value: parse_value(cursor)?,
                }
            }
            (Operator::Plus, 'p') => {
                cursor.next();
                Modification::Increment
            }
            (Operator::Minus, 'm') => {
                cursor.next();
                Modification::Decrement
            }
            _ => return Err(ParseError::unexpected(cursor, "'e' after operator")),
        }
    } else {
        return Err(ParseError::unexpected(cursor, "modification"));
    };

    let end = expect_end(cursor)?;
    Ok(Instruction::VarModify {
        name,
        modification,
        span: Span::new(start, end),
    })
}

/* ===================== Control Flow ===================== */

fn parse_if(cursor: &mut Cursor, start: usize) -> ParseResult<Instruction> {
    cursor.next();
    let condition = parse_condition(cursor)?;
    let then_body = parse_block(cursor)?;

    let else_body = if !cursor.is_exhausted() && cursor.current() == 'e' {
        cursor.next();
        Some(parse_block(cursor)?)
    } else {
        None
    };

    Ok(Instruction::If {
        condition,
        then_body,
        else_body,
        span: Span::new(start, cursor.offset()),
    })
}

fn parse_while(cursor: &mut Cursor, start: usize) -> ParseResult<Instruction> {
    cursor.next();
    let condition = parse_condition(cursor)?;
    let body = parse_block(cursor)?;

    Ok(Instruction::While {
        condition,
        body,
        span: Span::new(start, cursor.offset()),
    })
}

fn parse_for(cursor: &mut Cursor, start: usize) -> ParseResult<Instruction> {
    cursor.next();

    let init = parse_segment(cursor, 'k', "initialization", |i| {
        matches!(i, Instruction::VarInit { .. } | Instruction::VarModify { .. })
    })?;
    expect_char(cursor, 'k', "for separator")?;

    let condition = parse_condition(cursor)?;
    expect_char(cursor, 'k', "for separator")?;

    let update = parse_segment(cursor, 't', "update", |i| {
        matches!(i, Instruction::VarModify { .. })
    })?;
    let body = parse_block(cursor)?;

    Ok(Instruction::For {
        init,
        condition,
        update,
        body,
        span: Span::new(start, cursor.offset()),
    })
}

/// Parse the instructions of a for-loop head segment up to `terminator`,
/// rejecting any instruction `allowed` does not accept.
fn parse_segment(
    cursor: &mut Cursor,
    terminator: char,
    segment: &'static str,
    allowed: impl Fn(&Instruction) -> bool,
) -> ParseResult<Vec<Instruction>> {
    let mut instructions = Vec::new();
    while !cursor.is_exhausted() && cursor.current() != terminator {
        let instruction = parse_instruction(cursor)?;
        if !allowed(&instruction) {
            return Err(ParseError::InvalidForSegment {
                segment,
                kind: instruction.kind(),
                index: instruction.span().start,
            });
        }
        instructions.push(instruction);
    }
    Ok(instructions)
}

