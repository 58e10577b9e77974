//! Condition parsing
//!
//! ```text
//! condition  := comparison (logical comparison)*
//! comparison := value comparator value
//! comparator := 'et' | 'at' | 'gt' | 'get' | 'lt' | 'let'
//! logical    := 'a' | 'o' | 'x'
//! ```

use crate::cursor::Cursor;
use crate::executor::types::{ChainLink, Comparator, Condition, LogicalOp};

use super::values::parse_value;
use super::{ParseError, ParseResult};

/// Longest comparator spelling
const MAX_COMPARATOR_LEN: usize = 3;

/// Parse a simple condition or a chain of them.
///
/// Leaves the cursor on the first character after the last comparison.
pub fn parse_condition(cursor: &mut Cursor) -> ParseResult<Condition> {
    let head = parse_comparison(cursor)?;
    let mut rest = Vec::new();

    while !cursor.is_exhausted() {
        let Some(op) = LogicalOp::from_marker(cursor.current()) else {
            break;
        };
        cursor.next();
        rest.push(ChainLink {
            op,
            condition: parse_comparison(cursor)?,
        });
    }

    if rest.is_empty() {
        Ok(head)
    } else {
        Ok(Condition::Chain {
            head: Box::new(head),
            rest,
        })
    }
}

fn parse_comparison(cursor: &mut Cursor) -> ParseResult<Condition> {
    let left = parse_value(cursor)?;
    let comparator = parse_comparator(cursor)?;
    let right = parse_value(cursor)?;
    Ok(Condition::Compare {
        left,
        comparator,
        right,
    })
}

/// Read a comparator ending in `t` and step past it
fn parse_comparator(cursor: &mut Cursor) -> ParseResult<Comparator> {
    let index = cursor.offset();
    let mut text = String::new();

    while !cursor.is_exhausted() && text.len() < MAX_COMPARATOR_LEN {
        let c = cursor.current();
        text.push(c);
        cursor.next();
        if c == 't' {
            break;
        }
    }

    match text.as_str() {
        "et" => Ok(Comparator::Equal),
        "at" => Ok(Comparator::NotEqual),
        "gt" => Ok(Comparator::Greater),
        "get" => Ok(Comparator::GreaterOrEqual),
        "lt" => Ok(Comparator::Less),
        "let" => Ok(Comparator::LessOrEqual),
        "" => Err(ParseError::unexpected(cursor, "comparator")),
        _ => Err(ParseError::UnknownComparator { found: text, index }),
    }
}
