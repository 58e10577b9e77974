//! Value parsing
//!
//! ```text
//! value    := operand (operator operand)*
//! operator := 'p' | 'm' | 'n' | 'q' | 'y'
//! operand  := IDENT | 'u' | T content T      T in {i, d, s, c, b}
//! ```

use crate::cursor::Cursor;
use crate::executor::types::{Operand, Operator, Scalar, Value, ValuePart};

use super::{ParseError, ParseResult};

/// Literal delimiter letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Double,
    Str,
    Char,
    Bool,
}

impl LiteralKind {
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'i' => Some(LiteralKind::Int),
            'd' => Some(LiteralKind::Double),
            's' => Some(LiteralKind::Str),
            'c' => Some(LiteralKind::Char),
            'b' => Some(LiteralKind::Bool),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LiteralKind::Int => "integer",
            LiteralKind::Double => "double",
            LiteralKind::Str => "string",
            LiteralKind::Char => "character",
            LiteralKind::Bool => "boolean",
        }
    }

    /// Turn raw literal content into a scalar. `index` is the position of the
    /// opening delimiter.
    pub fn parse(self, raw: &str, index: usize) -> ParseResult<Scalar> {
        let invalid = || ParseError::InvalidLiteral {
            kind: self.name(),
            text: raw.to_string(),
            index,
        };
        match self {
            LiteralKind::Int => Scalar::parse_int(raw).map(Scalar::Int).ok_or_else(invalid),
            LiteralKind::Double => Scalar::parse_double(raw)
                .map(Scalar::Double)
                .ok_or_else(invalid),
            LiteralKind::Bool => Scalar::parse_bool(raw).map(Scalar::Bool).ok_or_else(invalid),
            LiteralKind::Str => Ok(Scalar::Str(unescape_string(raw))),
            LiteralKind::Char => unescape_char(raw).map(Scalar::Char).ok_or_else(invalid),
        }
    }
}

/// String escapes, applied in this order over the whole text
const STRING_ESCAPES: [(&str, &str); 4] = [("gg", "g"), ("gn", "\n"), ("gl", " "), ("gs", "s")];

/// Resolve string escapes.
///
/// Each escape is replaced across the whole text before the next one is
/// applied, so `ggn` first becomes `gn` and then a newline.
pub fn unescape_string(raw: &str) -> String {
    STRING_ESCAPES
        .iter()
        .fold(raw.to_string(), |text, (escape, replacement)| {
            text.replace(escape, replacement)
        })
}

/// Resolve a character literal. The whole content must be one of `gc`, `gn`,
/// `gl` or `gg` to be an escape, otherwise the first character is taken.
/// Empty content has no character.
pub fn unescape_char(raw: &str) -> Option<char> {
    match raw {
        "gc" => Some('c'),
        "gn" => Some('\n'),
        "gl" => Some(' '),
        "gg" => Some('g'),
        _ => raw.chars().next(),
    }
}

/// Parse a value chain starting at the cursor.
///
/// Stops on the first character after an operand that is not an operator and
/// leaves the cursor there.
pub fn parse_value(cursor: &mut Cursor) -> ParseResult<Value> {
    let mut parts = vec![ValuePart::new(Operator::None, parse_operand(cursor)?)];

    loop {
        let c = cursor.next();
        if cursor.is_exhausted() {
            break;
        }
        let Some(op) = Operator::from_marker(c) else {
            break;
        };
        cursor.next();
        if cursor.is_exhausted() {
            return Err(ParseError::unexpected(cursor, "value after operator"));
        }
        parts.push(ValuePart::new(op, parse_operand(cursor)?));
    }

    Ok(Value::from_parts(parts))
}

/// Parse one operand. The cursor is left on its last character.
fn parse_operand(cursor: &mut Cursor) -> ParseResult<Operand> {
    if cursor.is_exhausted() {
        return Err(ParseError::unexpected(cursor, "value"));
    }

    let c = cursor.current();
    let index = cursor.index();

    if c.is_ascii_uppercase() {
        return Ok(Operand::Variable(cursor.read_identifier(true)));
    }
    if c == 'u' {
        return Ok(Operand::Input);
    }

    let kind = LiteralKind::from_marker(c)
        .ok_or(ParseError::UnknownValueType { found: c, index })?;
    let raw = cursor.read_delimited()?;
    Ok(Operand::Literal(kind.parse(&raw, index)?))
}
