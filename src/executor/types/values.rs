//! Runtime value types
//!
//! A [`Value`] is a chain of operand parts joined by arithmetic operators.
//! Parsing produces the unevaluated chain; evaluation folds it into a single
//! [`Scalar`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete runtime value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Scalar {
    Int(i32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Scalar {
    pub fn value_type(&self) -> ValueType {
        match self {
            Scalar::Int(_) => ValueType::Int,
            Scalar::Double(_) => ValueType::Double,
            Scalar::Bool(_) => ValueType::Bool,
            Scalar::Char(_) => ValueType::Char,
            Scalar::Str(_) => ValueType::Str,
        }
    }

    /// Numeric view used by arithmetic and comparisons.
    ///
    /// Booleans count as 1/0 and characters as their codepoint. Strings have
    /// no numeric view.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(f64::from(*i)),
            Scalar::Double(d) => Some(*d),
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Char(c) => Some(f64::from(u32::from(*c))),
            Scalar::Str(_) => None,
        }
    }

    /// Integer literal text
    pub fn parse_int(text: &str) -> Option<i32> {
        text.parse().ok()
    }

    /// Double literal text. Words such as `inf` or `NaN` are not numbers here.
    pub fn parse_double(text: &str) -> Option<f64> {
        let first = text.chars().next()?;
        if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
            return None;
        }
        if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
            return None;
        }
        text.parse().ok()
    }

    /// Boolean literal text: `true`/`1` or `false`/`0`, any case
    pub fn parse_bool(text: &str) -> Option<bool> {
        match text.to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part: 1.0, not 1
            Scalar::Double(d) => write!(f, "{:?}", d),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Char(c) => write!(f, "{}", c),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Type tag of a value part or of an evaluated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    Double,
    Bool,
    Char,
    Str,
    Variable,
    Input,
    /// Empty user input; absorbed by whatever it is combined with
    Unknown,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Int => "integer",
            ValueType::Double => "double",
            ValueType::Bool => "boolean",
            ValueType::Char => "character",
            ValueType::Str => "string",
            ValueType::Variable => "variable",
            ValueType::Input => "input",
            ValueType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Arithmetic operator joining a part to the parts before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    None,
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
}

impl Operator {
    /// Operator for a source marker letter
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'p' => Some(Operator::Plus),
            'm' => Some(Operator::Minus),
            'n' => Some(Operator::Times),
            'q' => Some(Operator::Divide),
            'y' => Some(Operator::Modulo),
            _ => None,
        }
    }

    /// Apply in double precision. `None` keeps the left operand.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Plus => a + b,
            Operator::Minus => a - b,
            Operator::Times => a * b,
            Operator::Divide => a / b,
            Operator::Modulo => a % b,
            Operator::None => a,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::None => "none",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
        };
        write!(f, "{}", symbol)
    }
}

/// Payload of a value part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Operand {
    Literal(Scalar),
    /// Reference by (lowercased) name, resolved at evaluation time
    Variable(String),
    /// Ask the input provider for a value
    Input,
}

/// One operand of a value chain together with its combining operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePart {
    pub op: Operator,
    pub operand: Operand,
}

impl ValuePart {
    pub fn new(op: Operator, operand: Operand) -> Self {
        Self { op, operand }
    }

    pub fn value_type(&self) -> ValueType {
        match &self.operand {
            Operand::Literal(scalar) => scalar.value_type(),
            Operand::Variable(_) => ValueType::Variable,
            Operand::Input => ValueType::Input,
        }
    }
}

/// Value expression.
///
/// Unevaluated values are templates and may be evaluated many times through
/// [`Value::evaluated`]. An evaluated value holds exactly one literal part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub(crate) parts: Vec<ValuePart>,
    #[serde(default)]
    pub(crate) evaluated: bool,
}

impl Value {
    /// Unevaluated value from parsed parts
    pub fn from_parts(parts: Vec<ValuePart>) -> Self {
        debug_assert!(!parts.is_empty(), "a value needs at least one part");
        Self {
            parts,
            evaluated: false,
        }
    }

    /// Already evaluated value holding `scalar`
    pub fn from_scalar(scalar: Scalar) -> Self {
        Self {
            parts: vec![ValuePart::new(Operator::None, Operand::Literal(scalar))],
            evaluated: true,
        }
    }

    /// The integer literal 1, used by `++` and `--`
    pub fn one() -> Self {
        Self::from_parts(vec![ValuePart::new(
            Operator::None,
            Operand::Literal(Scalar::Int(1)),
        )])
    }

    pub fn parts(&self) -> &[ValuePart] {
        &self.parts
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Type of the first part (the result type once evaluated)
    pub fn value_type(&self) -> ValueType {
        self.parts
            .first()
            .map(ValuePart::value_type)
            .unwrap_or(ValueType::Unknown)
    }

    /// The concrete result, if this value has been evaluated
    pub fn scalar(&self) -> Option<&Scalar> {
        if !self.evaluated {
            return None;
        }
        match self.parts.first().map(|p| &p.operand) {
            Some(Operand::Literal(scalar)) => Some(scalar),
            _ => None,
        }
    }

    /// Names of every variable this value reads
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match &p.operand {
            Operand::Variable(name) => Some(name.as_str()),
            _ => None,
        })
    }
}
