//! Abstract Syntax Tree node types

use serde::{Deserialize, Serialize};

use super::values::{Operator, Value};

/// Source location span (character indices into the single source line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    /// Index of the first character
    pub start: usize,
    /// Index one past the last character
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parsed program: the top-level instruction sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub span: Span,
}

/// Comparison operator of a simple condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Comparator {
    pub fn holds(self, a: f64, b: f64) -> bool {
        match self {
            Comparator::Equal => a == b,
            Comparator::NotEqual => a != b,
            Comparator::Greater => a > b,
            Comparator::GreaterOrEqual => a >= b,
            Comparator::Less => a < b,
            Comparator::LessOrEqual => a <= b,
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::Greater => ">",
            Comparator::GreaterOrEqual => ">=",
            Comparator::Less => "<",
            Comparator::LessOrEqual => "<=",
        };
        write!(f, "{}", symbol)
    }
}

/// Logical operator joining chain members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
    Xor,
}

impl LogicalOp {
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            'a' => Some(LogicalOp::And),
            'o' => Some(LogicalOp::Or),
            'x' => Some(LogicalOp::Xor),
            _ => None,
        }
    }

    pub fn combine(self, acc: bool, next: bool) -> bool {
        match self {
            LogicalOp::And => acc && next,
            LogicalOp::Or => acc || next,
            LogicalOp::Xor => acc ^ next,
        }
    }
}

/// Condition of an if/while/for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Condition {
    Compare {
        left: Value,
        comparator: Comparator,
        right: Value,
    },
    /// At least two members, folded left to right
    Chain {
        head: Box<Condition>,
        rest: Vec<ChainLink>,
    },
}

impl Condition {
    /// Every value the condition evaluates, in evaluation order
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Condition::Compare { left, right, .. } => vec![left, right],
            Condition::Chain { head, rest } => {
                let mut values = head.values();
                for link in rest {
                    values.extend(link.condition.values());
                }
                values
            }
        }
    }
}

/// A chain member after the first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub op: LogicalOp,
    pub condition: Condition,
}

/// How a variable-modify instruction changes its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Modification {
    Increment,
    Decrement,
    Compound { op: Operator, value: Value },
    Assign { value: Value },
}

/// Instruction AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Instruction {
    Exit {
        #[serde(default)]
        span: Span,
    },
    Print {
        value: Value,
        #[serde(default)]
        span: Span,
    },
    VarInit {
        name: String,
        value: Value,
        #[serde(default)]
        span: Span,
    },
    VarModify {
        name: String,
        modification: Modification,
        #[serde(default)]
        span: Span,
    },
    If {
        condition: Condition,
        then_body: Vec<Instruction>,
        else_body: Option<Vec<Instruction>>,
        #[serde(default)]
        span: Span,
    },
    While {
        condition: Condition,
        body: Vec<Instruction>,
        #[serde(default)]
        span: Span,
    },
    For {
        init: Vec<Instruction>,
        condition: Condition,
        update: Vec<Instruction>,
        body: Vec<Instruction>,
        #[serde(default)]
        span: Span,
    },
}

impl Instruction {
    /// Get the span of this instruction
    pub fn span(&self) -> Span {
        match self {
            Instruction::Exit { span }
            | Instruction::Print { span, .. }
            | Instruction::VarInit { span, .. }
            | Instruction::VarModify { span, .. }
            | Instruction::If { span, .. }
            | Instruction::While { span, .. }
            | Instruction::For { span, .. } => *span,
        }
    }

    /// Short name used in diagnostics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Exit { .. } => "exit",
            Instruction::Print { .. } => "print",
            Instruction::VarInit { .. } => "variable init",
            Instruction::VarModify { .. } => "variable modify",
            Instruction::If { .. } => "if",
            Instruction::While { .. } => "while",
            Instruction::For { .. } => "for",
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Instruction::Exit { .. })
    }
}
