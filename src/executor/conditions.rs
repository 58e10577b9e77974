//! Condition evaluation
//!
//! Chains are folded strictly left to right with no short-circuit: every
//! member is evaluated, so every input request in a chain fires.

use super::errors::RuntimeError;
use super::types::{Comparator, Condition, Scalar};
use super::values::EvalContext;

impl Condition {
    pub fn evaluate(&self, ctx: &mut EvalContext<'_>) -> Result<bool, RuntimeError> {
        match self {
            Condition::Compare {
                left,
                comparator,
                right,
            } => {
                let left = left.evaluated(ctx)?;
                let right = right.evaluated(ctx)?;
                compare(&left, *comparator, &right)
            }
            Condition::Chain { head, rest } => {
                let mut acc = head.evaluate(ctx)?;
                for link in rest {
                    let next = link.condition.evaluate(ctx)?;
                    acc = link.op.combine(acc, next);
                }
                Ok(acc)
            }
        }
    }
}

/// Compare two evaluated operands of the same type.
///
/// Strings only support (in)equality. Every other type compares through its
/// numeric view.
pub fn compare(left: &Scalar, comparator: Comparator, right: &Scalar) -> Result<bool, RuntimeError> {
    if left.value_type() != right.value_type() {
        return Err(RuntimeError::TypeMismatch {
            left: left.value_type(),
            right: right.value_type(),
        });
    }

    if let (Scalar::Str(a), Scalar::Str(b)) = (left, right) {
        return match comparator {
            Comparator::Equal => Ok(a == b),
            Comparator::NotEqual => Ok(a != b),
            other => Err(RuntimeError::StringComparison { comparator: other }),
        };
    }

    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok(comparator.holds(a, b)),
        _ => Err(RuntimeError::TypeMismatch {
            left: left.value_type(),
            right: right.value_type(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::types::ValueType;

    #[test]
    fn test_numeric_comparisons() {
        assert!(compare(&Scalar::Int(1), Comparator::Less, &Scalar::Int(2)).unwrap());
        assert!(compare(&Scalar::Int(2), Comparator::GreaterOrEqual, &Scalar::Int(2)).unwrap());
        assert!(!compare(&Scalar::Double(1.5), Comparator::Greater, &Scalar::Double(1.5)).unwrap());
        assert!(compare(&Scalar::Char('a'), Comparator::Less, &Scalar::Char('b')).unwrap());
        assert!(compare(&Scalar::Bool(true), Comparator::Greater, &Scalar::Bool(false)).unwrap());
        assert!(compare(&Scalar::Bool(true), Comparator::NotEqual, &Scalar::Bool(false)).unwrap());
    }

    #[test]
    fn test_string_equality_uses_both_sides() {
        let a = Scalar::Str("a".into());
        let b = Scalar::Str("b".into());
        assert!(!compare(&a, Comparator::Equal, &b).unwrap());
        assert!(compare(&a, Comparator::NotEqual, &b).unwrap());
        assert!(compare(&a, Comparator::Equal, &a.clone()).unwrap());
    }

    #[test]
    fn test_string_ordering_is_rejected() {
        let a = Scalar::Str("a".into());
        assert!(matches!(
            compare(&a, Comparator::Less, &a.clone()),
            Err(RuntimeError::StringComparison { comparator: Comparator::Less })
        ));
    }

    #[test]
    fn test_mixed_types_are_rejected() {
        assert!(matches!(
            compare(&Scalar::Int(1), Comparator::Equal, &Scalar::Double(1.0)),
            Err(RuntimeError::TypeMismatch { left: ValueType::Int, right: ValueType::Double })
        ));
    }
}
