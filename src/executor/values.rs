//! Value evaluation
//!
//! Folds a value chain left to right into one [`Scalar`], resolving variable
//! references against the store and input requests against the input
//! provider. Arithmetic always runs in `f64`; integer results are narrowed
//! afterwards.

use tracing::trace;

use super::errors::RuntimeError;
use super::input::{self, InputProvider};
use super::scope::VariableStore;
use super::types::{Operand, Operator, Scalar, Value, ValuePart, ValueType};

/// What evaluation needs from the running program
pub struct EvalContext<'a> {
    pub store: &'a VariableStore,
    pub input: &'a mut dyn InputProvider,
}

impl Value {
    /// Collapse this value into a single scalar part.
    ///
    /// Does nothing if the value is already evaluated.
    pub fn evaluate(&mut self, ctx: &mut EvalContext<'_>) -> Result<(), RuntimeError> {
        if self.evaluated {
            return Ok(());
        }

        let mut acc: Option<Scalar> = None;
        for part in &self.parts {
            let operand = resolve(&part.operand, ctx)?;
            acc = combine(acc, operand, part.op)?;
        }

        let result = acc.unwrap_or_else(|| Scalar::Str(String::new()));
        self.parts = vec![ValuePart::new(Operator::None, Operand::Literal(result))];
        self.evaluated = true;
        Ok(())
    }

    /// Evaluate a copy of this value, leaving the template untouched
    pub fn evaluated(&self, ctx: &mut EvalContext<'_>) -> Result<Scalar, RuntimeError> {
        let mut snapshot = self.clone();
        snapshot.evaluate(ctx)?;
        Ok(snapshot.into_scalar())
    }

    /// Combine this value with `other` under `op` and re-evaluate.
    ///
    /// `other`'s first part takes `op` as its operator; its remaining parts
    /// keep their own.
    pub fn modify(
        &mut self,
        op: Operator,
        other: &Value,
        ctx: &mut EvalContext<'_>,
    ) -> Result<(), RuntimeError> {
        let mut rest = other.parts.iter();
        if let Some(first) = rest.next() {
            self.parts.push(ValuePart::new(op, first.operand.clone()));
        }
        self.parts.extend(rest.cloned());
        self.evaluated = false;
        self.evaluate(ctx)
    }

    fn into_scalar(self) -> Scalar {
        self.parts
            .into_iter()
            .next()
            .and_then(|part| match part.operand {
                Operand::Literal(scalar) => Some(scalar),
                _ => None,
            })
            .unwrap_or_else(|| Scalar::Str(String::new()))
    }
}

/// Turn an operand into a concrete scalar. `None` is the unknown type of
/// empty input.
fn resolve(operand: &Operand, ctx: &mut EvalContext<'_>) -> Result<Option<Scalar>, RuntimeError> {
    match operand {
        Operand::Literal(scalar) => Ok(Some(scalar.clone())),
        Operand::Variable(name) => {
            let variable = ctx
                .store
                .lookup(name)
                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone() })?;
            let scalar = variable
                .value
                .scalar()
                .ok_or_else(|| RuntimeError::UnevaluatedVariable { name: name.clone() })?;
            Ok(Some(scalar.clone()))
        }
        Operand::Input => {
            let raw = ctx.input.request_input().map_err(RuntimeError::Input)?;
            let probed = input::probe(&raw);
            trace!(raw = %raw, probed = ?probed, "input received");
            Ok(probed)
        }
    }
}

/// Merge the next operand into the running accumulator.
///
/// An empty accumulator takes the operand as is. An unknown operand leaves a
/// non-empty accumulator alone, except that strings still only accept `+`.
pub fn combine(
    acc: Option<Scalar>,
    operand: Option<Scalar>,
    op: Operator,
) -> Result<Option<Scalar>, RuntimeError> {
    match (acc, operand) {
        (None, operand) => Ok(operand),
        (Some(Scalar::Str(s)), None) => {
            if op != Operator::Plus {
                return Err(RuntimeError::UnsupportedOperation {
                    left: ValueType::Str,
                    right: ValueType::Unknown,
                    op,
                });
            }
            Ok(Some(Scalar::Str(s)))
        }
        (Some(acc), None) => Ok(Some(acc)),
        (Some(acc), Some(operand)) => combine_scalars(acc, operand, op).map(Some),
    }
}

/// The coercion matrix for two concrete operands
fn combine_scalars(acc: Scalar, operand: Scalar, op: Operator) -> Result<Scalar, RuntimeError> {
    use Scalar::{Bool, Char, Double, Int};

    match (acc, operand) {
        (Int(a), Int(b)) => Ok(Int(narrow(op.apply(f64::from(a), f64::from(b))))),
        (Int(a), Double(b)) => Ok(Double(op.apply(f64::from(a), b))),
        (Int(a), Char(c)) => Ok(Int(narrow(op.apply(f64::from(a), codepoint(c))))),
        (Int(a), Bool(b)) => Ok(Int(narrow(op.apply(f64::from(a), flag(b))))),

        (Double(a), Int(b)) => Ok(Double(op.apply(a, f64::from(b)))),
        (Double(a), Double(b)) => Ok(Double(op.apply(a, b))),
        (Double(a), Char(c)) => Ok(Double(op.apply(a, codepoint(c)))),
        (Double(a), Bool(b)) => Ok(Double(op.apply(a, flag(b)))),

        (Char(a), Int(b)) => {
            let n = narrow(op.apply(codepoint(a), f64::from(b)));
            to_char(n).map(Char)
        }
        (Char(_), Double(_)) => Err(RuntimeError::UnsupportedCombination {
            left: ValueType::Char,
            right: ValueType::Double,
        }),
        (Char(_), Bool(_)) => Err(RuntimeError::UnsupportedCombination {
            left: ValueType::Char,
            right: ValueType::Bool,
        }),

        (Bool(a), Int(b)) => Ok(Int(narrow(op.apply(flag(a), f64::from(b))))),
        (Bool(a), Double(b)) => Ok(Double(op.apply(flag(a), b))),
        (Bool(_), Char(_)) => Err(RuntimeError::UnsupportedCombination {
            left: ValueType::Bool,
            right: ValueType::Char,
        }),
        (Bool(_), Bool(_)) => Err(RuntimeError::UnsupportedCombination {
            left: ValueType::Bool,
            right: ValueType::Bool,
        }),

        // Remaining pairs involve a string, or two characters
        (acc, operand) => concatenate(acc, operand, op),
    }
}

fn concatenate(acc: Scalar, operand: Scalar, op: Operator) -> Result<Scalar, RuntimeError> {
    if op != Operator::Plus {
        return Err(RuntimeError::UnsupportedOperation {
            left: acc.value_type(),
            right: operand.value_type(),
            op,
        });
    }
    Ok(Scalar::Str(format!("{}{}", acc, operand)))
}

/// f64 to integer, saturating; NaN becomes 0
fn narrow(x: f64) -> i32 {
    x as i32
}

fn codepoint(c: char) -> f64 {
    f64::from(u32::from(c))
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn to_char(n: i32) -> Result<char, RuntimeError> {
    u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .ok_or(RuntimeError::InvalidCodepoint { codepoint: n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::input::ScriptedInput;
    use crate::executor::scope::Variable;

    fn lit(op: Operator, scalar: Scalar) -> ValuePart {
        ValuePart::new(op, Operand::Literal(scalar))
    }

    fn eval_parts(parts: Vec<ValuePart>) -> Result<Scalar, RuntimeError> {
        let store = VariableStore::new();
        let mut input = ScriptedInput::default();
        let mut ctx = EvalContext {
            store: &store,
            input: &mut input,
        };
        Value::from_parts(parts).evaluated(&mut ctx)
    }

    fn pair(a: Scalar, op: Operator, b: Scalar) -> Result<Scalar, RuntimeError> {
        eval_parts(vec![lit(Operator::None, a), lit(op, b)])
    }

    #[test]
    fn test_int_int_truncates() {
        assert_eq!(pair(Scalar::Int(7), Operator::Divide, Scalar::Int(2)).unwrap(), Scalar::Int(3));
        assert_eq!(pair(Scalar::Int(-7), Operator::Modulo, Scalar::Int(3)).unwrap(), Scalar::Int(-1));
        assert_eq!(pair(Scalar::Int(6), Operator::Times, Scalar::Int(7)).unwrap(), Scalar::Int(42));
    }

    #[test]
    fn test_int_division_by_zero_saturates() {
        assert_eq!(
            pair(Scalar::Int(1), Operator::Divide, Scalar::Int(0)).unwrap(),
            Scalar::Int(i32::MAX)
        );
        assert_eq!(pair(Scalar::Int(0), Operator::Divide, Scalar::Int(0)).unwrap(), Scalar::Int(0));
    }

    #[test]
    fn test_int_promotes_to_double() {
        assert_eq!(
            pair(Scalar::Int(1), Operator::Plus, Scalar::Double(0.5)).unwrap(),
            Scalar::Double(1.5)
        );
    }

    #[test]
    fn test_int_char_uses_codepoint() {
        assert_eq!(pair(Scalar::Int(1), Operator::Plus, Scalar::Char('A')).unwrap(), Scalar::Int(66));
    }

    #[test]
    fn test_int_bool_uses_flag() {
        assert_eq!(pair(Scalar::Int(5), Operator::Plus, Scalar::Bool(true)).unwrap(), Scalar::Int(6));
        assert_eq!(pair(Scalar::Int(5), Operator::Times, Scalar::Bool(false)).unwrap(), Scalar::Int(0));
    }

    #[test]
    fn test_int_string_concatenates_with_plus_only() {
        assert_eq!(
            pair(Scalar::Int(1), Operator::Plus, Scalar::Str("a".into())).unwrap(),
            Scalar::Str("1a".into())
        );
        assert!(matches!(
            pair(Scalar::Int(1), Operator::Minus, Scalar::Str("a".into())),
            Err(RuntimeError::UnsupportedOperation { left: ValueType::Int, right: ValueType::Str, op: Operator::Minus })
        ));
    }

    #[test]
    fn test_double_pairs() {
        assert_eq!(pair(Scalar::Double(1.5), Operator::Plus, Scalar::Int(1)).unwrap(), Scalar::Double(2.5));
        assert_eq!(pair(Scalar::Double(0.5), Operator::Times, Scalar::Double(4.0)).unwrap(), Scalar::Double(2.0));
        assert_eq!(pair(Scalar::Double(0.0), Operator::Plus, Scalar::Char('a')).unwrap(), Scalar::Double(97.0));
        assert_eq!(pair(Scalar::Double(2.0), Operator::Minus, Scalar::Bool(true)).unwrap(), Scalar::Double(1.0));
        assert_eq!(
            pair(Scalar::Double(2.0), Operator::Plus, Scalar::Str("x".into())).unwrap(),
            Scalar::Str("2.0x".into())
        );
        assert!(pair(Scalar::Double(2.0), Operator::Divide, Scalar::Str("x".into())).is_err());
    }

    #[test]
    fn test_char_int_shifts_codepoint() {
        assert_eq!(pair(Scalar::Char('a'), Operator::Plus, Scalar::Int(1)).unwrap(), Scalar::Char('b'));
        assert_eq!(pair(Scalar::Char('c'), Operator::Minus, Scalar::Int(2)).unwrap(), Scalar::Char('a'));
    }

    #[test]
    fn test_char_int_invalid_codepoint() {
        assert!(matches!(
            pair(Scalar::Char('a'), Operator::Minus, Scalar::Int(200)),
            Err(RuntimeError::InvalidCodepoint { codepoint: -103 })
        ));
    }

    #[test]
    fn test_char_concatenation() {
        assert_eq!(
            pair(Scalar::Char('a'), Operator::Plus, Scalar::Char('b')).unwrap(),
            Scalar::Str("ab".into())
        );
        assert_eq!(
            pair(Scalar::Char('a'), Operator::Plus, Scalar::Str("bc".into())).unwrap(),
            Scalar::Str("abc".into())
        );
        assert!(pair(Scalar::Char('a'), Operator::Times, Scalar::Char('b')).is_err());
    }

    #[test]
    fn test_fatal_pairs() {
        let cases = [
            (Scalar::Char('a'), Scalar::Double(1.0)),
            (Scalar::Char('a'), Scalar::Bool(true)),
            (Scalar::Bool(true), Scalar::Char('a')),
            (Scalar::Bool(true), Scalar::Bool(false)),
        ];
        for (a, b) in cases {
            let (left, right) = (a.value_type(), b.value_type());
            match pair(a, Operator::Plus, b) {
                Err(RuntimeError::UnsupportedCombination { left: l, right: r }) => {
                    assert_eq!((l, r), (left, right));
                }
                other => panic!("expected unsupported combination, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_bool_numeric_pairs() {
        assert_eq!(pair(Scalar::Bool(true), Operator::Plus, Scalar::Int(2)).unwrap(), Scalar::Int(3));
        assert_eq!(pair(Scalar::Bool(false), Operator::Plus, Scalar::Double(0.5)).unwrap(), Scalar::Double(0.5));
        assert_eq!(
            pair(Scalar::Bool(true), Operator::Plus, Scalar::Str("!".into())).unwrap(),
            Scalar::Str("true!".into())
        );
    }

    #[test]
    fn test_string_accepts_anything_with_plus() {
        assert_eq!(
            pair(Scalar::Str("n=".into()), Operator::Plus, Scalar::Double(1.0)).unwrap(),
            Scalar::Str("n=1.0".into())
        );
        assert_eq!(
            pair(Scalar::Str("".into()), Operator::Plus, Scalar::Bool(false)).unwrap(),
            Scalar::Str("false".into())
        );
        assert!(matches!(
            pair(Scalar::Str("a".into()), Operator::Times, Scalar::Int(2)),
            Err(RuntimeError::UnsupportedOperation { left: ValueType::Str, .. })
        ));
    }

    #[test]
    fn test_chain_folds_left_to_right_without_precedence() {
        // 1 + 2 * 3 is (1 + 2) * 3
        let parts = vec![
            lit(Operator::None, Scalar::Int(1)),
            lit(Operator::Plus, Scalar::Int(2)),
            lit(Operator::Times, Scalar::Int(3)),
        ];
        assert_eq!(eval_parts(parts).unwrap(), Scalar::Int(9));
    }

    #[test]
    fn test_unknown_operand_is_absorbed() {
        assert_eq!(combine(Some(Scalar::Int(4)), None, Operator::Times).unwrap(), Some(Scalar::Int(4)));
        assert_eq!(combine(None, Some(Scalar::Char('z')), Operator::Plus).unwrap(), Some(Scalar::Char('z')));
        assert!(combine(Some(Scalar::Str("s".into())), None, Operator::Minus).is_err());
    }

    #[test]
    fn test_empty_input_alone_becomes_empty_string() {
        let parts = vec![ValuePart::new(Operator::None, Operand::Input)];
        assert_eq!(eval_parts(parts).unwrap(), Scalar::Str(String::new()));
    }

    #[test]
    fn test_evaluated_leaves_template_untouched() {
        let mut store = VariableStore::new();
        store.declare(Variable::new("x", Value::from_scalar(Scalar::Int(1))));
        let template = Value::from_parts(vec![
            ValuePart::new(Operator::None, Operand::Variable("x".into())),
            lit(Operator::Plus, Scalar::Int(1)),
        ]);
        let before = template.clone();

        let mut input = ScriptedInput::default();
        let mut ctx = EvalContext {
            store: &store,
            input: &mut input,
        };
        assert_eq!(template.evaluated(&mut ctx).unwrap(), Scalar::Int(2));
        assert_eq!(template, before);
        assert!(!template.is_evaluated());
    }

    #[test]
    fn test_evaluate_twice_is_noop() {
        let mut store = VariableStore::new();
        store.declare(Variable::new("x", Value::from_scalar(Scalar::Int(1))));
        let mut value = Value::from_parts(vec![ValuePart::new(
            Operator::None,
            Operand::Variable("x".into()),
        )]);

        let mut input = ScriptedInput::default();
        {
            let mut ctx = EvalContext {
                store: &store,
                input: &mut input,
            };
            value.evaluate(&mut ctx).unwrap();
        }
        assert_eq!(value.scalar(), Some(&Scalar::Int(1)));

        // The variable is gone, but the value no longer needs it
        let empty = VariableStore::new();
        let mut ctx = EvalContext {
            store: &empty,
            input: &mut input,
        };
        value.evaluate(&mut ctx).unwrap();
        assert_eq!(value.scalar(), Some(&Scalar::Int(1)));
        assert_eq!(value.parts().len(), 1);
    }

    #[test]
    fn test_unknown_variable() {
        let parts = vec![ValuePart::new(Operator::None, Operand::Variable("nope".into()))];
        assert!(matches!(
            eval_parts(parts),
            Err(RuntimeError::UnknownVariable { name }) if name == "nope"
        ));
    }

    #[test]
    fn test_modify_appends_and_reevaluates() {
        let store = VariableStore::new();
        let mut input = ScriptedInput::default();
        let mut ctx = EvalContext {
            store: &store,
            input: &mut input,
        };

        let mut value = Value::from_scalar(Scalar::Int(10));
        let other = Value::from_parts(vec![
            lit(Operator::None, Scalar::Int(2)),
            lit(Operator::Times, Scalar::Int(3)),
        ]);
        // (10 - 2) * 3
        value.modify(Operator::Minus, &other, &mut ctx).unwrap();
        assert_eq!(value.scalar(), Some(&Scalar::Int(24)));
        assert!(value.is_evaluated());
    }

    #[test]
    fn test_input_probe_feeds_combination() {
        let store = VariableStore::new();
        let mut input = ScriptedInput::new(["41"]);
        let mut ctx = EvalContext {
            store: &store,
            input: &mut input,
        };
        let value = Value::from_parts(vec![
            ValuePart::new(Operator::None, Operand::Input),
            lit(Operator::Plus, Scalar::Int(1)),
        ]);
        assert_eq!(value.evaluated(&mut ctx).unwrap(), Scalar::Int(42));
    }
}
