//! Binary operator evaluation.
//!
//! Logical operators return one of their *operand values*, not a fresh
//! boolean, following the tri-state selection tables; a double-`maybe`
//! pair resolves by coin flip. `>=` and `<=` shortcut through
//! structural equality before falling back to ordering.

use rev_ir::{Operator, Span};

use crate::coin::CoinFlip;
use crate::equality;
use crate::errors::{
    cannot_coerce_number, negative_base, stray_comma, EvalError, EvalResult,
};
use crate::value::{Trilean, Value, EPSILON};

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(
    left: Value,
    right: Value,
    op: Operator,
    span: Span,
    coin: &mut dyn CoinFlip,
) -> EvalResult {
    match op {
        Operator::Add => {
            if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
                let mut text = left.to_text();
                text.push_str(&right.to_text());
                return Ok(Value::string(text));
            }
            let (l, r) = numeric_pair(&left, &right, span)?;
            Ok(Value::Number(l + r))
        }
        Operator::Sub => {
            let (l, r) = numeric_pair(&left, &right, span)?;
            Ok(Value::Number(l - r))
        }
        Operator::Mul => {
            let (l, r) = numeric_pair(&left, &right, span)?;
            Ok(Value::Number(l * r))
        }
        Operator::Div => {
            let (l, r) = numeric_pair(&left, &right, span)?;
            if r.abs() < EPSILON {
                Ok(Value::Undefined)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        Operator::Exp => {
            let (l, r) = numeric_pair(&left, &right, span)?;
            if l < -EPSILON && !Value::is_int(r) {
                return Err(negative_base(span));
            }
            Ok(Value::Number(l.powf(r)))
        }
        Operator::Or => {
            let picked = match (left.to_trilean(), right.to_trilean()) {
                (Trilean::True, _) => left,
                (Trilean::False, _) => right,
                (Trilean::Maybe, Trilean::True) => right,
                (Trilean::Maybe, Trilean::False) => left,
                (Trilean::Maybe, Trilean::Maybe) => {
                    if coin.flip() {
                        left
                    } else {
                        right
                    }
                }
            };
            Ok(picked)
        }
        Operator::And => {
            let picked = match (left.to_trilean(), right.to_trilean()) {
                (Trilean::True, _) => right,
                (Trilean::False, _) => left,
                (Trilean::Maybe, Trilean::True) => left,
                (Trilean::Maybe, Trilean::False) => right,
                (Trilean::Maybe, Trilean::Maybe) => {
                    if coin.flip() {
                        left
                    } else {
                        right
                    }
                }
            };
            Ok(picked)
        }
        Operator::E => Ok(Value::Boolean(equality::approximate(&left, &right))),
        Operator::Ee => Ok(Value::Boolean(equality::loose(&left, &right, span)?)),
        Operator::Eee => Ok(Value::Boolean(equality::structural(&left, &right))),
        Operator::Eeee => Ok(Value::Boolean(equality::identity(&left, &right))),
        Operator::Ne => Ok(Value::Boolean(equality::loose(&left, &right, span)?.not())),
        Operator::Nee => Ok(Value::Boolean(equality::structural(&left, &right).not())),
        Operator::Neee => Ok(Value::Boolean(equality::identity(&left, &right).not())),
        Operator::Lt => Ok(Value::Boolean(equality::less_than(&left, &right, span)?)),
        Operator::Gt => Ok(Value::Boolean(
            equality::less_than(&left, &right, span)?.not(),
        )),
        Operator::Le => {
            if equality::structural(&left, &right).is_true() {
                Ok(Value::Boolean(Trilean::True))
            } else {
                Ok(Value::Boolean(equality::less_than(&left, &right, span)?))
            }
        }
        Operator::Ge => {
            if equality::structural(&left, &right).is_true() {
                Ok(Value::Boolean(Trilean::True))
            } else {
                Ok(Value::Boolean(
                    equality::less_than(&left, &right, span)?.not(),
                ))
            }
        }
        Operator::Com => Err(stray_comma(span)),
    }
}

fn numeric_pair(left: &Value, right: &Value, span: Span) -> Result<(f64, f64), EvalError> {
    let l = left
        .to_number()
        .ok_or_else(|| cannot_coerce_number(left, span))?;
    let r = right
        .to_number()
        .ok_or_else(|| cannot_coerce_number(right, span))?;
    Ok((l, r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::coin::ScriptedCoin;

    fn eval(left: Value, right: Value, op: Operator) -> EvalResult {
        let mut coin = ScriptedCoin::new([]);
        evaluate_binary(left, right, op, Span::DUMMY, &mut coin)
    }

    #[test]
    fn addition_prefers_string_concatenation() {
        assert_eq!(
            eval(Value::string("a"), Value::Number(1.0), Operator::Add),
            Ok(Value::string("a1"))
        );
        assert_eq!(
            eval(Value::Number(2.0), Value::Number(3.0), Operator::Add),
            Ok(Value::Number(5.0))
        );
    }

    #[test]
    fn division_by_near_zero_is_undefined() {
        assert_eq!(
            eval(Value::Number(1.0), Value::Number(0.0), Operator::Div),
            Ok(Value::Undefined)
        );
        assert_eq!(
            eval(Value::Number(1.0), Value::Number(1e-12), Operator::Div),
            Ok(Value::Undefined)
        );
        assert_eq!(
            eval(Value::Number(6.0), Value::Number(2.0), Operator::Div),
            Ok(Value::Number(3.0))
        );
    }

    #[test]
    fn negative_base_requires_integer_exponent() {
        assert_eq!(
            eval(Value::Number(-8.0), Value::Number(2.0), Operator::Exp),
            Ok(Value::Number(64.0))
        );
        assert!(eval(Value::Number(-8.0), Value::Number(0.5), Operator::Exp).is_err());
    }

    #[test]
    fn logic_returns_operand_values() {
        let hello = Value::string("hello");
        let empty = Value::string("");
        assert_eq!(
            eval(hello.clone(), empty.clone(), Operator::Or),
            Ok(hello.clone())
        );
        assert_eq!(eval(hello.clone(), empty.clone(), Operator::And), Ok(empty));
        // maybe || true picks the concrete side.
        assert_eq!(
            eval(Value::Boolean(Trilean::Maybe), Value::Boolean(Trilean::True), Operator::Or),
            Ok(Value::Boolean(Trilean::True))
        );
        // maybe && true keeps the maybe.
        assert_eq!(
            eval(Value::Boolean(Trilean::Maybe), Value::Boolean(Trilean::True), Operator::And),
            Ok(Value::Boolean(Trilean::Maybe))
        );
    }

    #[test]
    fn double_maybe_resolves_by_coin() {
        // Functions coerce to maybe and carry identity, so the picked
        // operand is observable.
        let make = |param: &str| {
            Value::Function(std::rc::Rc::new(crate::value::FunctionValue {
                params: vec![param.to_string()],
                body: vec![],
                is_async: false,
            }))
        };
        let left = make("l");
        let right = make("r");
        let mut heads = ScriptedCoin::new([true]);
        let picked =
            evaluate_binary(left.clone(), right.clone(), Operator::Or, Span::DUMMY, &mut heads)
                .unwrap();
        assert!(picked.identity_eq(&left));
        let mut tails = ScriptedCoin::new([false]);
        let picked = evaluate_binary(left, right.clone(), Operator::And, Span::DUMMY, &mut tails)
            .unwrap();
        assert!(picked.identity_eq(&right));
    }

    #[test]
    fn lax_bounds_shortcut_through_structural_equality() {
        assert_eq!(
            eval(Value::Number(2.0), Value::Number(2.0), Operator::Ge),
            Ok(Value::Boolean(Trilean::True))
        );
        assert_eq!(
            eval(Value::Number(2.0), Value::Number(3.0), Operator::Le),
            Ok(Value::Boolean(Trilean::True))
        );
        assert_eq!(
            eval(Value::Number(2.0), Value::Number(3.0), Operator::Ge),
            Ok(Value::Boolean(Trilean::False))
        );
    }

    #[test]
    fn equality_tiers_dispatch_by_operator() {
        let a = Value::list(vec![Value::Number(1.0)]);
        let b = a.deep_copy();
        assert_eq!(
            eval(a.clone(), b.clone(), Operator::Eee),
            Ok(Value::Boolean(Trilean::True))
        );
        assert_eq!(
            eval(a.clone(), b.clone(), Operator::Eeee),
            Ok(Value::Boolean(Trilean::False))
        );
        assert_eq!(
            eval(a, b, Operator::Neee),
            Ok(Value::Boolean(Trilean::True))
        );
    }

    #[test]
    fn stray_comma_is_fatal() {
        assert!(eval(Value::Number(1.0), Value::Number(2.0), Operator::Com).is_err());
    }
}
