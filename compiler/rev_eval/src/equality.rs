//! The four-tier equality ladder and ordering.
//!
//! Strictest to fuzziest: identity (`====`), structural (`===`), loose
//! (`==`), approximate (`=`). Each tier falls through a fixed sequence
//! of branches; the boolean-coercion shortcut sits *before* the
//! composite branches, so two non-empty lists compare loosely equal
//! without ever looking at their elements. Maps and objects compare
//! over their key intersection only.

use rev_ir::Span;

use crate::errors::{cannot_coerce_number, mixed_comparison, unordered_type, EvalError};
use crate::value::{Trilean, Value};

/// Similarity above which strings compare approximately equal.
pub const STRING_EQUALITY_RATIO: f64 = 0.7;
/// Elementwise score above which lists compare approximately equal.
pub const LIST_EQUALITY_RATIO: f64 = 0.7;
/// Key-intersection score above which maps compare approximately equal.
pub const MAP_EQUALITY_RATIO: f64 = 0.6;
/// Body-overlap score above which functions compare approximately equal.
pub const FUNCTION_EQUALITY_RATIO: f64 = 0.7;
/// Relative difference below which numbers compare approximately equal.
pub const NUM_EQUALITY_RATIO: f64 = 0.1;

/// Tier 1: `====`.
pub fn identity(left: &Value, right: &Value) -> Trilean {
    Trilean::from_bool(left.identity_eq(right))
}

/// Tier 2: `===`. Type-tag mismatch is concrete `false`; only a pair of
/// natives (which have no structure to compare) yields `maybe`.
pub fn structural(left: &Value, right: &Value) -> Trilean {
    if std::mem::discriminant(left) != std::mem::discriminant(right) {
        return Trilean::False;
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Trilean::from_bool(a == b),
        (Value::Str(a), Value::Str(b)) => Trilean::from_bool(a == b),
        (Value::Boolean(a), Value::Boolean(b)) => Trilean::from_bool(a == b),
        (Value::Keyword(a), Value::Keyword(b)) => Trilean::from_bool(a == b),
        (Value::Undefined, Value::Undefined) => Trilean::True,
        (Value::Object(a), Value::Object(b)) => {
            let a_ns = a.namespace.borrow();
            let b_ns = b.namespace.borrow();
            let same = a.class_name == b.class_name
                && a_ns.len() == b_ns.len()
                && a_ns.iter().all(|(key, binding)| {
                    b_ns.get(key).is_some_and(|other| {
                        structural(binding.current(), other.current()).is_true()
                    })
                });
            Trilean::from_bool(same)
        }
        (Value::Function(a), Value::Function(b)) => {
            Trilean::from_bool(a.params == b.params && a.body == b.body && a.is_async == b.is_async)
        }
        (Value::List(a), Value::List(b)) => Trilean::from_bool(
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(l, r)| structural(l, r).is_true()),
        ),
        (Value::Map(a), Value::Map(b)) => Trilean::from_bool(
            a.len() == b.len()
                && a.iter().all(|(key, l)| {
                    b.get(key).is_some_and(|r| structural(l, r).is_true())
                }),
        ),
        _ => Trilean::Maybe,
    }
}

/// Tier 3: `==`. Coercion-happy; a number compared against something
/// with no numeric reading is a fatal error.
pub fn loose(left: &Value, right: &Value, span: Span) -> Result<Trilean, EvalError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Trilean::from_bool(left.to_text() == right.to_text()));
    }
    if matches!(left, Value::Number(_)) || matches!(right, Value::Number(_)) {
        let l = coerce_number(left, span)?;
        let r = coerce_number(right, span)?;
        return Ok(Trilean::from_bool(l == r));
    }
    if matches!(left, Value::Boolean(_)) || matches!(right, Value::Boolean(_)) {
        return Ok(trilean_pair_eq(left, right));
    }
    if let Some(result) = boolean_shortcut(left, right) {
        return Ok(result);
    }
    if std::mem::discriminant(left) != std::mem::discriminant(right) {
        return Ok(Trilean::Maybe);
    }
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            // Zips to the shorter list; no length check at this tier.
            for (l, r) in a.iter().zip(b.iter()) {
                if !loose(l, r, span)?.is_true() {
                    return Ok(Trilean::False);
                }
            }
            Ok(Trilean::True)
        }
        (Value::Map(a), Value::Map(b)) => {
            for (key, l) in a.iter() {
                if let Some(r) = b.get(key) {
                    if !approximate(l, r).is_true() {
                        return Ok(Trilean::False);
                    }
                }
            }
            Ok(Trilean::True)
        }
        (Value::Object(a), Value::Object(b)) => {
            let a_ns = a.namespace.borrow();
            let b_ns = b.namespace.borrow();
            for (key, binding) in a_ns.iter() {
                if let Some(other) = b_ns.get(key) {
                    if !approximate(binding.current(), other.current()).is_true() {
                        return Ok(Trilean::False);
                    }
                }
            }
            Ok(Trilean::True)
        }
        _ => Ok(Trilean::Maybe),
    }
}

/// Tier 4: `=`. Scored comparisons; never errors, and functions never
/// compare concretely unequal.
pub fn approximate(left: &Value, right: &Value) -> Trilean {
    if left.identity_eq(right) {
        return Trilean::True;
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        let ratio = similarity(&left.to_text(), &right.to_text());
        return Trilean::from_bool(ratio > STRING_EQUALITY_RATIO);
    }
    if matches!(left, Value::Number(_)) || matches!(right, Value::Number(_)) {
        let other = if matches!(left, Value::Number(_)) { right } else { left };
        if matches!(
            other,
            Value::Number(_) | Value::Undefined | Value::Boolean(_)
        ) {
            // Both sides coerce here: Number/Undefined/Boolean all have
            // a numeric reading.
            let l = left.to_number().unwrap_or(0.0);
            let r = right.to_number().unwrap_or(0.0);
            let close = l == r || (l != 0.0 && ((l - r) / l).abs() <= NUM_EQUALITY_RATIO);
            return Trilean::from_bool(close);
        }
    }
    if matches!(left, Value::Boolean(_)) || matches!(right, Value::Boolean(_)) {
        return trilean_pair_eq(left, right);
    }
    if let Some(result) = boolean_shortcut(left, right) {
        return result;
    }
    if std::mem::discriminant(left) != std::mem::discriminant(right) {
        return Trilean::Maybe;
    }
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            if a.is_empty() && b.is_empty() {
                return Trilean::True;
            }
            let score: f64 = a
                .iter()
                .zip(b.iter())
                .map(|(l, r)| trilean_score(approximate(l, r)))
                .sum();
            let ratio = score / a.len().max(b.len()) as f64;
            Trilean::from_bool(ratio > LIST_EQUALITY_RATIO)
        }
        (Value::Map(a), Value::Map(b)) => {
            if a.is_empty() && b.is_empty() {
                return Trilean::True;
            }
            let score: f64 = a
                .iter()
                .filter_map(|(key, l)| b.get(key).map(|r| trilean_score(approximate(l, r))))
                .sum();
            let union = a.len() + b.keys().filter(|k| !a.contains_key(*k)).count();
            Trilean::from_bool(score / union as f64 > MAP_EQUALITY_RATIO)
        }
        (Value::Function(a), Value::Function(b)) => {
            if a.body.is_empty() && b.body.is_empty() {
                return Trilean::True;
            }
            let matching = a
                .body
                .iter()
                .zip(b.body.iter())
                .filter(|(l, r)| l == r)
                .count();
            let ratio = matching as f64 / a.body.len().max(b.body.len()) as f64;
            if ratio > FUNCTION_EQUALITY_RATIO {
                Trilean::True
            } else {
                Trilean::Maybe
            }
        }
        (Value::Object(a), Value::Object(b)) => {
            let a_ns = a.namespace.borrow();
            let b_ns = b.namespace.borrow();
            if a_ns.is_empty() && b_ns.is_empty() {
                return Trilean::True;
            }
            let score: f64 = a_ns
                .iter()
                .filter_map(|(key, binding)| {
                    b_ns.get(key)
                        .map(|other| trilean_score(approximate(binding.current(), other.current())))
                })
                .sum();
            let union = a_ns.len() + b_ns.keys().filter(|k| !a_ns.contains_key(*k)).count();
            Trilean::from_bool(score / union as f64 > a.equality_ratio)
        }
        _ => Trilean::Maybe,
    }
}

/// Ordering for `<`/`>`. Only same-type pairs order, and only scalar or
/// length-bearing types have an ordering at all.
pub fn less_than(left: &Value, right: &Value, span: Span) -> Result<Trilean, EvalError> {
    if std::mem::discriminant(left) != std::mem::discriminant(right) {
        return Err(mixed_comparison(left, right, span));
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Trilean::from_bool(a < b)),
        (Value::Str(a), Value::Str(b)) => Ok(Trilean::from_bool(a < b)),
        (Value::Boolean(a), Value::Boolean(b)) => {
            if *a == Trilean::Maybe || *b == Trilean::Maybe {
                Ok(Trilean::Maybe)
            } else {
                Ok(Trilean::from_bool(*a == Trilean::False && *b == Trilean::True))
            }
        }
        (Value::Undefined, Value::Undefined) => Ok(Trilean::False),
        (Value::List(a), Value::List(b)) => Ok(Trilean::from_bool(a.len() < b.len())),
        (Value::Map(a), Value::Map(b)) => Ok(Trilean::from_bool(a.len() < b.len())),
        _ => Err(unordered_type(left, span)),
    }
}

/// Similarity of two strings in `[0, 1]`: one minus the normalized edit
/// distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / longest as f64
}

/// Two-row Levenshtein distance.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

fn coerce_number(value: &Value, span: Span) -> Result<f64, EvalError> {
    value
        .to_number()
        .ok_or_else(|| cannot_coerce_number(value, span))
}

/// Boolean-payload comparison: `maybe` on either side stays `maybe`.
fn trilean_pair_eq(left: &Value, right: &Value) -> Trilean {
    let l = left.to_trilean();
    let r = right.to_trilean();
    if l == Trilean::Maybe || r == Trilean::Maybe {
        Trilean::Maybe
    } else {
        Trilean::from_bool(l == r)
    }
}

/// Both sides coerce to the same concrete boolean: equal, no questions
/// asked.
fn boolean_shortcut(left: &Value, right: &Value) -> Option<Trilean> {
    let l = left.to_trilean();
    if l != Trilean::Maybe && l == right.to_trilean() {
        Some(Trilean::True)
    } else {
        None
    }
}

fn trilean_score(t: Trilean) -> f64 {
    match t {
        Trilean::True => 1.0,
        Trilean::Maybe => 0.5,
        Trilean::False => 0.0,
    }
}

#[cfg(test)]
mod tests;
