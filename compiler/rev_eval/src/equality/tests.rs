//! Tests for the equality ladder.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rev_ir::Span;

use super::*;
use crate::value::{FunctionValue, ObjectValue, Trilean, Value, OBJECT_EQUALITY_RATIO};

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(std::rc::Rc::new(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect(),
    ))
}

#[test]
fn identity_distinguishes_copies() {
    let list = Value::list(vec![num(1.0)]);
    assert_eq!(identity(&list, &list.clone()), Trilean::True);
    assert_eq!(identity(&list, &list.deep_copy()), Trilean::False);
    // Scalars compare by payload.
    assert_eq!(identity(&num(2.0), &num(2.0)), Trilean::True);
}

#[test]
fn structural_compares_shape() {
    let a = Value::list(vec![num(1.0), Value::string("x")]);
    let b = Value::list(vec![num(1.0), Value::string("x")]);
    assert_eq!(structural(&a, &b), Trilean::True);
    assert_eq!(structural(&a, &Value::list(vec![num(1.0)])), Trilean::False);
    // Type mismatch is concrete false at this tier.
    assert_eq!(structural(&num(1.0), &Value::string("1")), Trilean::False);
    assert_eq!(structural(&Value::Undefined, &Value::Undefined), Trilean::True);
}

#[test]
fn loose_coerces_strings_then_numbers() {
    let span = Span::DUMMY;
    assert_eq!(loose(&num(1.0), &Value::string("1"), span), Ok(Trilean::True));
    assert_eq!(
        loose(&Value::Boolean(Trilean::Maybe), &num(0.5), span),
        Ok(Trilean::True)
    );
    assert_eq!(loose(&Value::Undefined, &num(0.0), span), Ok(Trilean::True));
    // A number against something with no numeric reading is fatal.
    assert!(loose(&num(1.0), &Value::list(vec![]), span).is_err());
}

#[test]
fn loose_maps_compare_over_key_intersection_only() {
    let a = map(&[("x", num(1.0)), ("y", num(2.0))]);
    let b = map(&[("x", num(1.0)), ("z", num(9.0))]);
    // `y` and `z` are outside the intersection, so they never disagree.
    assert_eq!(loose(&a, &b, Span::DUMMY), Ok(Trilean::True));
}

#[test]
fn loose_truthy_composites_shortcut_to_true() {
    let a = Value::list(vec![num(1.0), num(2.0)]);
    let b = Value::list(vec![num(9.0)]);
    // Both coerce to a concrete true, so the elements are never read.
    assert_eq!(loose(&a, &b, Span::DUMMY), Ok(Trilean::True));
}

#[test]
fn approximate_strings_score_by_similarity() {
    let a = Value::string("kitten");
    let b = Value::string("kittens");
    assert_eq!(approximate(&a, &b), Trilean::True);
    assert_eq!(
        approximate(&Value::string("kitten"), &Value::string("orange")),
        Trilean::False
    );
}

#[test]
fn approximate_numbers_use_relative_difference() {
    assert_eq!(approximate(&num(100.0), &num(109.0)), Trilean::True);
    assert_eq!(approximate(&num(100.0), &num(91.0)), Trilean::True);
    assert_eq!(approximate(&num(100.0), &num(120.0)), Trilean::False);
    // Zero only approximates itself.
    assert_eq!(approximate(&num(0.0), &num(0.001)), Trilean::False);
    assert_eq!(approximate(&num(0.0), &num(0.0)), Trilean::True);
}

#[test]
fn approximate_functions_never_concretely_differ() {
    let f = Value::Function(std::rc::Rc::new(FunctionValue {
        params: vec!["x".to_string()],
        body: vec![],
        is_async: false,
    }));
    let g = Value::Function(std::rc::Rc::new(FunctionValue {
        params: vec!["y".to_string()],
        body: vec![],
        is_async: true,
    }));
    // Both bodies empty: trivially equal.
    assert_eq!(approximate(&f, &g), Trilean::True);
}

#[test]
fn approximate_objects_use_their_class_ratio() {
    let make = |hp: f64, ratio: f64| {
        let ns = crate::environment::ScopeHandle::new();
        ns.borrow_mut().insert(
            "hp".to_string(),
            crate::environment::Binding::name(num(hp)),
        );
        ns.borrow_mut().insert(
            "mp".to_string(),
            crate::environment::Binding::name(num(3.0)),
        );
        Value::Object(std::rc::Rc::new(ObjectValue {
            class_name: "Player".to_string(),
            namespace: ns,
            equality_ratio: ratio,
        }))
    };
    // One of two fields agrees: score 0.5 clears 0.4 but not 0.6.
    let a = make(10.0, OBJECT_EQUALITY_RATIO);
    let b = make(99.0, OBJECT_EQUALITY_RATIO);
    assert_eq!(approximate(&a, &b), Trilean::False);
    let c = make(10.0, 0.4);
    let d = make(99.0, 0.4);
    assert_eq!(approximate(&c, &d), Trilean::True);
}

#[test]
fn ordering_requires_matching_types() {
    let span = Span::DUMMY;
    assert_eq!(less_than(&num(1.0), &num(2.0), span), Ok(Trilean::True));
    assert_eq!(
        less_than(&Value::string("a"), &Value::string("b"), span),
        Ok(Trilean::True)
    );
    assert_eq!(
        less_than(
            &Value::Boolean(Trilean::Maybe),
            &Value::Boolean(Trilean::True),
            span
        ),
        Ok(Trilean::Maybe)
    );
    assert_eq!(
        less_than(
            &Value::list(vec![]),
            &Value::list(vec![num(1.0)]),
            span
        ),
        Ok(Trilean::True)
    );
    assert!(less_than(&num(1.0), &Value::string("2"), span).is_err());
    assert!(less_than(&Value::keyword("if"), &Value::keyword("if"), span).is_err());
}

#[test]
fn similarity_is_normalized_edit_distance() {
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(similarity("abc", "abc"), 1.0);
    assert_eq!(similarity("abc", "xyz"), 0.0);
    let s = similarity("kitten", "sitting");
    assert!((s - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
}

proptest! {
    #[test]
    fn approximate_numbers_within_a_tenth_agree(base in -1e6f64..1e6, wobble in -0.09f64..0.09) {
        prop_assume!(base.abs() > 1e-6);
        let shifted = base - base * wobble;
        prop_assert_eq!(approximate(&num(base), &num(shifted)), Trilean::True);
    }

    #[test]
    fn structural_equality_is_reflexive_for_numbers(n in proptest::num::f64::NORMAL) {
        prop_assert_eq!(structural(&num(n), &num(n)), Trilean::True);
    }

    #[test]
    fn similarity_stays_in_unit_interval(a in ".{0,12}", b in ".{0,12}") {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }
}
