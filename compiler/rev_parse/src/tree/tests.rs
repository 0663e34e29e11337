//! Tests for the whitespace-width expression tree builder.

use pretty_assertions::assert_eq;

use rev_ir::{ExprTree, Operator};

use crate::testing::tokens;
use crate::tree::build_expression_tree;

fn build(source: &str) -> ExprTree {
    match build_expression_tree(&tokens(source)) {
        Ok(tree) => tree,
        Err(err) => panic!("parse of {source:?} failed: {err}"),
    }
}

fn leaf_text(tree: &ExprTree) -> &str {
    match tree {
        ExprTree::Value(tok) => &tok.text,
        other => panic!("expected value leaf, got {other:?}"),
    }
}

#[test]
fn lone_token_is_a_value_leaf() {
    assert_eq!(leaf_text(&build("x")), "x");
    assert_eq!(leaf_text(&build("  42 ")), "42");
}

#[test]
fn widest_gap_splits_loosest() {
    // 2 * 1+3 groups the tight addition under the loose multiplication.
    let tree = build("2 * 1+3");
    let ExprTree::Expression {
        left, right, op, ..
    } = tree
    else {
        panic!("expected binary split");
    };
    assert_eq!(op, Operator::Mul);
    assert_eq!(leaf_text(&left), "2");
    let ExprTree::Expression {
        left: add_l,
        right: add_r,
        op: add_op,
        ..
    } = *right
    else {
        panic!("expected inner addition");
    };
    assert_eq!(add_op, Operator::Add);
    assert_eq!(leaf_text(&add_l), "1");
    assert_eq!(leaf_text(&add_r), "3");
}

#[test]
fn wide_operator_outbinds_call_comma() {
    // The two-space + binds looser than the one-space comma, so the call
    // stays on the left: func(a, b) + c.
    let tree = build("func a, b  +  c");
    let ExprTree::Expression {
        left, right, op, ..
    } = tree
    else {
        panic!("expected binary split");
    };
    assert_eq!(op, Operator::Add);
    assert_eq!(leaf_text(&right), "c");
    let ExprTree::Function { name, args } = *left else {
        panic!("expected call on the left");
    };
    assert_eq!(name.text, "func");
    assert_eq!(args.len(), 2);
    assert_eq!(leaf_text(&args[0]), "a");
    assert_eq!(leaf_text(&args[1]), "b");
}

#[test]
fn tight_addition_stays_one_argument() {
    // func a, b+c keeps b+c as the single second argument.
    let tree = build("func a, b+c");
    let ExprTree::Function { name, args } = tree else {
        panic!("expected call");
    };
    assert_eq!(name.text, "func");
    assert_eq!(args.len(), 2);
    assert_eq!(leaf_text(&args[0]), "a");
    let ExprTree::Expression { op, .. } = &args[1] else {
        panic!("expected addition argument");
    };
    assert_eq!(*op, Operator::Add);
}

#[test]
fn single_argument_call_needs_the_widest_gap() {
    let tree = build("func  a + b");
    let ExprTree::Function { name, args } = tree else {
        panic!("expected call");
    };
    assert_eq!(name.text, "func");
    assert_eq!(args.len(), 1);
    let ExprTree::Expression { op, .. } = &args[0] else {
        panic!("expected addition argument");
    };
    assert_eq!(*op, Operator::Add);
}

#[test]
fn calls_curry_rightward() {
    // a b c has no commas, so each name claims the rest: a(b(c)).
    let tree = build("a b c");
    let ExprTree::Function { name, args } = tree else {
        panic!("expected call");
    };
    assert_eq!(name.text, "a");
    assert_eq!(args.len(), 1);
    let ExprTree::Function {
        name: inner,
        args: inner_args,
    } = &args[0]
    else {
        panic!("expected inner call");
    };
    assert_eq!(inner.text, "b");
    assert_eq!(leaf_text(&inner_args[0]), "c");
}

#[test]
fn list_literals_split_on_matching_commas() {
    let ExprTree::List(elems) = build("[1, 2, 3]") else {
        panic!("expected list");
    };
    assert_eq!(elems.len(), 3);
    assert_eq!(leaf_text(&elems[2]), "3");

    // Padded brackets: commas must match the inner width.
    let ExprTree::List(elems) = build("[ 1 , 2 ]") else {
        panic!("expected list");
    };
    assert_eq!(elems.len(), 2);
}

#[test]
fn nested_lists_keep_their_own_commas() {
    let ExprTree::List(elems) = build("[[1, 2], 3]") else {
        panic!("expected list");
    };
    assert_eq!(elems.len(), 2);
    let ExprTree::List(inner) = &elems[0] else {
        panic!("expected inner list");
    };
    assert_eq!(inner.len(), 2);
    assert_eq!(leaf_text(&elems[1]), "3");
}

#[test]
fn single_element_list() {
    let ExprTree::List(elems) = build("[7]") else {
        panic!("expected list");
    };
    assert_eq!(elems.len(), 1);
    assert_eq!(leaf_text(&elems[0]), "7");
}

#[test]
fn index_access_scans_backward() {
    let ExprTree::Index { base, index } = build("scores[0]") else {
        panic!("expected index");
    };
    assert_eq!(leaf_text(&base), "scores");
    assert_eq!(leaf_text(&index), "0");

    // Chained: the outermost bracket pair indexes the rest.
    let ExprTree::Index { base, .. } = build("[1, 2][0]") else {
        panic!("expected index");
    };
    assert!(matches!(*base, ExprTree::List(_)));
}

#[test]
fn tabs_are_fatal() {
    let err = build_expression_tree(&tokens("a +\tb")).unwrap_err();
    assert!(err.message.contains("tabs"), "{}", err.message);
}

#[test]
fn unequal_operator_whitespace_is_fatal() {
    let err = build_expression_tree(&tokens("a +  b")).unwrap_err();
    assert!(err.message.contains("equal on either side"), "{}", err.message);
}

#[test]
fn trailing_operator_is_fatal() {
    let err = build_expression_tree(&tokens("a +")).unwrap_err();
    assert!(err.message.contains("end of an expression"), "{}", err.message);
}

#[test]
fn empty_run_is_fatal() {
    let err = build_expression_tree(&[]).unwrap_err();
    assert!(err.token.is_none());
}

#[test]
fn leftover_tokens_are_fatal() {
    // Strings cannot head a call, so a second value has nowhere to go.
    let err = build_expression_tree(&tokens("\"x\" \"y\"")).unwrap_err();
    assert!(err.message.contains("single name or value"), "{}", err.message);
}

#[test]
fn list_bracket_padding_must_match() {
    let err = build_expression_tree(&tokens("[ 1, 2]")).unwrap_err();
    assert!(err.message.contains("bracket"), "{}", err.message);
}
