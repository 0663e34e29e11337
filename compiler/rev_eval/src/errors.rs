//! Evaluation failure type and named constructors.
//!
//! Every fatal condition gets its own constructor so call sites stay
//! one-liners and messages stay consistent.

use std::fmt;

use rev_diagnostic::Diagnostic;
use rev_ir::Span;

use crate::value::Value;

/// A fatal evaluation failure, positioned in the source.
#[derive(Clone, PartialEq, Debug)]
pub struct EvalError {
    pub message: String,
    pub span: Span,
}

impl EvalError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        EvalError {
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone(), self.span)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

pub fn undefined_name(name: &str, span: Span) -> EvalError {
    EvalError::new(format!("name `{name}` is not defined"), span)
}

pub fn not_callable(value: &Value, span: Span) -> EvalError {
    EvalError::new(
        format!("attempted function call on a {} value", value.type_name()),
        span,
    )
}

pub fn too_many_arguments(name: &str, declared: usize, supplied: usize, span: Span) -> EvalError {
    EvalError::new(
        format!("`{name}` takes at most {declared} arguments, got {supplied}"),
        span,
    )
}

pub fn cannot_coerce_number(value: &Value, span: Span) -> EvalError {
    EvalError::new(
        format!("cannot coerce a {} to a number", value.type_name()),
        span,
    )
}

pub fn mixed_comparison(left: &Value, right: &Value, span: Span) -> EvalError {
    EvalError::new(
        format!(
            "cannot order a {} against a {}",
            left.type_name(),
            right.type_name()
        ),
        span,
    )
}

pub fn unordered_type(value: &Value, span: Span) -> EvalError {
    EvalError::new(
        format!("{} values have no ordering", value.type_name()),
        span,
    )
}

pub fn negative_base(span: Span) -> EvalError {
    EvalError::new(
        "cannot raise a negative base to a non-integer exponent",
        span,
    )
}

pub fn stray_comma(span: Span) -> EvalError {
    EvalError::new("comma is only valid inside a call or list", span)
}

pub fn no_candidate_matched(span: Span) -> EvalError {
    EvalError::new("statement matches no interpretation under the current keywords", span)
}

pub fn cannot_reassign(name: &str, span: Span) -> EvalError {
    EvalError::new(format!("`{name}` is immutable and cannot be reassigned"), span)
}

pub fn delete_undefined(name: &str, span: Span) -> EvalError {
    EvalError::new(format!("cannot delete `{name}`: it is not defined"), span)
}

pub fn await_needs_call(span: Span) -> EvalError {
    EvalError::new("`await` takes exactly one function call", span)
}

pub fn next_needs_name(span: Span) -> EvalError {
    EvalError::new("`next` takes exactly one variable name", span)
}

pub fn next_deadlock(name: &str, span: Span) -> EvalError {
    EvalError::new(
        format!("`await next {name}` can never resolve: no async work is pending"),
        span,
    )
}

pub fn class_body_statement(span: Span) -> EvalError {
    EvalError::new(
        "class bodies may only contain function and variable declarations",
        span,
    )
}

pub fn reserved_parameter(name: &str, span: Span) -> EvalError {
    EvalError::new(format!("`{name}` is a reserved parameter name"), span)
}

pub fn native_failure(message: &str, span: Span) -> EvalError {
    EvalError::new(message.to_string(), span)
}

pub fn index_out_of_bounds(index: f64, len: usize, span: Span) -> EvalError {
    EvalError::new(
        format!("index {index} is out of bounds for a list of length {len}"),
        span,
    )
}

pub fn non_integer_index(span: Span) -> EvalError {
    EvalError::new("list indices must be integers", span)
}

pub fn cannot_index(value: &Value, span: Span) -> EvalError {
    EvalError::new(format!("cannot index into a {}", value.type_name()), span)
}
