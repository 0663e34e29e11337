//! Runtime values and coercions.
//!
//! Every read out of a namespace hands back a deep copy, so values are
//! cheap-to-clone `Rc` wrappers around their payloads; [`Value::deep_copy`]
//! is the only place fresh allocations happen. Identity (the `====` tier)
//! is `Rc` pointer identity for composites and payload equality for
//! scalars.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rev_ir::Body;

use crate::environment::{Scope, ScopeHandle};

/// Tolerance used for integer detection and zero checks on numbers.
pub const EPSILON: f64 = 1e-9;

/// Default approximate-equality threshold for object comparison.
pub const OBJECT_EQUALITY_RATIO: f64 = 0.6;

/// Tri-state boolean: `true`, `false`, or `maybe`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Trilean {
    True,
    False,
    Maybe,
}

impl Trilean {
    /// Lift a two-valued bool.
    pub fn from_bool(b: bool) -> Trilean {
        if b {
            Trilean::True
        } else {
            Trilean::False
        }
    }

    /// Tri-state negation: `maybe` stays `maybe`.
    pub fn not(self) -> Trilean {
        match self {
            Trilean::True => Trilean::False,
            Trilean::False => Trilean::True,
            Trilean::Maybe => Trilean::Maybe,
        }
    }

    /// Whether this is the concrete `true`.
    pub fn is_true(self) -> bool {
        self == Trilean::True
    }

    pub fn spelling(self) -> &'static str {
        match self {
            Trilean::True => "true",
            Trilean::False => "false",
            Trilean::Maybe => "maybe",
        }
    }
}

/// A user-defined function value.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: Body,
    pub is_async: bool,
}

/// A native (host-provided) function.
///
/// Natives report failures as plain messages; the call site attaches the
/// span and turns them into evaluation errors.
pub struct NativeFn {
    pub name: String,
    pub arity: usize,
    #[allow(clippy::type_complexity)]
    pub call: Box<dyn Fn(&[Value]) -> Result<Value, String>>,
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A class instance: a named namespace of field bindings.
#[derive(Debug)]
pub struct ObjectValue {
    pub class_name: String,
    pub namespace: ScopeHandle,
    /// Approximate-equality threshold for instances of this class.
    pub equality_ratio: f64,
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Number(f64),
    Str(Rc<str>),
    Boolean(Trilean),
    Undefined,
    List(Rc<Vec<Value>>),
    Map(Rc<BTreeMap<String, Value>>),
    Object(Rc<ObjectValue>),
    Function(Rc<FunctionValue>),
    Builtin(Rc<NativeFn>),
    /// A keyword sentinel; the payload is the canonical spelling the
    /// statement resolver matches against.
    Keyword(Rc<str>),
}

impl Value {
    pub fn string(text: impl Into<String>) -> Value {
        Value::Str(Rc::from(text.into()))
    }

    pub fn keyword(spelling: &str) -> Value {
        Value::Keyword(Rc::from(spelling))
    }

    pub fn list(values: Vec<Value>) -> Value {
        Value::List(Rc::new(values))
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Undefined => "undefined",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Keyword(_) => "keyword",
        }
    }

    /// Whether a number is integral within [`EPSILON`].
    pub fn is_int(n: f64) -> bool {
        (n - n.round()).abs() < EPSILON
    }

    /// String coercion. Total: every value has a spelling.
    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Str(s) => s.to_string(),
            Value::Boolean(b) => b.spelling().to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::List(values) => {
                let parts: Vec<String> = values.iter().map(Value::to_text).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.to_text()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Object(obj) => format!("<{} instance>", obj.class_name),
            Value::Function(_) => "<function>".to_string(),
            Value::Builtin(f) => format!("<builtin {}>", f.name),
            Value::Keyword(s) => s.to_string(),
        }
    }

    /// Numeric coercion. `None` when the value has no numeric reading.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(Trilean::True) => Some(1.0),
            Value::Boolean(Trilean::False) => Some(0.0),
            Value::Boolean(Trilean::Maybe) => Some(0.5),
            Value::Undefined => Some(0.0),
            _ => None,
        }
    }

    /// Boolean coercion. Total. Values with no meaningful truthiness
    /// (objects, functions, natives) coerce to `maybe`.
    pub fn to_trilean(&self) -> Trilean {
        match self {
            Value::Number(n) => Trilean::from_bool(n.abs() >= EPSILON),
            Value::Str(s) => Trilean::from_bool(!s.is_empty()),
            Value::Boolean(b) => *b,
            Value::Undefined => Trilean::False,
            Value::List(values) => Trilean::from_bool(!values.is_empty()),
            Value::Map(entries) => Trilean::from_bool(!entries.is_empty()),
            Value::Object(_) | Value::Function(_) | Value::Builtin(_) => Trilean::Maybe,
            Value::Keyword(_) => Trilean::True,
        }
    }

    /// The copy handed out on every namespace read.
    ///
    /// Composites get fresh allocations all the way down, so mutation
    /// through one read can never alias another. Strings, keywords and
    /// natives are immutable and keep sharing their payload, which also
    /// keeps them identical (`====`) to their source.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Number(_)
            | Value::Str(_)
            | Value::Boolean(_)
            | Value::Undefined
            | Value::Builtin(_)
            | Value::Keyword(_) => self.clone(),
            Value::List(values) => Value::List(Rc::new(values.iter().map(Value::deep_copy).collect())),
            Value::Map(entries) => Value::Map(Rc::new(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy()))
                    .collect(),
            )),
            Value::Object(obj) => {
                let copied: Scope = obj
                    .namespace
                    .borrow()
                    .iter()
                    .map(|(name, binding)| (name.clone(), binding.deep_copy()))
                    .collect();
                Value::Object(Rc::new(ObjectValue {
                    class_name: obj.class_name.clone(),
                    namespace: ScopeHandle::from_scope(copied),
                    equality_ratio: obj.equality_ratio,
                }))
            }
            Value::Function(f) => Value::Function(Rc::new(f.as_ref().clone())),
        }
    }

    /// Identity comparison (the `====` tier): payload equality for
    /// scalars, pointer identity for everything heap-allocated.
    pub fn identity_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Keyword(a), Value::Keyword(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Structural comparison, used by tests and internal bookkeeping. The
/// user-facing equality ladder lives in the `equality` module.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Undefined, Value::Undefined) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.class_name == b.class_name && scope_eq(&a.namespace, &b.namespace)
            }
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            _ => false,
        }
    }
}

fn scope_eq(a: &ScopeHandle, b: &ScopeHandle) -> bool {
    let a = a.borrow();
    let b = b.borrow();
    a.len() == b.len()
        && a.iter().all(|(name, binding)| {
            b.get(name)
                .is_some_and(|other| binding.current() == other.current())
        })
}

/// Numbers print without a fractional part when integral.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && Value::is_int(n) && n.abs() < 1e15 {
        format!("{}", n.round() as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_formatting_drops_integral_fractions() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(-0.25), "-0.25");
    }

    #[test]
    fn coercions_follow_the_tri_state_table() {
        assert_eq!(Value::Boolean(Trilean::Maybe).to_number(), Some(0.5));
        assert_eq!(Value::Undefined.to_number(), Some(0.0));
        assert_eq!(Value::string(" 4.5 ").to_number(), Some(4.5));
        assert_eq!(Value::string("four").to_number(), None);
        assert_eq!(Value::list(vec![]).to_number(), None);

        assert_eq!(Value::Number(0.0).to_trilean(), Trilean::False);
        assert_eq!(Value::string("").to_trilean(), Trilean::False);
        assert_eq!(Value::list(vec![Value::Undefined]).to_trilean(), Trilean::True);
    }

    #[test]
    fn deep_copy_breaks_identity_for_composites() {
        let original = Value::list(vec![Value::Number(1.0), Value::string("a")]);
        let copy = original.deep_copy();
        assert_eq!(original, copy);
        assert!(!original.identity_eq(&copy));

        // Scalars and strings stay identical through a copy.
        let s = Value::string("shared");
        assert!(s.identity_eq(&s.deep_copy()));
        let n = Value::Number(2.0);
        assert!(n.identity_eq(&n.deep_copy()));
    }

    #[test]
    fn trilean_negation_preserves_maybe() {
        assert_eq!(Trilean::Maybe.not(), Trilean::Maybe);
        assert_eq!(Trilean::True.not(), Trilean::False);
    }

    #[test]
    fn list_text_renders_elementwise() {
        let v = Value::list(vec![Value::Number(1.0), Value::string("x"), Value::Undefined]);
        assert_eq!(v.to_text(), "[1, x, undefined]");
    }
}
