//! Keyword sentinels and native functions for the outermost scope.

use std::rc::Rc;

use rev_ir::KEYWORD_SPELLINGS;

use crate::environment::{Binding, ScopeStack};
use crate::print_handler::PrintHandler;
use crate::value::{NativeFn, Trilean, Value};

/// Bind every keyword spelling to its sentinel value.
///
/// Keywords are ordinary bindings; programs may shadow, rebind, or
/// delete them, and the statement resolver follows whatever they
/// currently mean.
pub fn install_keywords(scopes: &ScopeStack) {
    for spelling in KEYWORD_SPELLINGS {
        scopes.declare(spelling, Binding::name(Value::keyword(spelling)));
    }
}

/// Bind the boolean and undefined constants and the native functions.
pub fn install_natives(scopes: &ScopeStack, printer: &PrintHandler) {
    scopes.declare("true", Binding::name(Value::Boolean(Trilean::True)));
    scopes.declare("false", Binding::name(Value::Boolean(Trilean::False)));
    scopes.declare("maybe", Binding::name(Value::Boolean(Trilean::Maybe)));
    scopes.declare("undefined", Binding::name(Value::Undefined));

    let printer = printer.clone();
    declare_native(scopes, "print", 1, move |args| {
        let line = args.first().map_or_else(String::new, Value::to_text);
        printer.println(&line);
        Ok(Value::Undefined)
    });

    declare_native(scopes, "len", 1, |args| match args.first() {
        Some(Value::List(values)) => Ok(Value::Number(values.len() as f64)),
        Some(Value::Str(s)) => Ok(Value::Number(s.chars().count() as f64)),
        Some(Value::Map(entries)) => Ok(Value::Number(entries.len() as f64)),
        Some(other) => Err(format!("len expects a list, string, or map, got a {}", other.type_name())),
        None => Err("len expects one argument".to_string()),
    });

    declare_native(scopes, "not", 1, |args| match args.first() {
        Some(value) => Ok(Value::Boolean(value.to_trilean().not())),
        None => Err("not expects one argument".to_string()),
    });

    declare_native(scopes, "string", 1, |args| {
        Ok(Value::string(args.first().map_or_else(String::new, Value::to_text)))
    });

    declare_native(scopes, "number", 1, |args| match args.first() {
        Some(value) => value
            .to_number()
            .map(Value::Number)
            .ok_or_else(|| format!("cannot coerce a {} to a number", value.type_name())),
        None => Err("number expects one argument".to_string()),
    });

    declare_native(scopes, "boolean", 1, |args| match args.first() {
        Some(value) => Ok(Value::Boolean(value.to_trilean())),
        None => Err("boolean expects one argument".to_string()),
    });
}

fn declare_native(
    scopes: &ScopeStack,
    name: &str,
    arity: usize,
    call: impl Fn(&[Value]) -> Result<Value, String> + 'static,
) {
    scopes.declare(
        name,
        Binding::name(Value::Builtin(Rc::new(NativeFn {
            name: name.to_string(),
            arity,
            call: Box::new(call),
        }))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::print_handler::buffer_handler;
    use crate::value::Trilean;

    fn call(scopes: &ScopeStack, name: &str, args: &[Value]) -> Result<Value, String> {
        match scopes.read(name) {
            Some(Value::Builtin(native)) => (native.call)(args),
            other => panic!("{name} is not a native: {other:?}"),
        }
    }

    #[test]
    fn keywords_land_as_sentinels() {
        let scopes = ScopeStack::new();
        install_keywords(&scopes);
        assert_eq!(scopes.read("if"), Some(Value::keyword("if")));
        assert_eq!(scopes.read("className"), Some(Value::keyword("className")));
    }

    #[test]
    fn natives_coerce_and_print() {
        let scopes = ScopeStack::new();
        let (printer, buffer) = buffer_handler();
        install_natives(&scopes, &printer);

        assert_eq!(
            call(&scopes, "len", &[Value::string("four")]),
            Ok(Value::Number(4.0))
        );
        assert_eq!(
            call(&scopes, "not", &[Value::Number(0.0)]),
            Ok(Value::Boolean(Trilean::True))
        );
        assert_eq!(
            call(&scopes, "number", &[Value::string("2.5")]),
            Ok(Value::Number(2.5))
        );
        assert!(call(&scopes, "number", &[Value::list(vec![])]).is_err());

        call(&scopes, "print", &[Value::Number(3.0)]).unwrap();
        assert_eq!(&*buffer.borrow(), "3\n");
    }
}
