//! Statement disambiguation against the live keyword bindings.
//!
//! Keywords are ordinary bindings, so what a statement *means* can only
//! be decided at execution time: each source statement arrives as an
//! ordered tuple of candidate interpretations, and the first candidate
//! whose keyword slots all resolve to keyword sentinels with the
//! expected spellings wins. Assignment and bare-expression readings are
//! fallbacks, tried in that order.

use tracing::debug;

use rev_ir::{is_function_spelling, Candidates, Stmt, Token};

use crate::environment::ScopeStack;
use crate::errors::{no_candidate_matched, EvalError};
use crate::value::Value;

/// Pick the one interpretation of a statement that holds under the
/// current scopes.
pub fn resolve_statement<'a>(
    candidates: &'a Candidates,
    scopes: &ScopeStack,
) -> Result<&'a Stmt, EvalError> {
    for stmt in candidates.iter() {
        if keyword_slots_hold(stmt, scopes) {
            debug!(statement = stmt_kind(stmt), "statement resolved");
            return Ok(stmt);
        }
    }
    for stmt in candidates.iter() {
        if let Stmt::VariableAssignment(_) = stmt {
            debug!("statement resolved as assignment fallback");
            return Ok(stmt);
        }
    }
    for stmt in candidates.iter() {
        if let Stmt::Expression(_) = stmt {
            debug!("statement resolved as expression fallback");
            return Ok(stmt);
        }
    }
    let span = candidates
        .iter()
        .next()
        .map_or(rev_ir::Span::DUMMY, |stmt| stmt.head_token().span);
    Err(no_candidate_matched(span))
}

/// Whether every keyword slot of this candidate resolves as required.
fn keyword_slots_hold(stmt: &Stmt, scopes: &ScopeStack) -> bool {
    match stmt {
        Stmt::Conditional(s) => slot_is(scopes, &s.keyword, &["if"]),
        Stmt::When(s) => slot_is(scopes, &s.keyword, &["when"]),
        Stmt::After(s) => slot_is(scopes, &s.keyword, &["after"]),
        Stmt::ClassDeclaration(s) => slot_is(scopes, &s.keyword, &["class", "className"]),
        Stmt::Return(s) => slot_is(scopes, &s.keyword, &["return"]),
        Stmt::Delete(s) => slot_is(scopes, &s.keyword, &["delete"]),
        Stmt::FunctionDefinition(s) => {
            let function_slot_ok = keyword_spelling(scopes, &s.keywords[0])
                .is_some_and(|spelling| is_function_spelling(&spelling));
            match s.keywords.len() {
                1 => function_slot_ok,
                2 => function_slot_ok && slot_is(scopes, &s.keywords[1], &["async"]),
                _ => false,
            }
        }
        Stmt::VariableDeclaration(s) => match s.modifiers.len() {
            2 => s
                .modifiers
                .iter()
                .all(|m| slot_is(scopes, m, &["const", "var"])),
            3 => s.modifiers.iter().all(|m| slot_is(scopes, m, &["const"])),
            _ => false,
        },
        // Fallback readings have no keyword slots.
        Stmt::VariableAssignment(_) | Stmt::Expression(_) => false,
    }
}

/// The keyword sentinel a token resolves to, if any.
fn keyword_spelling(scopes: &ScopeStack, token: &Token) -> Option<String> {
    match scopes.read(&token.text) {
        Some(Value::Keyword(spelling)) => Some(spelling.to_string()),
        _ => None,
    }
}

fn slot_is(scopes: &ScopeStack, token: &Token, expected: &[&str]) -> bool {
    keyword_spelling(scopes, token).is_some_and(|spelling| expected.contains(&spelling.as_str()))
}

fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Conditional(_) => "conditional",
        Stmt::When(_) => "when",
        Stmt::After(_) => "after",
        Stmt::ClassDeclaration(_) => "class",
        Stmt::Return(_) => "return",
        Stmt::Delete(_) => "delete",
        Stmt::FunctionDefinition(_) => "function definition",
        Stmt::VariableDeclaration(_) => "variable declaration",
        Stmt::VariableAssignment(_) => "assignment",
        Stmt::Expression(_) => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::SmallVec;

    use rev_parse::testing::name;
    use rev_ir::{Conditional, ExprSlot, ExpressionStatement, FunctionDefinition, WhenStatement};

    use crate::builtins::install_keywords;
    use crate::environment::{Binding, ScopeStack};

    fn scopes_with_keywords() -> ScopeStack {
        let scopes = ScopeStack::new();
        install_keywords(&scopes);
        scopes
    }

    fn conditional_or_when(keyword: &str) -> Candidates {
        let condition = ExprSlot::Tokens(vec![name("x")]);
        Candidates(SmallVec::from_iter([
            Stmt::Conditional(Conditional {
                keyword: name(keyword),
                condition: condition.clone(),
                body: vec![],
                else_body: None,
            }),
            Stmt::When(WhenStatement {
                keyword: name(keyword),
                watched: name("x"),
                condition,
                body: vec![],
            }),
        ]))
    }

    #[test]
    fn keyword_slots_pick_the_matching_candidate() {
        let scopes = scopes_with_keywords();
        let candidates = conditional_or_when("if");
        let resolved = resolve_statement(&candidates, &scopes).unwrap();
        assert!(matches!(resolved, Stmt::Conditional(_)));
    }

    #[test]
    fn rebinding_a_keyword_flips_resolution() {
        let scopes = scopes_with_keywords();
        // `if` now means `when`: same source, different statement.
        scopes.declare("if", Binding::name(crate::value::Value::keyword("when")));
        let candidates = conditional_or_when("if");
        let resolved = resolve_statement(&candidates, &scopes).unwrap();
        assert!(matches!(resolved, Stmt::When(_)));
    }

    #[test]
    fn flexible_function_spellings_resolve() {
        let scopes = scopes_with_keywords();
        for spelling in ["function", "func", "fn", "union", "functi"] {
            let candidates = Candidates::single(Stmt::FunctionDefinition(FunctionDefinition {
                keywords: SmallVec::from_iter([name(spelling)]),
                name: name("f"),
                params: vec![],
                body: vec![],
            }));
            assert!(
                resolve_statement(&candidates, &scopes).is_ok(),
                "{spelling} should resolve as a function keyword"
            );
        }
    }

    #[test]
    fn expression_fallback_wins_when_no_keyword_matches() {
        let scopes = scopes_with_keywords();
        let candidates = Candidates(SmallVec::from_iter([
            Stmt::Conditional(Conditional {
                keyword: name("greet"),
                condition: ExprSlot::Tokens(vec![name("x")]),
                body: vec![],
                else_body: None,
            }),
            Stmt::Expression(ExpressionStatement {
                token: name("greet"),
                expression: ExprSlot::Tokens(vec![name("greet")]),
            }),
        ]));
        let resolved = resolve_statement(&candidates, &scopes).unwrap();
        assert!(matches!(resolved, Stmt::Expression(_)));
    }

    #[test]
    fn unresolvable_statements_are_fatal() {
        let scopes = scopes_with_keywords();
        let candidates = conditional_or_when("banana");
        let err = resolve_statement(&candidates, &scopes).unwrap_err();
        assert_eq!(
            err.message,
            "statement matches no interpretation under the current keywords"
        );
    }
}
