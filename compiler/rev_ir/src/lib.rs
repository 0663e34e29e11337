//! Rev IR - Shared IR types for the Reverie interpreter.
//!
//! This crate holds the data types that flow between the interpreter's
//! phases: source spans, tokens (the tokenizer's output interface),
//! binary operators, expression-tree nodes, and candidate statements
//! (the statement grammar's output interface).
//!
//! The tokenizer and the statement grammar themselves live outside this
//! workspace; these types define the contract they must produce. The
//! grammar is ambiguous by design — keywords are ordinary, rebindable
//! identifiers — so each source statement arrives as an ordered tuple of
//! [`Stmt`] candidates that the evaluator disambiguates at runtime.

mod expr;
mod keyword;
mod span;
mod stmt;
mod token;

pub use expr::{ExprTree, Operator};
pub use keyword::{is_function_spelling, KEYWORD_SPELLINGS};
pub use span::Span;
pub use stmt::{
    AfterStatement, Body, Candidates, ClassDeclaration, Conditional, DeleteStatement, ExprSlot,
    ExpressionStatement, FunctionDefinition, ReturnStatement, Stmt, VariableAssignment,
    VariableDeclaration, WhenStatement,
};
pub use token::{Token, TokenKind};
