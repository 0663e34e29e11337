//! Rev Eval - Tree-walking evaluator for the Reverie language.
//!
//! Reverie's defining quirks all live here:
//!
//! - **Runtime keywords.** Keywords are ordinary bindings; every
//!   statement is disambiguated against the live scopes immediately
//!   before it executes (see [`resolver`]).
//! - **Four-tier equality.** `====`, `===`, `==`, and `=` trade
//!   strictness for fuzziness (see [`equality`]).
//! - **Tri-state booleans.** `true`, `false`, and `maybe`; a
//!   double-`maybe` resolves by an injectable coin flip (see [`coin`]).
//! - **Temporal values.** `next x` parks its statement until `x` gains
//!   a revision; `await next x` polls the cooperative async queue in
//!   place (see [`Interpreter`]).
//!
//! The expression grammar is handled by `rev_parse`; this crate owns
//! values, scopes, operators, statement resolution, and the scheduler.

pub mod builtins;
pub mod coin;
pub mod environment;
pub mod equality;
pub mod errors;
mod interpreter;
pub mod operators;
pub mod print_handler;
pub mod resolver;
pub mod value;

pub use errors::{EvalError, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use print_handler::{buffer_handler, PrintHandler};
pub use value::{Trilean, Value};
