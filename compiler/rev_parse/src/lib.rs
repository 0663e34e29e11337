//! Rev Parse - Expression tree builder for the Reverie interpreter.
//!
//! Reverie has no parentheses; expressions recover their structure from
//! the *width* of the whitespace around operators. The widest gap binds
//! loosest:
//!
//! ```text
//! func a, b  +  c   =>   func(a, b) + c
//! func a, b+c       =>   func(a, (b+c))     -- b+c stays one argument
//! 2 * 1+3           =>   2 * (1 + 3)
//! ```
//!
//! The statement-level grammar (an external collaborator) hands the
//! builder one flat token run per expression slot, whitespace tokens
//! included; [`build_expression_tree`] turns it into an [`rev_ir::ExprTree`]
//! or a positional fatal error.

mod error;
mod tree;

pub mod testing;

pub use error::ParseError;
pub use tree::build_expression_tree;
