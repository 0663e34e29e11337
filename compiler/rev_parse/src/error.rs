//! Parse failure type.

use std::fmt;

use rev_diagnostic::Diagnostic;
use rev_ir::{Span, Token};

/// A fatal parse failure, positioned at the offending token.
///
/// The token is `None` only for an empty token run, which has no
/// position to point at.
#[derive(Clone, PartialEq, Debug)]
pub struct ParseError {
    pub message: String,
    pub token: Option<Token>,
}

impl ParseError {
    /// Error positioned at a token.
    pub fn at(message: impl Into<String>, token: &Token) -> Self {
        ParseError {
            message: message.into(),
            token: Some(token.clone()),
        }
    }

    /// Error with no position (empty token run).
    pub fn unpositioned(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            token: None,
        }
    }

    /// Span of the offending token, if any.
    pub fn span(&self) -> Span {
        self.token.as_ref().map_or(Span::DUMMY, |t| t.span)
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.message.clone(), self.span())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
