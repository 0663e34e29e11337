//! Tokens: the tokenizer's output interface.
//!
//! Whitespace is semantically significant in Reverie, so the tokenizer
//! must emit explicit whitespace tokens; the expression tree builder
//! measures their widths to recover structure.

use crate::Span;

/// Kind of a source token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier (names and keyword identifiers alike — keywords are
    /// ordinary rebindable names in Reverie).
    Name,
    /// Numeric literal.
    Number,
    /// String literal (text carries the unquoted content).
    Str,
    /// `[`
    LSquare,
    /// `]`
    RSquare,
    /// Operator spelling (`+`, `==`, `,`, ...).
    Operator,
    /// A run of horizontal whitespace. Width = `text.len()`.
    Whitespace,
}

/// A source token: kind, verbatim text, and position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whether this is a whitespace token.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Width of a whitespace token, 0 for anything else.
    #[inline]
    pub fn whitespace_width(&self) -> usize {
        if self.is_whitespace() {
            self.text.len()
        } else {
            0
        }
    }

    /// Whether this token can begin a value: a name, a string, or the
    /// opening bracket of a list literal.
    #[inline]
    pub fn starts_value(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Name | TokenKind::Str | TokenKind::Number | TokenKind::LSquare
        )
    }
}
