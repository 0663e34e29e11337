//! Test support: token runs from source text.
//!
//! The production tokenizer lives outside this workspace; tests still
//! need token runs with explicit whitespace, so this module provides a
//! minimal scanner covering expression slots (names, numbers, strings,
//! brackets, operator spellings, space runs). ASCII sources only.

use rev_ir::{Span, Token, TokenKind};

/// Operator spellings, longest first so prefixes don't shadow.
const OPERATORS: &[&str] = &[
    ";====", ";===", ";==", "====", "===", "==", "<=", ">=", "&&", "||", "=", "+", "-", "*", "/",
    "^", ",", "<", ">",
];

/// Scan one expression slot into tokens, whitespace included.
pub fn tokens(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        let (kind, text) = if b == b' ' || b == b'\t' {
            while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                i += 1;
            }
            (TokenKind::Whitespace, source[start..i].to_string())
        } else if b == b'[' {
            i += 1;
            (TokenKind::LSquare, "[".to_string())
        } else if b == b']' {
            i += 1;
            (TokenKind::RSquare, "]".to_string())
        } else if b == b'"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            let text = source[start + 1..i].to_string();
            i = (i + 1).min(bytes.len());
            (TokenKind::Str, text)
        } else if b.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            (TokenKind::Number, source[start..i].to_string())
        } else if let Some(op) = OPERATORS
            .iter()
            .copied()
            .find(|op| source[i..].starts_with(*op))
        {
            i += op.len();
            (TokenKind::Operator, op.to_string())
        } else {
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
            {
                i += 1;
            }
            if i == start {
                i += 1;
            }
            (TokenKind::Name, source[start..i].to_string())
        };
        out.push(Token::new(kind, text, Span::new(start as u32, i as u32)));
    }
    out
}

/// A standalone name token (for keyword slots in hand-built statements).
pub fn name(text: &str) -> Token {
    Token::new(TokenKind::Name, text, Span::DUMMY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scans_kinds_and_widths() {
        let toks = tokens("func a,  [b] + \"hi\"");
        let kinds: Vec<TokenKind> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name,
                TokenKind::Whitespace,
                TokenKind::Name,
                TokenKind::Operator,
                TokenKind::Whitespace,
                TokenKind::LSquare,
                TokenKind::Name,
                TokenKind::RSquare,
                TokenKind::Whitespace,
                TokenKind::Operator,
                TokenKind::Whitespace,
                TokenKind::Str,
            ]
        );
        assert_eq!(toks[4].whitespace_width(), 2);
        assert_eq!(toks[11].text, "hi");
    }

    #[test]
    fn longest_operator_wins() {
        let toks = tokens("a ;=== b");
        assert_eq!(toks[2].text, ";===");
        let toks = tokens("a ==== b");
        assert_eq!(toks[2].text, "====");
    }
}
