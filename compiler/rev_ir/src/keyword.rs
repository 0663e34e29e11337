//! Keyword spellings.
//!
//! Keywords are not reserved tokens: each spelling is an ordinary
//! identifier pre-bound to a keyword sentinel value in the outermost
//! scope. Rebinding one changes which statement shapes parse legally
//! from that point forward.

/// Spellings pre-bound to keyword sentinels at startup.
///
/// The function-definition spellings (`function`, `func`, `fn`, `fun`,
/// `functi`, `union`) are all accepted by [`is_function_spelling`]; the
/// table binds the common ones so programs can use them out of the box.
pub const KEYWORD_SPELLINGS: &[&str] = &[
    "if", "when", "after", "class", "className", "return", "delete", "function", "func", "fn",
    "fun", "functi", "union", "const", "var", "async", "await", "next",
];

/// Whether `spelling` is a legal flexible spelling of `function`.
///
/// Legal spellings are the non-empty in-order subsequences of the
/// letters `f u n c t i o n` — so `fn`, `func`, `functi`, and even
/// `union` qualify, while `fnuc` does not.
pub fn is_function_spelling(spelling: &str) -> bool {
    if spelling.is_empty() {
        return false;
    }
    let mut letters = "function".chars();
    'outer: for ch in spelling.chars() {
        for candidate in letters.by_ref() {
            if candidate == ch {
                continue 'outer;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_spellings() {
        for ok in ["function", "func", "fn", "fun", "functi", "union", "f"] {
            assert!(is_function_spelling(ok), "{ok} should be accepted");
        }
        for bad in ["", "fnuc", "functionn", "nf", "funcx"] {
            assert!(!is_function_spelling(bad), "{bad} should be rejected");
        }
    }
}
