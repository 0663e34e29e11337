//! Terminal rendering for diagnostics.
//!
//! Produces the position-annotated fatal report consumed by embedders:
//!
//! ```text
//! demo.rev:2:7: error: undefined name `frobnicate`
//!   const const x = frobnicate
//!                   ^^^^^^^^^^
//! ```

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// Render a diagnostic against its source.
///
/// The caret line underlines the offending token; spans that cross a
/// line boundary are underlined to the end of their first line.
pub fn render(source_name: &str, source_text: &str, diagnostic: &Diagnostic) -> String {
    let table = LineOffsetTable::build(source_text);
    let offset = diagnostic.span.start.min(source_text.len() as u32);
    let (line, col) = table.offset_to_line_col(offset);

    let mut out = format!(
        "{source_name}:{line}:{col}: {}: {}\n",
        diagnostic.severity, diagnostic.message
    );

    let (line_start, line_end) = table.line_range(source_text, line);
    let excerpt = &source_text[line_start..line_end];
    out.push_str("  ");
    out.push_str(excerpt);
    out.push('\n');

    let caret_offset = offset as usize - line_start;
    let span_len = diagnostic.span.len().max(1) as usize;
    let caret_len = span_len.min(line_end.saturating_sub(offset as usize).max(1));
    out.push_str("  ");
    for _ in 0..caret_offset {
        out.push(' ');
    }
    for _ in 0..caret_len {
        out.push('^');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rev_ir::Span;

    #[test]
    fn renders_position_and_caret() {
        let source = "first line\nsecond line";
        let diag = Diagnostic::error("something bad", Span::new(18, 22));
        let rendered = render("demo.rev", source, &diag);
        assert_eq!(
            rendered,
            "demo.rev:2:8: error: something bad\n  second line\n         ^^^^\n"
        );
    }

    #[test]
    fn clamps_span_past_end_of_source() {
        let source = "x";
        let diag = Diagnostic::error("ran off the end", Span::new(40, 45));
        let rendered = render("demo.rev", source, &diag);
        assert!(rendered.starts_with("demo.rev:1:2: error: ran off the end\n"));
    }
}
