//! Line/column lookup for spans.

/// Pre-computed line offset table for line/column lookup.
///
/// Scans the source once for newlines, then answers offset queries by
/// binary search.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        match self.offsets.binary_search(&offset) {
            Ok(idx) => (idx + 1) as u32,
            Err(idx) => idx as u32,
        }
    }

    /// 1-based (line, column) for `offset`.
    #[inline]
    pub fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets[(line - 1) as usize];
        (line, offset - line_start + 1)
    }

    /// Byte range of the given 1-based line within `source`.
    pub fn line_range(&self, source: &str, line: u32) -> (usize, usize) {
        let start = self.offsets[(line - 1) as usize] as usize;
        let end = self
            .offsets
            .get(line as usize)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_col_lookup() {
        let source = "line1\nline2\nline3";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(0), (1, 1));
        assert_eq!(table.offset_to_line_col(6), (2, 1));
        assert_eq!(table.offset_to_line_col(9), (2, 4));
        assert_eq!(table.offset_to_line_col(12), (3, 1));
    }

    #[test]
    fn line_range_excludes_newline() {
        let source = "ab\ncdef\ng";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_range(source, 1), (0, 2));
        assert_eq!(table.line_range(source, 2), (3, 7));
        assert_eq!(table.line_range(source, 3), (8, 9));
    }
}
