//! Line number to byte offset index.

/// Byte offset of the first character of each line, keyed by `line - 1`.
///
/// Always holds at least one entry: an empty store still has line 1 at
/// offset 0, and text ending in `\n` has a trailing empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { offsets: vec![0] }
    }
}

impl LineIndex {
    /// Build an index from scratch by scanning for `\n` terminators.
    pub fn scan(text: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(pos, _)| pos + 1),
        );
        Self { offsets }
    }

    /// Number of indexed lines (terminators + 1).
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// Byte offset of 1-based `line`, if indexed.
    pub fn offset(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|idx| self.offsets.get(idx))
            .copied()
    }

    pub fn contains(&self, line: usize) -> bool {
        self.offset(line).is_some()
    }
}
