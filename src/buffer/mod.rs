//! Line-indexed source buffer.
//!
//! `LineBuffer` owns a backing store plus a 1-based "current line" cursor.
//! Every mutation rewrites (or appends to, or truncates) the store and then
//! rescans it into a fresh [`LineIndex`]; the index is never patched in place,
//! so line numbers can never drift from what is actually on disk.

mod index;
mod store;

pub use index::LineIndex;
pub use store::{FileStore, LineStore, MemoryStore};

use crate::error::BufferError;
use tracing::{debug, trace};

/// Character that closes the generated program's `main` body.
pub const CLOSING_DELIMITER: char = '}';

/// Text appended whenever the closing delimiter is re-established.
pub const CLOSING_LINE: &str = "}\n";

/// How the next cursor write lands in the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Insert new lines before the cursor line.
    #[default]
    Insert,
    /// Overwrite the cursor line. Consumed by a single write.
    Replace,
}

/// A text store addressed by 1-based line numbers.
#[derive(Debug)]
pub struct LineBuffer<S> {
    store: S,
    index: LineIndex,
    cursor: usize,
    mode: WriteMode,
}

impl<S: LineStore> LineBuffer<S> {
    /// Wrap an existing store, indexing whatever it already holds.
    pub fn open(store: S) -> Result<Self, BufferError> {
        let mut buffer = Self {
            store,
            index: LineIndex::default(),
            cursor: 1,
            mode: WriteMode::Insert,
        };
        buffer.rebuild_index()?;
        Ok(buffer)
    }

    /// Wrap a store, overwrite it with `skeleton`, and park the cursor on
    /// the second-to-last indexed line.
    pub fn with_skeleton(store: S, skeleton: &str) -> Result<Self, BufferError> {
        let mut buffer = Self::open(store)?;
        buffer.reset(skeleton)?;
        buffer.cursor = buffer.line_count().saturating_sub(2).max(1);
        debug!(cursor = buffer.cursor, lines = buffer.line_count(), "buffer initialized");
        Ok(buffer)
    }

    /// Overwrite the store with `contents`. The cursor stays put unless the
    /// new contents are too short for it.
    pub fn reset(&mut self, contents: &str) -> Result<(), BufferError> {
        self.store
            .replace(contents)
            .map_err(BufferError::io("reset"))?;
        self.rebuild_index()?;
        debug!(cursor = self.cursor, lines = self.line_count(), "buffer reset");
        Ok(())
    }

    /// Rescan the store, then clamp the cursor into the indexed range.
    pub fn rebuild_index(&mut self) -> Result<(), BufferError> {
        let text = self.store.load().map_err(BufferError::io("scan"))?;
        self.index = LineIndex::scan(&text);
        let count = self.index.line_count();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
        self.cursor = self.cursor.max(1);
        trace!(lines = count, cursor = self.cursor, "index rebuilt");
        Ok(())
    }

    /// Current 1-based line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `line` if `1 <= line < line_count`; otherwise
    /// leave it where it is.
    pub fn set_cursor(&mut self, line: usize) {
        if (1..self.line_count()).contains(&line) {
            self.cursor = line;
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        self.mode
    }

    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.mode = mode;
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    pub fn has_line(&self, line: usize) -> bool {
        self.index.contains(line)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Text of `line` without its terminator; empty when not indexed.
    pub fn line(&mut self, line: usize) -> Result<String, BufferError> {
        let Some(offset) = self.index.offset(line) else {
            return Ok(String::new());
        };
        let raw = self
            .store
            .read_line_at(offset as u64)
            .map_err(BufferError::io("read"))?;
        Ok(raw.strip_suffix('\n').unwrap_or(&raw).to_string())
    }

    /// Text of the last terminated line, skipping the empty entry that
    /// follows a trailing `\n`.
    pub fn last_line(&mut self) -> Result<String, BufferError> {
        let count = self.line_count();
        let last = self.line(count)?;
        if last.is_empty() && count > 1 {
            return self.line(count - 1);
        }
        Ok(last)
    }

    /// Whole store contents.
    pub fn contents(&mut self) -> Result<String, BufferError> {
        self.store.load().map_err(BufferError::io("read"))
    }

    /// Stored lines without terminators, for numbered listings.
    pub fn listing(&mut self) -> Result<Vec<String>, BufferError> {
        Ok(self.contents()?.lines().map(str::to_string).collect())
    }

    /// Append `text` verbatim and advance the cursor by exactly one line,
    /// however many terminators `text` holds.
    pub fn append(&mut self, text: &str) -> Result<(), BufferError> {
        self.store.append(text).map_err(BufferError::io("append"))?;
        self.cursor += 1;
        self.rebuild_index()
    }

    /// Write `text` at the cursor according to the current [`WriteMode`].
    ///
    /// Inside existing content the cursor advances by one and each
    /// `\n`-terminated piece is inserted before (or overwrites) the line at a
    /// running index. Past the end, pieces are appended and the cursor jumps
    /// to the new stored line count. Replace mode is consumed either way.
    pub fn write(&mut self, text: &str) -> Result<(), BufferError> {
        let mut lines = self.stored_lines()?;
        let mut line_index = self.cursor.saturating_sub(1);
        let cursor = if line_index < lines.len() {
            for piece in text.split_inclusive('\n') {
                if line_index < lines.len() {
                    match self.mode {
                        WriteMode::Replace => lines[line_index] = piece.to_string(),
                        WriteMode::Insert => lines.insert(line_index, piece.to_string()),
                    }
                } else {
                    lines.push(piece.to_string());
                }
                line_index += 1;
            }
            self.cursor + 1
        } else {
            lines.extend(text.split_inclusive('\n').map(str::to_string));
            lines.len()
        };

        self.store
            .replace(&lines.concat())
            .map_err(BufferError::io("write"))?;
        debug!(mode = ?self.mode, from = self.cursor, to = cursor, "wrote statement");
        self.cursor = cursor;
        self.mode = WriteMode::Insert;
        self.rebuild_index()
    }

    /// Truncate the store at the last occurrence of `ch`, dropping it and
    /// everything after it. A match at offset 0, or no match, leaves the
    /// store alone. Returns whether anything was cut.
    pub fn erase_through(&mut self, ch: char) -> Result<bool, BufferError> {
        let text = self.contents()?;
        let erased = match text.rfind(ch) {
            Some(pos) if pos > 0 => {
                self.store
                    .truncate(pos as u64)
                    .map_err(BufferError::io("truncate"))?;
                true
            }
            _ => false,
        };
        self.rebuild_index()?;
        Ok(erased)
    }

    /// Remove the closed range `[start, start + size]` of lines, i.e.
    /// `size + 1` lines beginning at 1-based `start`.
    ///
    /// `start == 0` or a start past the stored lines is a no-op.
    pub fn delete_lines(&mut self, start: usize, size: usize) -> Result<(), BufferError> {
        let Some(idx) = start.checked_sub(1) else {
            return Ok(());
        };
        let mut lines = self.stored_lines()?;
        if idx < lines.len() {
            let end = idx.saturating_add(size).saturating_add(1).min(lines.len());
            lines.drain(idx..end);
            self.store
                .replace(&lines.concat())
                .map_err(BufferError::io("delete"))?;
            debug!(start, removed = end - idx, "deleted lines");
        }
        self.rebuild_index()
    }

    /// Drop the last closing delimiter (and whatever trails it), append a
    /// fresh closing line, and put the cursor back where it was.
    pub fn reseal(&mut self) -> Result<(), BufferError> {
        let cursor = self.cursor;
        self.erase_through(CLOSING_DELIMITER)?;
        self.append(CLOSING_LINE)?;
        self.set_cursor(cursor);
        Ok(())
    }

    fn stored_lines(&mut self) -> Result<Vec<String>, BufferError> {
        Ok(self
            .contents()?
            .split_inclusive('\n')
            .map(str::to_string)
            .collect())
    }
}
