//! The in-progress input line and its editing cursor.
//!
//! Cursor positions are char indices so recalled history text stays UTF-8
//! safe even though typed input is ASCII.

/// Text being typed plus a cursor in `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLine {
    text: String,
    cursor: usize,
}

impl EditLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        char_count(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert one char at the cursor and advance past it.
    pub fn insert(&mut self, ch: char) {
        let byte_idx = byte_index_at_char(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    /// Delete left of the cursor, treating cursor 0 as 1.
    ///
    /// With the cursor at the start of a non-empty line this removes the
    /// first char. Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        let cursor = self.cursor.max(1);
        let start = byte_index_at_char(&self.text, cursor - 1);
        let end = byte_index_at_char(&self.text, cursor);
        self.text.replace_range(start..end, "");
        self.cursor = cursor - 1;
        true
    }

    /// Delete the char under the cursor without moving it.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let start = byte_index_at_char(&self.text, self.cursor);
        let end = byte_index_at_char(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Swap in recalled text with the cursor at its end.
    pub fn replace(&mut self, text: String) {
        self.cursor = char_count(&text);
        self.text = text;
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}
