//! Backing stores for the line buffer.
//!
//! The buffer never caches file text between operations; every mutation goes
//! through one of these stores and is followed by a fresh index scan.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Seekable, truncatable text storage addressed by byte offset.
pub trait LineStore {
    /// Read the whole store. A store that does not exist yet reads as empty.
    fn load(&mut self) -> io::Result<String>;
    /// Replace the whole store with `contents`.
    fn replace(&mut self, contents: &str) -> io::Result<()>;
    /// Append `text` verbatim at the end of the store.
    fn append(&mut self, text: &str) -> io::Result<()>;
    /// Cut the store down to `len` bytes.
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    /// Read from `offset` through the next `\n` (inclusive) or end of store.
    fn read_line_at(&mut self, offset: u64) -> io::Result<String>;
}

/// A source file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileStore {
    fn load(&mut self) -> io::Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    fn replace(&mut self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }

    fn append(&mut self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_len(len)
    }

    fn read_line_at(&mut self, offset: u64) -> io::Result<String> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut line = String::new();
        BufReader::new(file).read_line(&mut line)?;
        Ok(line)
    }
}

/// In-memory store used when no file should be touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    contents: String,
}

impl MemoryStore {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl LineStore for MemoryStore {
    fn load(&mut self) -> io::Result<String> {
        Ok(self.contents.clone())
    }

    fn replace(&mut self, contents: &str) -> io::Result<()> {
        self.contents = contents.to_string();
        Ok(())
    }

    fn append(&mut self, text: &str) -> io::Result<()> {
        self.contents.push_str(text);
        Ok(())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len < self.contents.len() {
            if !self.contents.is_char_boundary(len) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("offset {len} is not a character boundary"),
                ));
            }
            self.contents.truncate(len);
        }
        Ok(())
    }

    fn read_line_at(&mut self, offset: u64) -> io::Result<String> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let Some(rest) = self.contents.get(start..) else {
            return Ok(String::new());
        };
        let end = rest.find('\n').map(|idx| idx + 1).unwrap_or(rest.len());
        Ok(rest[..end].to_string())
    }
}
