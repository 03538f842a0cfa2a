//! Append-only log of build errors and program output.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kind of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    /// Compiler diagnostics.
    Error,
    /// Output of the built program.
    Output,
}

impl LogTag {
    fn label(self) -> &'static str {
        match self {
            Self::Error => "[Error]",
            Self::Output => "[Output]",
        }
    }
}

/// `<http-date> [Tag]: <text>`, always newline-terminated.
pub fn format_entry(tag: LogTag, text: &str, at: SystemTime) -> String {
    let mut entry = format!("{} {}: {text}", httpdate::fmt_http_date(at), tag.label());
    if !entry.ends_with('\n') {
        entry.push('\n');
    }
    entry
}

/// Log file under the working directory.
#[derive(Debug, Clone)]
pub struct OutputLog {
    path: PathBuf,
}

impl OutputLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Empty text is not logged.
    pub fn append(&self, tag: LogTag, text: &str) -> io::Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_entry(tag, text, SystemTime::now()).as_bytes())
    }
}
