//! Working-directory bootstrap and source-file selection.

use creppl::config::SessionConfig;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub(crate) const SOURCE_EXTENSION: &str = ".cpp";

/// Create the working directory and its `src`/`bin` children.
pub(crate) fn prepare_filesystem(session: &SessionConfig) -> io::Result<()> {
    for dir in [session.workdir.clone(), session.src_dir(), session.bin_dir()] {
        fs::create_dir_all(&dir)
            .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", dir.display())))?;
    }
    Ok(())
}

/// Append `.cpp` unless the name already ends with it.
pub(crate) fn with_source_extension(name: &str) -> String {
    if name.ends_with(SOURCE_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SOURCE_EXTENSION}")
    }
}

/// Normalize a name typed at the file-name prompt: lowercase, `.cpp`
/// appended, `None` when empty.
pub(crate) fn normalize_prompted_name(input: &str) -> Option<String> {
    let name = input.trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(with_source_extension(&name))
    }
}

/// Interactive questions asked while picking the source file.
pub(crate) trait StartupPrompt {
    /// Show `prompt` and read one answer; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Cooked-mode prompt over stdin/stdout.
pub(crate) struct StdioPrompt;

impl StartupPrompt for StdioPrompt {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(message.as_bytes())?;
        stdout.flush()
    }
}

/// Pick the source path under `src_dir`, confirming before an existing file
/// is overwritten. A refusal asks for another name.
pub(crate) fn resolve_source_path(
    src_dir: &Path,
    file_name: &str,
    assume_yes: bool,
    prompt: &mut dyn StartupPrompt,
) -> io::Result<PathBuf> {
    let mut name = with_source_extension(file_name);
    loop {
        let path = src_dir.join(&name);
        if assume_yes || !path.exists() {
            return Ok(path);
        }
        let question = format!("File '{name}' already exists, overwrite? (Y/n): ");
        let answer = prompt.ask(&question)?.ok_or_else(end_of_input)?;
        if answer.trim().to_lowercase().starts_with('y') {
            return Ok(path);
        }
        name = ask_file_name(prompt)?;
    }
}

fn ask_file_name(prompt: &mut dyn StartupPrompt) -> io::Result<String> {
    loop {
        let answer = prompt.ask("Enter filename: ")?.ok_or_else(end_of_input)?;
        match normalize_prompted_name(&answer) {
            Some(name) => return Ok(name),
            None => prompt.notify("Filename cannot be empty. ")?,
        }
    }
}

fn end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "no file name given")
}

/// Executable path for `source`: `<bin_dir>/<stem>`.
pub(crate) fn binary_path(bin_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| "a.out".into());
    bin_dir.join(stem)
}
