//! Default configuration constants.

use std::path::PathBuf;

/// Compiler invoked when none is configured.
pub(super) const DEFAULT_COMPILER: &str = "g++";
/// Language standard passed as `-std=<value>`.
pub(super) const DEFAULT_STD: &str = "c++17";
/// Per-step limit for the compile and run processes.
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Source file name used when none is given on the command line.
pub(super) const DEFAULT_SOURCE_FILE: &str = "main.cpp";
/// Output log file name, relative to the working directory.
pub(super) const DEFAULT_LOG_FILE: &str = "crepl-log.txt";
/// Contents written to a fresh source file.
pub(super) const DEFAULT_SKELETON: &str = "#include <iostream>\n\nint main() {\n\n}\n";
/// Working directory name under the user's home.
pub(super) const WORKDIR_NAME: &str = ".creppl";

/// `~/.creppl`, or `./.creppl` when no home directory is known.
pub(super) fn default_workdir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(WORKDIR_NAME)
}
