//! Configuration data model.
//!
//! Struct definitions plus default values. Loading and precedence live in
//! `config::mod`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    default_workdir, DEFAULT_COMPILER, DEFAULT_LOG_FILE, DEFAULT_SKELETON, DEFAULT_SOURCE_FILE,
    DEFAULT_STD, DEFAULT_TIMEOUT_SECS,
};
use crate::tui::history::HISTORY_CAPACITY;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub compiler: CompilerConfig,
    pub display: DisplayConfig,
}

/// Where the session keeps its files and how it starts.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Root holding `src/`, `bin/` and the output log. `~/` is expanded.
    pub workdir: PathBuf,
    /// Source file name when none is passed on the command line.
    pub default_file: String,
    /// Number of remembered input lines.
    pub history_size: usize,
    /// Output log file name, relative to `workdir`.
    pub log_file: String,
    /// Append build errors and program output to the log.
    pub log_output: bool,
    /// Contents of a fresh source file, and of `$reset`.
    pub skeleton: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            default_file: DEFAULT_SOURCE_FILE.to_string(),
            history_size: HISTORY_CAPACITY,
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_output: true,
            skeleton: DEFAULT_SKELETON.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn src_dir(&self) -> PathBuf {
        self.workdir.join("src")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.workdir.join("bin")
    }

    pub fn log_path(&self) -> PathBuf {
        self.workdir.join(&self.log_file)
    }
}

/// Compiler invocation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompilerConfig {
    pub command: String,
    /// Passed as `-std=<std>`.
    pub std: String,
    /// Inserted after `-std` and before `-o`.
    pub extra_args: Vec<String>,
    /// Limit for each of the compile and run steps.
    pub timeout_secs: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMPILER.to_string(),
            std: DEFAULT_STD.to_string(),
            extra_args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Terminal display settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local,
    Global(PathBuf),
    BuiltInDefaults,
}

/// Loaded config plus the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
