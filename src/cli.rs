//! CLI argument parsing via clap.

use clap::Parser;
use creppl::build_info::{HELP_BUILD_METADATA, LONG_VERSION};

/// A line-by-line C++ REPL. Every accepted line is compiled and run.
#[derive(Debug, Parser)]
#[command(
    name = "creppl",
    version,
    long_version = LONG_VERSION,
    after_help = HELP_BUILD_METADATA
)]
pub struct Args {
    /// Source file name under <workdir>/src. `.cpp` is appended when missing.
    pub file: Option<String>,

    /// Path to config file (default: ./creppl.toml or ~/.config/creppl/creppl.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the compiler command.
    #[arg(long = "compiler")]
    pub compiler: Option<String>,

    /// Override the language standard passed as `-std=`.
    #[arg(long = "std")]
    pub std: Option<String>,

    /// Override the working directory.
    #[arg(long = "workdir")]
    pub workdir: Option<String>,

    /// Overwrite an existing source file without asking.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
