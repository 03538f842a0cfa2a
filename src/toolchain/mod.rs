//! Compile the source file and run the result.

mod log;
mod process;

pub use log::{format_entry, LogTag, OutputLog};
pub use process::ExecOutput;

use crate::config::CompilerConfig;
use crate::error::ToolchainError;
use async_trait::async_trait;
use process::{run_process, run_with_timeout};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::time::Duration;
use tracing::debug;

/// Outcome of one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub build: ExecOutput,
    /// Present only when the build succeeded.
    pub run: Option<ExecOutput>,
}

/// Builds a source file and runs the produced program.
#[async_trait]
pub trait Toolchain: Send + Sync {
    async fn build_and_run(&self, source: &Path) -> Result<RunReport, ToolchainError>;
}

/// `g++`-style compiler driver: `<cmd> -std=<std> [extra] -o <bin> <src>`.
#[derive(Debug, Clone)]
pub struct GccToolchain {
    command: String,
    std: String,
    extra_args: Vec<String>,
    binary: PathBuf,
    timeout: Duration,
}

impl GccToolchain {
    pub fn new(config: &CompilerConfig, binary: impl Into<PathBuf>) -> Self {
        Self {
            command: config.command.clone(),
            std: config.std.clone(),
            extra_args: config.extra_args.clone(),
            binary: binary.into(),
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Compiler arguments for `source`.
    pub fn build_args(&self, source: &Path) -> Vec<OsString> {
        let mut args = vec![OsString::from(format!("-std={}", self.std))];
        args.extend(self.extra_args.iter().map(OsString::from));
        args.push("-o".into());
        args.push(self.binary.clone().into_os_string());
        args.push(source.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Toolchain for GccToolchain {
    async fn build_and_run(&self, source: &Path) -> Result<RunReport, ToolchainError> {
        let program = OsString::from(&self.command);
        let args = self.build_args(source);
        debug!(compiler = %self.command, source = %source.display(), "building");
        let build = run_with_timeout(run_process(&program, &args), self.timeout, &self.command).await?;
        if !build.success() {
            debug!(exit_code = build.exit_code, "build failed");
            return Ok(RunReport { build, run: None });
        }

        let binary = self.binary.clone().into_os_string();
        let label = self.binary.display().to_string();
        let run = run_with_timeout(run_process(&binary, &[]), self.timeout, &label).await?;
        debug!(exit_code = run.exit_code, "program finished");
        Ok(RunReport {
            build,
            run: Some(run),
        })
    }
}
