//! Child process helpers for the compile and run steps.

use crate::error::ToolchainError;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Bound a process future by `limit`, naming `context` in the timeout error.
pub(crate) async fn run_with_timeout(
    fut: impl std::future::Future<Output = Result<ExecOutput, ToolchainError>>,
    limit: Duration,
    context: &str,
) -> Result<ExecOutput, ToolchainError> {
    match timeout(limit, fut).await {
        Ok(out) => out,
        Err(_) => Err(ToolchainError::TimedOut(format!(
            "{context} after {}",
            format_duration(limit)
        ))),
    }
}

/// Human-oriented timeout formatting used in error messages.
pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    if secs == 0 {
        return format!("{millis}ms");
    }
    if millis == 0 {
        if secs % 3600 == 0 {
            return format!("{}h", secs / 3600);
        }
        if secs % 60 == 0 {
            return format!("{}m", secs / 60);
        }
        return format!("{secs}s");
    }
    format!("{secs}.{millis:03}s")
}

/// Spawn a process with null stdin and wait for it, capturing both streams.
pub(crate) async fn run_process(
    program: &OsString,
    args: &[OsString],
) -> Result<ExecOutput, ToolchainError> {
    let label = program.to_string_lossy();
    let mut cmd = Command::new(program);
    // Dropping the future on timeout must not leave the child running.
    cmd.kill_on_drop(true);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = cmd
        .spawn()
        .map_err(|e| ToolchainError::Spawn(format!("{label}: {e}")))?;

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| ToolchainError::Spawn(format!("{label}: {e}")))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
