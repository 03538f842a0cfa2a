//! Interactive session loop.
//!
//! A [`Session`] reads one line at a time, routes `$` statements through the
//! command dispatcher, writes everything else into the buffer, and rebuilds
//! and runs the program after each accepted line. Recoverable failures are
//! printed as one diagnostic and the loop keeps going; only terminal and
//! output-stream failures end it with an error.

use crate::buffer::{LineBuffer, LineStore};
use crate::commands::{run_statement, Action};
use crate::error::{InputError, SessionError};
use crate::toolchain::{LogTag, OutputLog, RunReport, Toolchain};
use crate::tui::settings::input_prompt;
use crate::tui::{LineReader, ReadOutcome, Renderer};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Per-session settings resolved from config and startup.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// File handed to the toolchain on every rebuild.
    pub source: PathBuf,
    /// Contents restored by `$reset`.
    pub skeleton: String,
    /// Build and run log; `None` disables logging.
    pub log: Option<OutputLog>,
}

/// Whether the loop should keep prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Session<S, R, W, T> {
    buffer: LineBuffer<S>,
    reader: LineReader<R, W>,
    toolchain: T,
    renderer: Renderer,
    options: SessionOptions,
}

impl<S, R, W, T> Session<S, R, W, T>
where
    S: LineStore,
    R: Read,
    W: Write,
    T: Toolchain,
{
    pub fn new(
        buffer: LineBuffer<S>,
        reader: LineReader<R, W>,
        toolchain: T,
        renderer: Renderer,
        options: SessionOptions,
    ) -> Self {
        Self {
            buffer,
            reader,
            toolchain,
            renderer,
            options,
        }
    }

    pub fn buffer(&self) -> &LineBuffer<S> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer<S> {
        &mut self.buffer
    }

    pub fn reader(&self) -> &LineReader<R, W> {
        &self.reader
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Print the startup banner.
    pub fn show_banner(&mut self) -> Result<(), SessionError> {
        self.renderer
            .banner(self.reader.output_mut())
            .map_err(SessionError::Output)
    }

    /// Prompt until the user quits, asks for help, interrupts, or input ends.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let prompt = input_prompt(self.buffer.cursor());
            let outcome = match self.reader.read_line(&prompt) {
                Ok(outcome) => outcome,
                Err(InputError::RawMode(e)) => return Err(SessionError::Terminal(e)),
                Err(err @ InputError::Io(_)) => {
                    warn!(error = %err, "input failed; finishing session");
                    self.diagnostic(&err.to_string())?;
                    ReadOutcome::Interrupted
                }
            };

            let flow = match outcome {
                ReadOutcome::Line(line) => self.handle_line(&line).await?,
                ReadOutcome::Interrupted => {
                    debug!("interrupted");
                    self.finalize().await?;
                    Flow::Stop
                }
            };
            if flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    /// Apply one submitted line.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, SessionError> {
        let action = match run_statement(&mut self.buffer, line, &self.options.skeleton) {
            Ok(action) => action,
            Err(err) => {
                self.diagnostic(&err.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        match action {
            Action::Done => {}
            Action::Commit(text) => self.commit(&text).await?,
            Action::ClearScreen => self
                .renderer
                .clear_screen(self.reader.output_mut())
                .map_err(SessionError::Output)?,
            Action::Print(lines) => self
                .renderer
                .listing(self.reader.output_mut(), &lines)
                .map_err(SessionError::Output)?,
            Action::Help => {
                self.renderer
                    .help(self.reader.output_mut())
                    .map_err(SessionError::Output)?;
                self.finalize().await?;
                return Ok(Flow::Stop);
            }
            Action::Quit => {
                self.finalize().await?;
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Write `text` as one line at the cursor, reseal the closing delimiter,
    /// then rebuild and run.
    pub async fn commit(&mut self, text: &str) -> Result<(), SessionError> {
        let statement = format!("{text}\n");
        let written = self
            .buffer
            .write(&statement)
            .and_then(|()| self.buffer.reseal());
        if let Err(err) = written {
            warn!(error = %err, "buffer write failed");
            return self.diagnostic(&err.to_string());
        }

        match self.toolchain.build_and_run(&self.options.source).await {
            Ok(report) => self.report(&report),
            Err(err) => {
                warn!(error = %err, "toolchain failed");
                self.diagnostic(&err.to_string())
            }
        }
    }

    /// Last commit before leaving: an empty line, reseal, rebuild and run.
    pub async fn finalize(&mut self) -> Result<(), SessionError> {
        self.commit("").await?;
        self.reader
            .output_mut()
            .write_all(b"\n")
            .and_then(|()| self.reader.output_mut().flush())
            .map_err(SessionError::Output)
    }

    fn report(&mut self, report: &RunReport) -> Result<(), SessionError> {
        let out = self.reader.output_mut();
        self.renderer
            .build_errors(out, &report.build.stderr)
            .map_err(SessionError::Output)?;
        self.log(LogTag::Error, &report.build.stderr)?;

        let Some(run) = &report.run else {
            return Ok(());
        };
        let mut shown = run.stdout.clone();
        shown.push_str(&run.stderr);
        self.renderer
            .program_output(self.reader.output_mut(), &shown)
            .map_err(SessionError::Output)?;
        self.log(LogTag::Output, &shown)?;
        if !run.success() {
            self.renderer
                .warn(
                    self.reader.output_mut(),
                    &format!("program exited with status {}", run.exit_code),
                )
                .map_err(SessionError::Output)?;
        }
        Ok(())
    }

    fn log(&mut self, tag: LogTag, text: &str) -> Result<(), SessionError> {
        let Some(log) = &self.options.log else {
            return Ok(());
        };
        if let Err(err) = log.append(tag, text) {
            warn!(path = %log.path().display(), error = %err, "log append failed");
            let message = format!("could not write {}: {err}", log.path().display());
            self.renderer
                .warn(self.reader.output_mut(), &message)
                .map_err(SessionError::Output)?;
        }
        Ok(())
    }

    fn diagnostic(&mut self, message: &str) -> Result<(), SessionError> {
        self.renderer
            .error(self.reader.output_mut(), message)
            .map_err(SessionError::Output)
    }
}
