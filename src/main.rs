//! CLI entry point for creppl.

mod app;
mod cli;
#[cfg(test)]
#[allow(dead_code)]
#[path = "testsupport.rs"]
mod testsupport;

use app::startup::{binary_path, prepare_filesystem, resolve_source_path, StdioPrompt};
use clap::Parser;
use creppl::buffer::{FileStore, LineBuffer};
use creppl::config::{load_config_with_source, validate, Config};
use creppl::preflight::validate_toolchain;
use creppl::session::{Session, SessionOptions};
use creppl::toolchain::{GccToolchain, OutputLog};
use creppl::tui::{LineReader, Renderer};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();
    init_tracing();

    if let Err(msg) = run(args).await {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `CREPPL_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CREPPL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: cli::Args) -> Result<(), String> {
    let loaded = load_config_with_source(args.config.as_deref()).map_err(|e| e.to_string())?;
    debug!(source = ?loaded.source, "config loaded");
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, &args);
    validate(&config).map_err(|e| e.to_string())?;
    validate_toolchain(&config)?;

    prepare_filesystem(&config.session)
        .map_err(|e| format!("failed to prepare working directory: {e}"))?;
    let file_name = args
        .file
        .clone()
        .unwrap_or_else(|| config.session.default_file.clone());
    let source = resolve_source_path(
        &config.session.src_dir(),
        &file_name,
        args.yes,
        &mut StdioPrompt,
    )
    .map_err(|e| format!("failed to choose a source file: {e}"))?;
    let binary = binary_path(&config.session.bin_dir(), &source);
    debug!(source = %source.display(), binary = %binary.display(), "session files");

    let buffer = LineBuffer::with_skeleton(FileStore::new(source.clone()), &config.session.skeleton)
        .map_err(|e| e.to_string())?;
    let reader = LineReader::stdio(config.session.history_size);
    let toolchain = GccToolchain::new(&config.compiler, binary);
    let renderer = Renderer::new(config.display.color && std::io::stdout().is_terminal());
    let options = SessionOptions {
        source,
        skeleton: config.session.skeleton.clone(),
        log: config
            .session
            .log_output
            .then(|| OutputLog::new(config.session.log_path())),
    };

    let mut session = Session::new(buffer, reader, toolchain, renderer, options);
    session.show_banner().map_err(|e| e.to_string())?;
    session.run().await.map_err(|e| e.to_string())
}

fn apply_cli_overrides(config: &mut Config, args: &cli::Args) {
    if let Some(compiler) = &args.compiler {
        config.compiler.command = compiler.clone();
    }
    if let Some(std) = &args.std {
        config.compiler.std = std.clone();
    }
    if let Some(workdir) = &args.workdir {
        config.session.workdir = PathBuf::from(workdir);
    }
    if args.no_color {
        config.display.color = false;
    }
}
