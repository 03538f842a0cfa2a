//! End-to-end session runs over scripted terminal input.

#[allow(dead_code)]
#[path = "../src/testsupport.rs"]
mod testsupport;

use async_trait::async_trait;
use creppl::buffer::{LineBuffer, MemoryStore};
use creppl::error::ToolchainError;
use creppl::session::{Session, SessionOptions};
use creppl::toolchain::{ExecOutput, OutputLog, RunReport, Toolchain};
use creppl::tui::{CookedMode, HistoryRing, LineReader, Renderer};
use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use testsupport::TestTempDir;

const SKELETON: &str = "#include <iostream>\n\nint main() {\n\n}\n";
const SOURCE: &str = "/work/src/main.cpp";

/// Toolchain double that records each build request and replays canned
/// results, defaulting to a clean build with no output.
#[derive(Clone, Default)]
struct FakeToolchain {
    calls: Arc<Mutex<Vec<PathBuf>>>,
    replies: Arc<Mutex<VecDeque<Result<RunReport, ToolchainError>>>>,
}

impl FakeToolchain {
    fn replying(replies: Vec<Result<RunReport, ToolchainError>>) -> Self {
        Self {
            calls: Arc::default(),
            replies: Arc::new(Mutex::new(replies.into())),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("calls").len()
    }
}

#[async_trait]
impl Toolchain for FakeToolchain {
    async fn build_and_run(&self, source: &Path) -> Result<RunReport, ToolchainError> {
        self.calls.lock().expect("calls").push(source.to_path_buf());
        self.replies
            .lock()
            .expect("replies")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(RunReport {
                    build: ExecOutput::default(),
                    run: Some(ExecOutput::default()),
                })
            })
    }
}

type TestSession = Session<MemoryStore, Cursor<Vec<u8>>, Vec<u8>, FakeToolchain>;

fn session_with(input: &str, toolchain: FakeToolchain, log: Option<OutputLog>) -> TestSession {
    let buffer =
        LineBuffer::with_skeleton(MemoryStore::default(), SKELETON).expect("skeleton buffer");
    let reader = LineReader::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        Box::new(CookedMode),
        HistoryRing::default(),
    );
    let options = SessionOptions {
        source: PathBuf::from(SOURCE),
        skeleton: SKELETON.to_string(),
        log,
    };
    Session::new(buffer, reader, toolchain, Renderer::new(false), options)
}

fn output(session: &TestSession) -> String {
    String::from_utf8(session.reader().output().clone()).expect("utf8 output")
}

fn contents(session: &mut TestSession) -> String {
    session.buffer_mut().contents().expect("contents")
}

#[tokio::test]
async fn statement_is_written_built_and_finalized_on_quit() {
    let toolchain = FakeToolchain::replying(vec![Ok(RunReport {
        build: ExecOutput::default(),
        run: Some(ExecOutput {
            stdout: "1".into(),
            ..ExecOutput::default()
        }),
    })]);
    let mut session = session_with("std::cout << 1;\r$quit\r", toolchain.clone(), None);
    session.run().await.expect("session");

    assert_eq!(
        contents(&mut session),
        "#include <iostream>\n\nint main() {\nstd::cout << 1;\n\n\n}\n"
    );
    assert_eq!(toolchain.call_count(), 2);
    assert!(toolchain
        .calls
        .lock()
        .expect("calls")
        .iter()
        .all(|path| path == Path::new(SOURCE)));

    let out = output(&session);
    assert!(out.contains(">>> [4] : std::cout << 1;"), "out: {out:?}");
    assert!(out.contains("\n1\n"), "out: {out:?}");
    assert!(out.contains(">>> [5] : $quit"), "out: {out:?}");
}

#[tokio::test]
async fn command_errors_are_reported_without_touching_the_buffer() {
    let toolchain = FakeToolchain::default();
    let mut session = session_with("$frob\r$goto\r", toolchain.clone(), None);
    assert_eq!(
        session.handle_line("$frob").await.expect("frob"),
        creppl::session::Flow::Continue
    );
    assert_eq!(contents(&mut session), SKELETON);
    assert_eq!(session.buffer().cursor(), 4);
    assert_eq!(toolchain.call_count(), 0);
    assert!(output(&session).contains("error: unknown command `$frob`"));
}

#[tokio::test]
async fn end_of_input_finalizes_once() {
    let toolchain = FakeToolchain::default();
    let mut session = session_with("$print\r", toolchain.clone(), None);
    session.run().await.expect("session");

    let out = output(&session);
    assert!(out.contains(" 1  | #include <iostream>"), "out: {out:?}");
    assert!(out.contains(" 5  | }"), "out: {out:?}");
    assert_eq!(toolchain.call_count(), 1);
    assert_eq!(
        contents(&mut session),
        "#include <iostream>\n\nint main() {\n\n\n}\n"
    );
}

#[tokio::test]
async fn help_shows_usage_and_ends_the_session() {
    let toolchain = FakeToolchain::default();
    let mut session = session_with("$help\rstd::cout << 2;\r", toolchain.clone(), None);
    session.run().await.expect("session");

    let out = output(&session);
    assert!(out.contains("COMMANDS"), "out: {out:?}");
    assert!(out.contains("$goto n"), "out: {out:?}");
    assert_eq!(toolchain.call_count(), 1);
    assert!(!contents(&mut session).contains("std::cout << 2;"));
}

#[tokio::test]
async fn goto_moves_the_prompt_line() {
    let mut session = session_with("$goto 2\r$quit\r", FakeToolchain::default(), None);
    session.run().await.expect("session");
    let out = output(&session);
    assert!(out.contains(">>> [2] : $quit"), "out: {out:?}");
}

#[tokio::test]
async fn history_recall_resubmits_previous_line() {
    let toolchain = FakeToolchain::default();
    let mut session = session_with("int x;\r\x1b[A\r$quit\r", toolchain.clone(), None);
    session.run().await.expect("session");

    assert_eq!(
        contents(&mut session),
        "#include <iostream>\n\nint main() {\nint x;\nint x;\n\n\n}\n"
    );
    assert_eq!(toolchain.call_count(), 3);
}

#[tokio::test]
async fn failed_build_is_shown_and_logged() {
    let tmp = TestTempDir::new("session-log");
    let log = OutputLog::new(tmp.child("crepl-log.txt"));
    let toolchain = FakeToolchain::replying(vec![Ok(RunReport {
        build: ExecOutput {
            exit_code: 1,
            stderr: "main.cpp:4: error: oops".into(),
            ..ExecOutput::default()
        },
        run: None,
    })]);
    let mut session = session_with("int x = ;\r$quit\r", toolchain, Some(log.clone()));
    session.run().await.expect("session");

    assert!(output(&session).contains("main.cpp:4: error: oops\n"));
    let logged = std::fs::read_to_string(log.path()).expect("log file");
    assert!(logged.contains("[Error]: main.cpp:4: error: oops"), "log: {logged:?}");
    assert!(!logged.contains("[Output]"), "log: {logged:?}");
}

#[tokio::test]
async fn toolchain_failure_keeps_the_session_alive() {
    let toolchain = FakeToolchain::replying(vec![Err(ToolchainError::TimedOut(
        "g++ after 30s".into(),
    ))]);
    let mut session = session_with("int x;\rint y;\r$quit\r", toolchain.clone(), None);
    session.run().await.expect("session");

    assert!(output(&session).contains("error: timed out: g++ after 30s"));
    assert_eq!(toolchain.call_count(), 3);
    assert!(contents(&mut session).contains("int y;\n"));
}

#[tokio::test]
async fn nonzero_program_exit_is_warned() {
    let toolchain = FakeToolchain::replying(vec![Ok(RunReport {
        build: ExecOutput::default(),
        run: Some(ExecOutput {
            exit_code: 3,
            stderr: "boom".into(),
            ..ExecOutput::default()
        }),
    })]);
    let mut session = session_with("return 3;\r$quit\r", toolchain, None);
    session.run().await.expect("session");

    let out = output(&session);
    assert!(out.contains("boom\n"), "out: {out:?}");
    assert!(out.contains("warning: program exited with status 3"), "out: {out:?}");
}

#[tokio::test]
async fn reset_restores_skeleton() {
    let mut session = session_with("int x;\r$reset\r$quit\r", FakeToolchain::default(), None);
    session.run().await.expect("session");
    assert_eq!(
        contents(&mut session),
        "#include <iostream>\n\nint main() {\n\n\n}\n"
    );
}
