//! Apply parsed statements to the buffer.

use super::{is_command, parse_statement, Command, LineArg, Statement};
use crate::buffer::{LineBuffer, LineStore, WriteMode, CLOSING_DELIMITER};
use crate::error::{BufferError, DispatchError};
use tracing::debug;

/// What the session should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing further; prompt again.
    Done,
    /// Write this text at the cursor, reseal, then build and run.
    Commit(String),
    ClearScreen,
    /// Numbered listing lines, without terminators.
    Print(Vec<String>),
    /// Show help, then finalize and stop.
    Help,
    /// Finalize and stop.
    Quit,
}

/// Route one input line: commands are parsed and applied, anything else is
/// committed as program text.
pub fn run_statement<S: LineStore>(
    buffer: &mut LineBuffer<S>,
    input: &str,
    skeleton: &str,
) -> Result<Action, DispatchError> {
    if !is_command(input) {
        return Ok(Action::Commit(input.to_string()));
    }
    let statement = parse_statement(input)?;
    Ok(dispatch(buffer, &statement, skeleton)?)
}

/// Apply a parsed statement.
pub fn dispatch<S: LineStore>(
    buffer: &mut LineBuffer<S>,
    statement: &Statement,
    skeleton: &str,
) -> Result<Action, BufferError> {
    debug!(command = statement.command.name(), arg = ?statement.arg, "dispatch");
    match statement.command {
        Command::Delete => {
            let (start, size) = match statement.arg {
                None => (buffer.cursor(), 1),
                Some(LineArg::Line(line)) => (line, 1),
                Some(LineArg::Range(start, end)) => (start, end.saturating_sub(start).max(1)),
            };
            buffer.delete_lines(start, size)?;
            buffer.set_cursor(start);
            if !buffer.last_line()?.contains(CLOSING_DELIMITER) {
                buffer.reseal()?;
            }
            Ok(Action::Done)
        }
        Command::Goto => {
            if let Some(LineArg::Line(line)) = statement.arg {
                buffer.set_cursor(line);
            }
            Ok(Action::Done)
        }
        Command::Insert | Command::Replace => {
            if let Some(LineArg::Line(line)) = statement.arg {
                buffer.set_cursor(line);
            }
            let mode = if statement.command == Command::Replace {
                WriteMode::Replace
            } else {
                WriteMode::Insert
            };
            buffer.set_write_mode(mode);
            Ok(Action::Commit(statement.body.clone().unwrap_or_default()))
        }
        Command::ClearScreen => Ok(Action::ClearScreen),
        Command::Print => Ok(Action::Print(buffer.listing()?)),
        Command::Reset => {
            buffer.reset(skeleton)?;
            Ok(Action::Done)
        }
        Command::Help => Ok(Action::Help),
        Command::Quit => Ok(Action::Quit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::MemoryStore;
    use crate::error::CommandError;

    const SKELETON: &str = "#include <iostream>\n\nint main() {\n\n}\n";

    fn buffer_with(text: &str) -> LineBuffer<MemoryStore> {
        LineBuffer::open(MemoryStore::new(text)).expect("open")
    }

    fn skeleton_buffer() -> LineBuffer<MemoryStore> {
        LineBuffer::with_skeleton(MemoryStore::default(), SKELETON).expect("skeleton")
    }

    #[test]
    fn plain_text_is_committed_verbatim() {
        let mut buffer = skeleton_buffer();
        let action = run_statement(&mut buffer, "  int x;", SKELETON).unwrap();
        assert_eq!(action, Action::Commit("  int x;".into()));
    }

    #[test]
    fn goto_moves_cursor_within_range() {
        let mut buffer = skeleton_buffer();
        assert_eq!(run_statement(&mut buffer, "$goto 2", SKELETON).unwrap(), Action::Done);
        assert_eq!(buffer.cursor(), 2);
        run_statement(&mut buffer, "$goto 40", SKELETON).unwrap();
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn parse_errors_leave_state_alone() {
        let mut buffer = skeleton_buffer();
        buffer.set_cursor(3);
        let before = buffer.contents().unwrap();
        for input in ["$goto", "$del 1-2-3", "$rep 1-2 x", "$cls now", "$nope"] {
            let err = run_statement(&mut buffer, input, SKELETON).unwrap_err();
            assert!(matches!(err, DispatchError::Command(_)), "{input}: {err}");
        }
        assert_eq!(buffer.contents().unwrap(), before);
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.write_mode(), WriteMode::Insert);
    }

    #[test]
    fn unknown_command_surfaces_as_command_error() {
        let mut buffer = skeleton_buffer();
        match run_statement(&mut buffer, "$frob", SKELETON) {
            Err(DispatchError::Command(CommandError::UnknownCommand(token))) => {
                assert_eq!(token, "frob")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn replace_sets_mode_and_commits_body() {
        let mut buffer = buffer_with("a\nb\nc\n}\n");
        let action = run_statement(&mut buffer, "$rep 2 B", SKELETON).unwrap();
        assert_eq!(action, Action::Commit("B".into()));
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.write_mode(), WriteMode::Replace);
    }

    #[test]
    fn insert_without_body_commits_empty_line() {
        let mut buffer = buffer_with("a\nb\n}\n");
        buffer.set_write_mode(WriteMode::Replace);
        let action = run_statement(&mut buffer, "$ins", SKELETON).unwrap();
        assert_eq!(action, Action::Commit(String::new()));
        assert_eq!(buffer.write_mode(), WriteMode::Insert);
    }

    #[test]
    fn delete_single_line_removes_two_lines() {
        let mut buffer = buffer_with("a\nb\nc\nd\n}\n");
        run_statement(&mut buffer, "$del 2", SKELETON).unwrap();
        assert_eq!(buffer.contents().unwrap(), "a\nd\n}\n");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn delete_range_uses_span_length() {
        let mut buffer = buffer_with("a\nb\nc\nd\ne\nf\n}\n");
        // size = max(4 - 2, 1) = 2, so three lines go
        run_statement(&mut buffer, "$del 2-4", SKELETON).unwrap();
        assert_eq!(buffer.contents().unwrap(), "a\ne\nf\n}\n");
    }

    #[test]
    fn delete_defaults_to_cursor() {
        let mut buffer = buffer_with("a\nb\nc\nd\n}\n");
        buffer.set_cursor(3);
        run_statement(&mut buffer, "$del", SKELETON).unwrap();
        assert_eq!(buffer.contents().unwrap(), "a\nb\n}\n");
    }

    #[test]
    fn delete_of_closing_line_reseals() {
        let mut buffer = buffer_with("int main() {\nx;\n}\n");
        run_statement(&mut buffer, "$del 2", SKELETON).unwrap();
        assert_eq!(buffer.contents().unwrap(), "int main() {\n}\n");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn print_lists_lines() {
        let mut buffer = buffer_with("a\nb\n");
        assert_eq!(
            run_statement(&mut buffer, "$print", SKELETON).unwrap(),
            Action::Print(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn reset_restores_skeleton() {
        let mut buffer = buffer_with("junk\n");
        run_statement(&mut buffer, "$RESET", SKELETON).unwrap();
        assert_eq!(buffer.contents().unwrap(), SKELETON);
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn reset_leaves_cursor_where_it_was() {
        let mut buffer = skeleton_buffer();
        run_statement(&mut buffer, "$goto 2", SKELETON).unwrap();
        run_statement(&mut buffer, "$reset", SKELETON).unwrap();
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn reset_clamps_cursor_past_new_end() {
        let mut buffer = buffer_with("a\nb\nc\nd\ne\nf\ng\n");
        run_statement(&mut buffer, "$goto 7", SKELETON).unwrap();
        run_statement(&mut buffer, "$reset", SKELETON).unwrap();
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn session_control_commands() {
        let mut buffer = skeleton_buffer();
        assert_eq!(run_statement(&mut buffer, "$cls", SKELETON).unwrap(), Action::ClearScreen);
        assert_eq!(run_statement(&mut buffer, "$help", SKELETON).unwrap(), Action::Help);
        assert_eq!(run_statement(&mut buffer, "$quit", SKELETON).unwrap(), Action::Quit);
    }
}
