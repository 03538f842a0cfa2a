//! Raw-mode line reader with in-line editing and history recall.
//!
//! The reader owns the terminal streams. It decodes keys from the input byte
//! stream, repaints the line after each edit, and hands back one submitted
//! line at a time. Terminal mode switching sits behind [`TerminalMode`] so the
//! decoder can run unchanged over pipes and test fixtures.

use crate::error::InputError;
use crate::tui::edit_line::EditLine;
use crate::tui::history::HistoryRing;
use crate::tui::keys::{ByteSource, Key};
use crossterm::cursor::{MoveRight, MoveToColumn};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, IsTerminal, Read, Write};
use tracing::trace;

/// Result of reading one interactive input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// User submitted a full line.
    Line(String),
    /// `Ctrl-C`, or end of input.
    Interrupted,
}

/// Switches the controlling terminal in and out of raw mode.
pub trait TerminalMode {
    fn enter_raw(&mut self) -> io::Result<()>;
    fn leave_raw(&mut self) -> io::Result<()>;
}

/// Real terminal mode switching through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enter_raw(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// No-op mode for piped stdin; bytes are decoded the same way.
#[derive(Debug, Default)]
pub struct CookedMode;

impl TerminalMode for CookedMode {
    fn enter_raw(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard<'a> {
    mode: &'a mut dyn TerminalMode,
    active: bool,
}

impl<'a> RawModeGuard<'a> {
    fn acquire(mode: &'a mut dyn TerminalMode) -> io::Result<Self> {
        mode.enter_raw()?;
        Ok(Self { mode, active: true })
    }

    /// Leave raw mode now, before echoing the final frame.
    fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.mode.leave_raw()
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.mode.leave_raw();
        }
    }
}

/// Line reader over an input byte stream and an output terminal.
pub struct LineReader<R, W> {
    input: ByteSource<R>,
    output: W,
    mode: Box<dyn TerminalMode>,
    history: HistoryRing,
}

impl LineReader<io::Stdin, io::Stdout> {
    /// Reader over the process stdio. Raw mode is only used on a TTY.
    pub fn stdio(history_size: usize) -> Self {
        let stdin = io::stdin();
        let mode: Box<dyn TerminalMode> = if stdin.is_terminal() {
            Box::new(CrosstermMode)
        } else {
            Box::new(CookedMode)
        };
        Self::new(stdin, io::stdout(), mode, HistoryRing::with_capacity(history_size))
    }
}

impl<R: Read, W: Write> LineReader<R, W> {
    pub fn new(input: R, output: W, mode: Box<dyn TerminalMode>, history: HistoryRing) -> Self {
        Self {
            input: ByteSource::new(input),
            output,
            mode,
            history,
        }
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Block until the user submits a line or interrupts.
    ///
    /// Raw mode is held only for the duration of this call.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, InputError> {
        let Self {
            input,
            output,
            mode,
            history,
        } = self;
        let mut guard = RawModeGuard::acquire(mode.as_mut()).map_err(InputError::RawMode)?;
        let prompt_width = prompt.chars().count();
        let mut line = EditLine::default();

        output.queue(Print(prompt))?;
        output.flush()?;

        loop {
            let Some(key) = input.read_key()? else {
                trace!("input stream closed");
                guard.release().map_err(InputError::RawMode)?;
                output.queue(Print("\r\n"))?;
                output.flush()?;
                return Ok(ReadOutcome::Interrupted);
            };

            let changed = match key {
                Key::Char(ch) => {
                    line.insert(ch);
                    true
                }
                Key::Enter => {
                    guard.release().map_err(InputError::RawMode)?;
                    finalize_line(output, prompt, line.text())?;
                    history.put(line.text());
                    return Ok(ReadOutcome::Line(line.into_text()));
                }
                Key::Interrupt => {
                    guard.release().map_err(InputError::RawMode)?;
                    output.queue(Print("\r\n"))?;
                    output.flush()?;
                    return Ok(ReadOutcome::Interrupted);
                }
                Key::Backspace => line.backspace(),
                Key::DeleteForward => line.delete_forward(),
                Key::Up => {
                    line.replace(history.recall_previous());
                    true
                }
                Key::Down => {
                    line.replace(history.recall_next());
                    true
                }
                Key::Left => {
                    line.move_left();
                    true
                }
                Key::Right => {
                    line.move_right();
                    true
                }
                Key::Other => false,
            };

            if changed {
                redraw_line(output, prompt_width, &line)?;
            }
        }
    }
}

/// Repaint the text after the prompt and park the terminal cursor on the
/// editing cursor.
fn redraw_line<W: Write>(output: &mut W, prompt_width: usize, line: &EditLine) -> io::Result<()> {
    output.queue(MoveToColumn(0))?;
    advance(output, prompt_width)?;
    output.queue(Clear(ClearType::UntilNewLine))?;
    output.queue(Print(line.text()))?;
    output.queue(MoveToColumn(0))?;
    advance(output, prompt_width)?;
    advance(output, line.cursor())?;
    output.flush()
}

/// `MoveRight(0)` still moves one column on most terminals.
fn advance<W: Write>(output: &mut W, columns: usize) -> io::Result<()> {
    if columns > 0 {
        let columns = u16::try_from(columns).unwrap_or(u16::MAX);
        output.queue(MoveRight(columns))?;
    }
    Ok(())
}

/// Redraw a clean final frame and append a newline before returning.
fn finalize_line<W: Write>(output: &mut W, prompt: &str, text: &str) -> io::Result<()> {
    output.queue(MoveToColumn(0))?;
    output.queue(Print(prompt))?;
    output.queue(Print(text))?;
    output.queue(Clear(ClearType::UntilNewLine))?;
    output.queue(Print("\r\n"))?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Events = Rc<RefCell<Vec<&'static str>>>;

    struct RecordingMode {
        events: Events,
        fail_enter: bool,
    }

    impl TerminalMode for RecordingMode {
        fn enter_raw(&mut self) -> io::Result<()> {
            if self.fail_enter {
                return Err(io::Error::new(io::ErrorKind::Unsupported, "not a tty"));
            }
            self.events.borrow_mut().push("raw");
            Ok(())
        }

        fn leave_raw(&mut self) -> io::Result<()> {
            self.events.borrow_mut().push("cooked");
            Ok(())
        }
    }

    fn reader(input: &[u8]) -> (LineReader<&[u8], Vec<u8>>, Events) {
        let events = Events::default();
        let mode = RecordingMode {
            events: events.clone(),
            fail_enter: false,
        };
        let reader = LineReader::new(input, Vec::new(), Box::new(mode), HistoryRing::default());
        (reader, events)
    }

    fn output_text<R: Read>(reader: &LineReader<R, Vec<u8>>) -> String {
        String::from_utf8_lossy(reader.output()).into_owned()
    }

    #[test]
    fn enter_returns_line_and_restores_mode() {
        let (mut reader, events) = reader(b"int x;\r");
        let outcome = reader.read_line("> ").unwrap();
        assert_eq!(outcome, ReadOutcome::Line("int x;".into()));
        assert_eq!(*events.borrow(), vec!["raw", "cooked"]);
        assert!(output_text(&reader).ends_with("> int x;\x1b[K\r\n"));
    }

    #[test]
    fn interrupt_restores_mode() {
        let (mut reader, events) = reader(b"abc\x03def\r");
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Interrupted);
        assert_eq!(*events.borrow(), vec!["raw", "cooked"]);
    }

    #[test]
    fn end_of_input_is_an_interrupt() {
        let (mut reader, events) = reader(b"partial");
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Interrupted);
        assert_eq!(*events.borrow(), vec!["raw", "cooked"]);
    }

    #[test]
    fn raw_mode_failure_is_reported() {
        let mode = RecordingMode {
            events: Events::default(),
            fail_enter: true,
        };
        let mut reader =
            LineReader::new(&b"x\r"[..], Vec::new(), Box::new(mode), HistoryRing::default());
        let err = reader.read_line("> ").unwrap_err();
        assert!(matches!(err, InputError::RawMode(_)), "got: {err}");
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "stream reset"))
        }
    }

    #[test]
    fn read_error_mid_line_restores_mode() {
        let events = Events::default();
        let mode = RecordingMode {
            events: events.clone(),
            fail_enter: false,
        };
        let input = (&b"ab"[..]).chain(BrokenPipe);
        let mut reader = LineReader::new(input, Vec::new(), Box::new(mode), HistoryRing::default());
        let err = reader.read_line("> ").unwrap_err();
        assert!(matches!(err, InputError::Io(_)), "got: {err}");
        assert_eq!(*events.borrow(), vec!["raw", "cooked"]);
    }

    #[test]
    fn editing_keys_apply_in_place() {
        // type "abd", left, insert c, right, backspace, then delete-forward at end
        let (mut reader, _) = reader(b"abd\x1b[Dc\x1b[C\x7f\x1b[3~\r");
        assert_eq!(
            reader.read_line("> ").unwrap(),
            ReadOutcome::Line("abc".into())
        );
    }

    #[test]
    fn backspace_at_column_zero_removes_first_char() {
        let (mut reader, _) = reader(b"xy\x1b[D\x1b[D\x7f\r");
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Line("y".into()));
    }

    #[test]
    fn up_recalls_previous_lines() {
        let (mut reader, _) = reader(b"first\rsecond\r\x1b[A\x1b[A\r");
        reader.read_line("> ").unwrap();
        reader.read_line("> ").unwrap();
        assert_eq!(
            reader.read_line("> ").unwrap(),
            ReadOutcome::Line("first".into())
        );
        assert_eq!(reader.history().put_index(), 3);
    }

    #[test]
    fn down_past_newest_clears_line() {
        // up lands on "only", the first down steps back onto it, the second
        // finds the next slot empty
        let (mut reader, _) = reader(b"only\r\x1b[A\x1b[B\x1b[B\r");
        reader.read_line("> ").unwrap();
        assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Line(String::new()));
    }

    #[test]
    fn redraw_skips_zero_width_advances() {
        let (mut reader, _) = reader(b"a\x1b[D\r");
        reader.read_line("").unwrap();
        let out = output_text(&reader);
        assert!(!out.contains("\x1b[0C"), "got: {out:?}");
        assert!(out.contains("\x1b[1G\x1b[Ka\x1b[1G\x1b[1C"), "got: {out:?}");
    }

    #[test]
    fn unknown_bytes_do_not_redraw() {
        let (mut reader, _) = reader(b"\x01\r");
        reader.read_line(">> ").unwrap();
        let out = output_text(&reader);
        assert_eq!(out, ">> \x1b[1G>> \x1b[K\r\n");
    }
}
