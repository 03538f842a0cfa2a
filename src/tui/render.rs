//! Terminal output renderer for banner, listings, help and diagnostics.
//!
//! Everything is queued onto a caller-supplied writer, so the session can
//! share one output stream with the line reader and tests can capture it.

use crate::build_info::startup_metadata_line;
use crate::commands::Command;
use crate::tui::settings;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Stateless output styling; `color` toggles ANSI styling.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Product line, build metadata and the help hint.
    pub fn banner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.styled(out, settings::BANNER_TITLE, settings::COLOR_BANNER_TITLE, true)?;
        out.queue(Print("\n"))?;
        self.styled(out, &startup_metadata_line(), settings::COLOR_BANNER_META, false)?;
        out.queue(Print("\n"))?;
        out.queue(Print(settings::BANNER_HINT))?;
        out.queue(Print("\n"))?;
        out.flush()
    }

    /// Wipe the screen, home the cursor, and show the banner again.
    pub fn clear_screen<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.queue(Clear(ClearType::All))?;
        out.queue(MoveTo(0, 0))?;
        self.banner(out)
    }

    /// Numbered rows for `$print`.
    pub fn listing<W: Write>(&self, out: &mut W, lines: &[String]) -> io::Result<()> {
        for (idx, line) in lines.iter().enumerate() {
            let row = settings::listing_row(idx + 1, line);
            if self.color {
                let (number, rest) = row.split_at(settings::LISTING_NUMBER_WIDTH);
                out.queue(PrintStyledContent(number.with(settings::COLOR_LISTING_NUMBER)))?;
                out.queue(Print(rest))?;
            } else {
                out.queue(Print(row))?;
            }
            out.queue(Print("\n"))?;
        }
        out.flush()
    }

    pub fn error<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        self.diagnostic(out, settings::LABEL_ERROR, settings::COLOR_ERROR, message)
    }

    pub fn warn<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        self.diagnostic(out, settings::LABEL_WARNING, settings::COLOR_WARNING, message)
    }

    /// DESCRIPTION and COMMANDS sections.
    pub fn help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.styled(out, settings::HELP_DESCRIPTION_TITLE, settings::COLOR_SECTION_TITLE, true)?;
        out.queue(Print(format!(
            "\n{}{}\n\n",
            settings::HELP_INDENT,
            settings::HELP_DESCRIPTION
        )))?;
        self.styled(out, settings::HELP_COMMANDS_TITLE, settings::COLOR_SECTION_TITLE, true)?;
        out.queue(Print("\n"))?;
        for command in Command::ALL {
            let usage = format!(
                "{:<width$}",
                command.usage(),
                width = settings::HELP_USAGE_WIDTH
            );
            out.queue(Print(settings::HELP_INDENT))?;
            self.styled(out, &usage, settings::COLOR_COMMAND_USAGE, false)?;
            out.queue(Print(command.description()))?;
            out.queue(Print("\n"))?;
        }
        out.flush()
    }

    /// Compiler diagnostics, shown as-is.
    pub fn build_errors<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.passthrough(out, text)
    }

    /// Output of the built program, shown as-is.
    pub fn program_output<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.passthrough(out, text)
    }

    fn passthrough<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        out.queue(Print(text))?;
        if !text.ends_with('\n') {
            out.queue(Print("\n"))?;
        }
        out.flush()
    }

    fn diagnostic<W: Write>(
        &self,
        out: &mut W,
        label: &str,
        color: Color,
        message: &str,
    ) -> io::Result<()> {
        if self.color {
            out.queue(PrintStyledContent(label.with(color).bold()))?;
        } else {
            out.queue(Print(label))?;
        }
        out.queue(Print(format!(" {message}\n")))?;
        out.flush()
    }

    fn styled<W: Write>(&self, out: &mut W, text: &str, color: Color, bold: bool) -> io::Result<()> {
        match (self.color, bold) {
            (false, _) => out.queue(Print(text))?,
            (true, false) => out.queue(PrintStyledContent(text.with(color)))?,
            (true, true) => out.queue(PrintStyledContent(text.with(color).bold()))?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&Renderer, &mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&Renderer::new(false), &mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn banner_lists_title_metadata_and_hint() {
        let text = render(|r, out| r.banner(out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], settings::BANNER_TITLE);
        assert_eq!(lines[1], startup_metadata_line());
        assert_eq!(lines[2], "Type \"$help\" for more information.");
    }

    #[test]
    fn clear_screen_homes_cursor_before_banner() {
        let text = render(|r, out| r.clear_screen(out));
        assert!(text.starts_with("\x1b[2J\x1b[1;1H"), "got: {text:?}");
        assert!(text.contains(settings::BANNER_TITLE));
    }

    #[test]
    fn listing_numbers_rows_from_one() {
        let lines = vec!["int main() {".to_string(), "}".to_string()];
        assert_eq!(
            render(|r, out| r.listing(out, &lines)),
            " 1  | int main() {\n 2  | }\n"
        );
    }

    #[test]
    fn plain_diagnostics_carry_labels() {
        assert_eq!(render(|r, out| r.error(out, "bad")), "error: bad\n");
        assert_eq!(render(|r, out| r.warn(out, "hmm")), "warning: hmm\n");
    }

    #[test]
    fn colored_error_still_contains_message() {
        let mut out = Vec::new();
        Renderer::new(true).error(&mut out, "bad").expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("\x1b["));
        assert!(text.contains("error:"));
        assert!(text.ends_with(" bad\n"));
    }

    #[test]
    fn help_lists_every_command() {
        let text = render(|r, out| r.help(out));
        assert!(text.starts_with("DESCRIPTION\n"));
        assert!(text.contains("COMMANDS\n"));
        for command in Command::ALL {
            assert!(text.contains(command.usage()), "missing {}", command.usage());
            assert!(text.contains(command.description()));
        }
    }

    #[test]
    fn passthrough_terminates_output_once() {
        assert_eq!(render(|r, out| r.program_output(out, "hi")), "hi\n");
        assert_eq!(render(|r, out| r.build_errors(out, "e\n")), "e\n");
        assert_eq!(render(|r, out| r.program_output(out, "")), "");
    }
}
