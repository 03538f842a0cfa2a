//! `$command` grammar.
//!
//! A statement is the sigil, a case-insensitive command token, and an
//! optional argument. `ins` and `rep` also carry a body that is written like
//! ordinary program text once the command has positioned the cursor.

pub mod dispatch;

pub use dispatch::{dispatch, run_statement, Action};

use crate::error::CommandError;

/// Prefix that marks a line as a command rather than program text.
pub const SIGIL: char = '$';

/// The closed set of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Delete,
    Goto,
    Help,
    ClearScreen,
    Insert,
    Print,
    Quit,
    Replace,
    Reset,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Delete,
        Command::Insert,
        Command::Replace,
        Command::Goto,
        Command::ClearScreen,
        Command::Print,
        Command::Reset,
        Command::Help,
        Command::Quit,
    ];

    /// Token typed after the sigil.
    pub fn name(self) -> &'static str {
        match self {
            Self::Delete => "del",
            Self::Goto => "goto",
            Self::Help => "help",
            Self::ClearScreen => "cls",
            Self::Insert => "ins",
            Self::Print => "print",
            Self::Quit => "quit",
            Self::Replace => "rep",
            Self::Reset => "reset",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(token))
    }

    /// Argument form shown in help output.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Delete => "$del [n | n-m]",
            Self::Goto => "$goto n",
            Self::Insert => "$ins [n] [code]",
            Self::Replace => "$rep [n] [code]",
            Self::Help => "$help",
            Self::ClearScreen => "$cls",
            Self::Print => "$print",
            Self::Quit => "$quit",
            Self::Reset => "$reset",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Delete => {
                "Delete line n, or lines n through m. The cursor moves to line n when it exists."
            }
            Self::Goto => "Move the cursor to line n.",
            Self::Insert => {
                "Insert code before line n, or before the current line when n is omitted."
            }
            Self::Replace => {
                "Replace line n, or the current line, with code. Applies to the next write only."
            }
            Self::Help => "Show this help and end the session.",
            Self::ClearScreen => "Clear the screen.",
            Self::Print => "Print the numbered contents of the file.",
            Self::Quit => "Build and run one last time, then exit.",
            Self::Reset => "Restore the file to its starting skeleton.",
        }
    }

    fn takes_arguments(self) -> bool {
        matches!(
            self,
            Self::Delete | Self::Goto | Self::Insert | Self::Replace
        )
    }
}

/// Line argument of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineArg {
    Line(usize),
    /// `n-m`, both ends as typed.
    Range(usize, usize),
}

/// A parsed `$command` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub command: Command,
    pub arg: Option<LineArg>,
    /// Program text following `ins`/`rep`; `None` when nothing followed.
    pub body: Option<String>,
}

impl Statement {
    fn bare(command: Command) -> Self {
        Self {
            command,
            arg: None,
            body: None,
        }
    }
}

/// Whether `input` should be routed to the command parser.
pub fn is_command(input: &str) -> bool {
    input.starts_with(SIGIL)
}

/// Parse a sigil-prefixed statement.
pub fn parse_statement(input: &str) -> Result<Statement, CommandError> {
    let statement = input.trim();
    let rest = statement.strip_prefix(SIGIL).unwrap_or(statement);
    let Some((token, tail)) = split_token(rest) else {
        return Err(CommandError::MissingCommand);
    };
    let command =
        Command::from_token(token).ok_or_else(|| CommandError::UnknownCommand(token.to_string()))?;

    if !command.takes_arguments() {
        let count = tail.split_whitespace().count();
        if count > 0 {
            return Err(CommandError::UnexpectedArguments {
                command: command.name(),
                count,
                statement: statement.to_string(),
            });
        }
        return Ok(Statement::bare(command));
    }

    match command {
        Command::Goto => parse_goto(command, tail, statement),
        Command::Delete => parse_delete(command, tail, statement),
        _ => parse_write(command, tail, statement),
    }
}

fn parse_goto(command: Command, tail: &str, statement: &str) -> Result<Statement, CommandError> {
    let mut args = tail.split_whitespace();
    let Some(arg) = args.next() else {
        return Err(CommandError::MissingArgument {
            command: command.name(),
        });
    };
    if args.next().is_some() {
        return Err(CommandError::TooManyArguments {
            command: command.name(),
            statement: statement.to_string(),
        });
    }
    let line = parse_number(command, arg, arg, statement)?;
    Ok(Statement {
        arg: Some(LineArg::Line(line)),
        ..Statement::bare(command)
    })
}

fn parse_delete(command: Command, tail: &str, statement: &str) -> Result<Statement, CommandError> {
    let mut args = tail.split_whitespace();
    let Some(arg) = args.next() else {
        return Ok(Statement::bare(command));
    };
    if args.next().is_some() {
        return Err(CommandError::TooManyArguments {
            command: command.name(),
            statement: statement.to_string(),
        });
    }

    let parts: Vec<&str> = arg.split('-').collect();
    let line_arg = match parts.as_slice() {
        [line] => LineArg::Line(parse_number(command, line, arg, statement)?),
        [start, end] => LineArg::Range(
            parse_number(command, start, arg, statement)?,
            parse_number(command, end, arg, statement)?,
        ),
        _ => {
            return Err(CommandError::MalformedRange {
                command: command.name(),
                argument: arg.to_string(),
            })
        }
    };
    Ok(Statement {
        arg: Some(line_arg),
        ..Statement::bare(command)
    })
}

/// `ins`/`rep`: optional leading line number, then the body verbatim.
fn parse_write(command: Command, tail: &str, statement: &str) -> Result<Statement, CommandError> {
    let mut arg = None;
    let mut body = tail;
    if let Some((first, rest)) = split_token(tail) {
        if is_number(first) {
            arg = Some(LineArg::Line(parse_number(command, first, first, statement)?));
            body = rest;
        } else if is_range(first) {
            return Err(CommandError::InvalidArgument {
                command: command.name(),
                argument: first.to_string(),
                statement: statement.to_string(),
            });
        }
    }
    Ok(Statement {
        command,
        arg,
        body: (!body.is_empty()).then(|| body.to_string()),
    })
}

/// Split off the first whitespace-delimited token; the remainder has its
/// leading whitespace removed and is otherwise untouched.
fn split_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(end) => Some((&text[..end], text[end..].trim_start())),
        None => Some((text, "")),
    }
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_range(token: &str) -> bool {
    matches!(token.split_once('-'), Some((a, b)) if is_number(a) && is_number(b))
}

fn parse_number(
    command: Command,
    part: &str,
    argument: &str,
    statement: &str,
) -> Result<usize, CommandError> {
    if !is_number(part) {
        return Err(CommandError::InvalidArgument {
            command: command.name(),
            argument: argument.to_string(),
            statement: statement.to_string(),
        });
    }
    part.parse().map_err(|_| CommandError::InvalidArgument {
        command: command.name(),
        argument: argument.to_string(),
        statement: statement.to_string(),
    })
}
