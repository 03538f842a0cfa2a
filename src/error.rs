//! Unified error types for the REPL.

use std::fmt;

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Errors in a `$command` statement typed by the user.
///
/// These never touch the buffer; the session reports them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A bare sigil with no command token.
    MissingCommand,
    /// The token after the sigil is not a known command.
    UnknownCommand(String),
    /// A command that takes no arguments was given some.
    UnexpectedArguments {
        command: &'static str,
        count: usize,
        statement: String,
    },
    /// A command that needs an argument was given none.
    MissingArgument { command: &'static str },
    /// More argument tokens than the command accepts.
    TooManyArguments {
        command: &'static str,
        statement: String,
    },
    /// An argument that is not a non-negative integer.
    InvalidArgument {
        command: &'static str,
        argument: String,
        statement: String,
    },
    /// A range with more than two hyphen-separated parts.
    MalformedRange {
        command: &'static str,
        argument: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "missing command after `$`"),
            Self::UnknownCommand(token) => write!(f, "unknown command `${token}`"),
            Self::UnexpectedArguments {
                command,
                count,
                statement,
            } => {
                let verb = if *count == 1 { "was" } else { "were" };
                write!(
                    f,
                    "command `${command}` takes no arguments, but {count} {verb} provided: `{statement}`"
                )
            }
            Self::MissingArgument { command } => {
                write!(f, "missing argument for command `${command}`")
            }
            Self::TooManyArguments { command, statement } => write!(
                f,
                "invalid number of arguments in `{statement}`; `${command}` takes a single argument"
            ),
            Self::InvalidArgument {
                command,
                argument,
                statement,
            } => write!(
                f,
                "unrecognized argument `{argument}` in `{statement}`; `${command}` expects a line number"
            ),
            Self::MalformedRange { command, argument } => write!(
                f,
                "range `{argument}` for `${command}` cannot contain more than 2 parts"
            ),
        }
    }
}

impl std::error::Error for CommandError {}

// ---------------------------------------------------------------------------
// BufferError
// ---------------------------------------------------------------------------

/// Errors touching the backing line store.
#[derive(Debug)]
pub enum BufferError {
    /// The named store operation failed.
    Io {
        op: &'static str,
        source: std::io::Error,
    },
}

impl BufferError {
    pub(crate) fn io(op: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { op, source }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { op, source } => write!(f, "{op} failed: {source}"),
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

/// Errors while reading one line from the terminal.
#[derive(Debug)]
pub enum InputError {
    /// Raw mode could not be entered or left.
    RawMode(std::io::Error),
    /// Reading input or echoing to the output failed.
    Io(std::io::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawMode(e) => write!(f, "raw mode: {e}"),
            Self::Io(e) => write!(f, "input: {e}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Failure while applying a parsed command.
#[derive(Debug)]
pub enum DispatchError {
    Command(CommandError),
    Buffer(BufferError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "{e}"),
            Self::Buffer(e) => write!(f, "buffer: {e}"),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<CommandError> for DispatchError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

impl From<BufferError> for DispatchError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}

// ---------------------------------------------------------------------------
// ToolchainError
// ---------------------------------------------------------------------------

/// Errors from compiling or running the generated program.
#[derive(Debug)]
pub enum ToolchainError {
    /// The process could not be spawned or awaited.
    Spawn(String),
    /// The process outlived the configured limit.
    TimedOut(String),
}

impl fmt::Display for ToolchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(msg) => write!(f, "spawn failed: {msg}"),
            Self::TimedOut(msg) => write!(f, "timed out: {msg}"),
        }
    }
}

impl std::error::Error for ToolchainError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors that end an interactive session.
#[derive(Debug)]
pub enum SessionError {
    /// Raw terminal mode could not be entered.
    Terminal(std::io::Error),
    /// Writing to the output stream failed.
    Output(std::io::Error),
    /// The buffer could not be initialized.
    Buffer(BufferError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(e) => write!(f, "terminal: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Buffer(e) => write!(f, "buffer: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<BufferError> for SessionError {
    fn from(e: BufferError) -> Self {
        Self::Buffer(e)
    }
}
