//! creppl: build a C++ program one line at a time from the terminal.
//!
//! Every accepted line is written into a line-indexed source file at the
//! current cursor line, the file is compiled, and the program is run. Lines
//! starting with `$` are commands that move the cursor, delete lines, list
//! the file, or end the session.
//!
//! # Quick start
//!
//! ```no_run
//! use creppl::buffer::{LineBuffer, MemoryStore};
//! use creppl::commands::{run_statement, Action};
//!
//! let skeleton = "#include <iostream>\n\nint main() {\n\n}\n";
//! let mut buffer = LineBuffer::with_skeleton(MemoryStore::default(), skeleton).unwrap();
//! let action = run_statement(&mut buffer, "$goto 3", skeleton).unwrap();
//! assert_eq!(action, Action::Done);
//! ```

pub mod buffer;
pub mod build_info;
pub mod commands;
pub mod config;
pub mod error;
pub mod preflight;
pub mod session;
#[cfg(test)]
pub mod testsupport;
pub mod toolchain;
pub mod tui;
