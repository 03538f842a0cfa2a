//! Terminal user-interface building blocks.
//!
//! This module hosts the raw-mode line reader, its key decoder and history
//! ring, and the output renderer. Input state and output styling stay in
//! separate files so the session loop only wires them together.

mod edit_line;
pub mod history;
pub mod input;
pub mod keys;
pub mod render;
pub mod settings;

pub use edit_line::EditLine;
pub use history::{HistoryRing, HISTORY_CAPACITY};
pub use input::{CookedMode, CrosstermMode, LineReader, ReadOutcome, TerminalMode};
pub use render::Renderer;
