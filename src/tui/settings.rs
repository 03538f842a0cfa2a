//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, labels, banner text
//! and colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_MARKER: &str = ">>>";
pub const PROMPT_LINE_WIDTH: usize = 5;
pub const PROMPT_SEPARATOR: &str = ": ";

// ---------------------------------------------------------------------------
// Listing layout
// ---------------------------------------------------------------------------

pub const LISTING_NUMBER_WIDTH: usize = 4;
pub const LISTING_SEPARATOR: &str = "| ";

// ---------------------------------------------------------------------------
// Sections / labels
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

pub const BANNER_TITLE: &str = "Creppl - C++ REPL (Read, Evaluate, Print, Loop)";
pub const BANNER_HINT: &str = "Type \"$help\" for more information.";

pub const HELP_DESCRIPTION_TITLE: &str = "DESCRIPTION";
pub const HELP_DESCRIPTION: &str = "Every line typed at the prompt is written into the current file at the \
cursor line, then the file is compiled and the program is run. Lines starting with `$` are commands.";
pub const HELP_COMMANDS_TITLE: &str = "COMMANDS";
pub const HELP_INDENT: &str = "    ";
pub const HELP_USAGE_WIDTH: usize = 18;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_BANNER_TITLE: Color = Color::Cyan;
pub const COLOR_BANNER_META: Color = Color::DarkGrey;
pub const COLOR_LISTING_NUMBER: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::Cyan;
pub const COLOR_COMMAND_USAGE: Color = Color::Yellow;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

/// Prompt for the given cursor line, e.g. `>>> [4] : `.
pub fn input_prompt(cursor: usize) -> String {
    let label = format!("[{cursor}]");
    format!(
        "{PROMPT_MARKER}{label:^width$}{PROMPT_SEPARATOR}",
        width = PROMPT_LINE_WIDTH
    )
}

/// One numbered row of a `$print` listing.
pub fn listing_row(number: usize, line: &str) -> String {
    let number = number.to_string();
    format!(
        "{number:^width$}{LISTING_SEPARATOR}{line}",
        width = LISTING_NUMBER_WIDTH
    )
}
