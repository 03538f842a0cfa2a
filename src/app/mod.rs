//! Binary-local application orchestration helpers.
//!
//! The main binary keeps wiring logic in `main.rs`, while this module hosts
//! the filesystem and file-name startup steps to keep entrypoint code small.

pub(crate) mod startup;
