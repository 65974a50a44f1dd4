//! Reporting utilities: plain-text tables for the CLI.

pub mod format;

pub use format::*;
