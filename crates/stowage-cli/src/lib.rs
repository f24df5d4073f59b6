// Rust guideline compliant 2026-10-17

//! Stowage CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod output;
pub mod telemetry;

pub use commands::{ArchiveOverrides, EventLogOverrides};
pub use output::{create_formatter, OutputFormatter};
