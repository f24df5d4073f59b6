// Rust guideline compliant 2026-10-17

//! Implementation of the `stowage init` command.
//!
//! Writes a starter configuration file holding every default.

use crate::output::OutputFormatter;
use anyhow::Result;
use std::path::Path;
use stowage_app::{AppError, RunStatus};
use stowage_core::Config;

/// Default file written by `stowage init`.
pub const DEFAULT_CONFIG_FILE: &str = "stowage.toml";

/// Writes a starter configuration to `path`.
///
/// # Arguments
///
/// * `path` - Target file
/// * `force` - Overwrite an existing file
/// * `formatter` - Output formatter
///
/// # Errors
///
/// Returns an error if:
/// - The file exists and `force` is not set
/// - The file cannot be written
pub fn execute(path: &Path, force: bool, formatter: &dyn OutputFormatter) -> Result<RunStatus> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    Config::default().save(path).map_err(AppError::from)?;

    println!(
        "{}",
        formatter.format_notice(
            "init",
            &format!(
                "Wrote {}. Set [archive] source, destination and app_name before running `stowage files`.",
                path.display()
            ),
        )
    );
    Ok(RunStatus::Clean)
}
