// Rust guideline compliant 2026-10-17

//! Console logging setup.
//!
//! The structured run log is written by [`stowage_core::RunLogger`]; this
//! module only installs the `tracing` subscriber that mirrors it to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an env-filter directive.
pub const LOG_ENV: &str = "STOWAGE_LOG";

/// Picks the filter directive.
///
/// `--log-level` wins over `STOWAGE_LOG`, which wins over the config file.
pub fn directive(cli_level: Option<&str>, config_level: Option<&str>) -> String {
    cli_level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()))
        .or_else(|| config_level.map(str::to_string))
        .unwrap_or_else(|| "info".to_string())
}

/// Installs the global console subscriber.
///
/// An invalid directive falls back to `info`. A second installation is a
/// no-op.
pub fn init(directive: &str, json: bool) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
