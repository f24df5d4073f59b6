// Rust guideline compliant 2026-10-13

//! Host name detection for log headers.

use std::env;

/// Returns the name of the machine running the process.
///
/// Checked in order: `STOWAGE_HOSTNAME`, `COMPUTERNAME`, `HOSTNAME`, then the
/// operating system. Falls back to `"unknown"`.
#[must_use]
pub fn host_name() -> String {
    for var in ["STOWAGE_HOSTNAME", "COMPUTERNAME", "HOSTNAME"] {
        if let Ok(name) = env::var(var) {
            if !name.is_empty() {
                return name;
            }
        }
    }

    if let Some(name) = os_host_name() {
        return name;
    }

    tracing::warn!("could not determine host name, using 'unknown'");
    "unknown".to_string()
}

#[cfg(unix)]
fn os_host_name() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => name.to_str().filter(|s| !s.is_empty()).map(str::to_string),
        Err(err) => {
            tracing::warn!(error = %err, "gethostname failed");
            None
        }
    }
}

#[cfg(not(unix))]
fn os_host_name() -> Option<String> {
    None
}
