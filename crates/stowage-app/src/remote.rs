// Rust guideline compliant 2026-10-16

//! Remote event-log sources.
//!
//! The backup loop only needs four things from a host: whether it is in
//! scope, whether it answers, where its log files live and how to clear a
//! log. [`ShareLogSource`] answers them over the administrative file share.

use crate::error::Result;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use stowage_core::EventLogConfig;

/// Port probed to decide whether a host's file share is reachable.
pub const SMB_PORT: u16 = 445;

/// Connect timeout for the reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// File extension of exported event logs.
pub const EVENT_LOG_EXTENSION: &str = "evtx";

/// Where remote event logs come from.
pub trait RemoteLogSource {
    /// Returns the hosts to back up, in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the host list cannot be resolved.
    fn hosts(&self) -> Result<Vec<String>>;

    /// Returns true if `host` answers the reachability probe.
    fn is_reachable(&self, host: &str) -> bool;

    /// Returns the path of `log` on `host` as seen from this machine.
    fn remote_log_path(&self, host: &str, log: &str) -> PathBuf;

    /// Clears `log` on `host`.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear command cannot be run or fails.
    fn clear_log(&self, host: &str, log: &str) -> io::Result<()>;
}

/// [`RemoteLogSource`] over the administrative share of each host.
#[derive(Debug, Clone)]
pub struct ShareLogSource {
    hosts: Vec<String>,
    share_template: String,
}

impl ShareLogSource {
    /// Creates a source for an explicit host list.
    ///
    /// # Arguments
    ///
    /// * `hosts` - Hosts in processing order
    /// * `share_template` - Remote log directory with a `{host}` placeholder
    pub fn new(hosts: Vec<String>, share_template: impl Into<String>) -> Self {
        Self {
            hosts,
            share_template: share_template.into(),
        }
    }

    /// Creates a source from validated event-log settings.
    pub fn from_config(config: &EventLogConfig) -> Self {
        Self::new(config.hosts.clone(), config.share_template.clone())
    }

    /// Returns the remote log directory for `host`.
    pub fn share_dir(&self, host: &str) -> PathBuf {
        PathBuf::from(self.share_template.replace("{host}", host))
    }
}

impl RemoteLogSource for ShareLogSource {
    fn hosts(&self) -> Result<Vec<String>> {
        Ok(self.hosts.clone())
    }

    fn is_reachable(&self, host: &str) -> bool {
        let addrs = match (host, SMB_PORT).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(err) => {
                tracing::debug!(host, error = %err, "Host name did not resolve");
                return false;
            }
        };
        addrs
            .into_iter()
            .any(|addr| TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok())
    }

    fn remote_log_path(&self, host: &str, log: &str) -> PathBuf {
        self.share_dir(host)
            .join(format!("{log}.{EVENT_LOG_EXTENSION}"))
    }

    fn clear_log(&self, host: &str, log: &str) -> io::Result<()> {
        let output = Command::new("wevtutil")
            .arg("cl")
            .arg(log)
            .arg(format!("/r:{host}"))
            .output()?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(io::Error::other(format!(
            "wevtutil exited with {}: {}",
            output.status,
            stderr.trim()
        )))
    }
}
