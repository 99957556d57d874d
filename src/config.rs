//! Configuration loading and protocol timing
//!
//! # Endpoint file format
//!
//! The DMM endpoint is read from a JSON file:
//!
//! ```json
//! {
//!   "sapient": {
//!     "ip": "192.168.1.50",
//!     "port": 55000,
//!     "enabled": true
//!   }
//! }
//! ```
//!
//! A missing file, a missing `sapient` section, or `enabled: false` all
//! disable the module ([`Endpoint::load`] returns `Ok(None)`); a present but
//! invalid endpoint is a hard configuration error.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default endpoint configuration path on the device.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sapient_config.json";

/// Default location of the persisted node id.
pub const DEFAULT_NODE_ID_PATH: &str = "/var/lib/sapient/node_id.txt";

/// DMM endpoint. Built once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    sapient: Option<EndpointSection>,
}

#[derive(Debug, Deserialize)]
struct EndpointSection {
    ip: String,
    port: u16,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Endpoint {
    /// Load the endpoint from a JSON config file.
    ///
    /// Returns `Ok(None)` when the module is disabled: file absent, section
    /// absent, or `enabled` false.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Endpoint>> {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                log::info!(
                    "No SAPIENT config at {}, module disabled",
                    path.as_ref().display()
                );
                return Ok(None);
            }
        };

        let parsed: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {e}")))?;

        let section = match parsed.sapient {
            Some(s) => s,
            None => {
                log::info!("SAPIENT section missing from config, module disabled");
                return Ok(None);
            }
        };

        if !section.enabled {
            log::info!("SAPIENT is disabled in config");
            return Ok(None);
        }

        let endpoint = Endpoint {
            host: section.ip,
            port: section.port,
            enabled: true,
        };
        endpoint.validate()?;

        log::info!("SAPIENT config loaded: {}:{}", endpoint.host, endpoint.port);
        Ok(Some(endpoint))
    }

    /// Validate the host as dotted IPv4 and the port as nonzero.
    pub fn validate(&self) -> Result<()> {
        if self.host.parse::<Ipv4Addr>().is_err() {
            return Err(Error::Config(format!(
                "invalid IPv4 address: {}",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(Error::Config("port must be in 1..=65535".to_string()));
        }
        Ok(())
    }
}

/// Protocol timing knobs.
///
/// Defaults are the values the protocol requires. Overriding them exists so
/// the long-horizon rules (120 s re-registration window, 30 s ack timeout)
/// can be exercised by tests with compressed clocks; deployments use
/// `Timing::default()`.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Per-attempt connect timeout.
    pub connect_timeout: Duration,
    /// Initial attach: number of attempts before handing off to the
    /// background reconnect worker.
    pub initial_attempts: u32,
    /// Delay between initial attach attempts.
    pub initial_retry_delay: Duration,
    /// Fixed reconnect cadence. The protocol requires a constant interval,
    /// not exponential backoff.
    pub reconnect_interval: Duration,
    /// No RegistrationAck within this window forces a reconnect plus an
    /// unconditional re-registration.
    pub registration_ack_timeout: Duration,
    /// Periodic status report interval.
    pub status_interval: Duration,
    /// Start-up delay before the status worker's first tick.
    pub status_startup_delay: Duration,
    /// Session-alive window: within this many seconds of a disconnect,
    /// re-registration is skipped and status reports are suppressed.
    pub disconnect_threshold: Duration,
    /// Receive poll timeout; bounds shutdown latency of the receive worker.
    pub recv_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            initial_attempts: 3,
            initial_retry_delay: Duration::from_secs(5),
            reconnect_interval: Duration::from_secs(10),
            registration_ack_timeout: Duration::from_secs(30),
            status_interval: Duration::from_secs(5),
            status_startup_delay: Duration::from_secs(2),
            disconnect_threshold: Duration::from_secs(120),
            recv_timeout: Duration::from_secs(1),
        }
    }
}

/// Full client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub node_id_path: PathBuf,
    pub timing: Timing,
}

impl ClientConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            node_id_path: PathBuf::from(DEFAULT_NODE_ID_PATH),
            timing: Timing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_disables_module() {
        let result = Endpoint::load("/nonexistent/sapient_config.json").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn disabled_flag_disables_module() {
        let file = write_config(r#"{"sapient": {"ip": "10.0.0.1", "port": 55000, "enabled": false}}"#);
        assert!(Endpoint::load(file.path()).unwrap().is_none());
    }

    #[test]
    fn missing_section_disables_module() {
        let file = write_config(r#"{"other": 1}"#);
        assert!(Endpoint::load(file.path()).unwrap().is_none());
    }

    #[test]
    fn loads_valid_endpoint() {
        let file = write_config(r#"{"sapient": {"ip": "127.0.0.1", "port": 55000}}"#);
        let ep = Endpoint::load(file.path()).unwrap().unwrap();
        assert_eq!(ep.host, "127.0.0.1");
        assert_eq!(ep.port, 55000);
        assert!(ep.enabled);
    }

    #[test]
    fn rejects_invalid_ip() {
        let file = write_config(r#"{"sapient": {"ip": "dmm.local", "port": 55000}}"#);
        assert!(matches!(Endpoint::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_port_zero() {
        let file = write_config(r#"{"sapient": {"ip": "10.0.0.1", "port": 0}}"#);
        assert!(matches!(Endpoint::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let file = write_config("{ not json");
        assert!(matches!(Endpoint::load(file.path()), Err(Error::Config(_))));
    }
}
