//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same structure can be read from a
//! TOML file and then overridden by command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirector.
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// TCP port to bind to.
    pub port: u16,

    /// Secret expected in the halt header. `None` disables remote halting.
    pub halt: Option<String>,

    /// Serve TLS instead of plain HTTP. Also decides the redirect scheme.
    pub https: bool,

    /// Log every redirect.
    pub verbose: bool,

    /// Log as much as possible.
    pub debug: bool,

    /// Grace period between a successful halt response and process exit.
    pub halt_delay_ms: u64,

    /// Certificate material used when `https` is set.
    pub tls: TlsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 80,
            halt: None,
            https: false,
            verbose: false,
            debug: false,
            halt_delay_ms: 1000,
            tls: TlsConfig::default(),
        }
    }
}

impl Config {
    /// Grace period as a `Duration`.
    pub fn halt_delay(&self) -> Duration {
        Duration::from_millis(self.halt_delay_ms)
    }
}

/// TLS certificate locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to the default certificate chain (PEM).
    pub cert_path: PathBuf,

    /// Path to the default private key (PEM).
    pub key_path: PathBuf,

    /// Certificate served for SNI names other than `localhost`.
    pub alt_cert_path: Option<PathBuf>,

    /// Private key matching `alt_cert_path`.
    pub alt_key_path: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: PathBuf::from("ssl/cert.pem"),
            key_path: PathBuf::from("ssl/key.pem"),
            alt_cert_path: None,
            alt_key_path: None,
        }
    }
}
