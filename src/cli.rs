//! Command-line interface.
//!
//! Flags override values read from `--config`; anything left unset falls
//! back to the defaults in [`Config`].

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::loader::{read_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "apex2www")]
#[command(version, about = "Apex/root redirector to www")]
#[command(
    long_about = "HTTP server that redirects all requests to www.",
    disable_version_flag = true,
    disable_help_flag = true
)]
pub struct Cli {
    /// TCP port to bind to [default: 80]
    #[arg(long, value_name = "integer")]
    pub port: Option<u16>,

    /// If this value is provided in the X-Apex2www-Halt header, the app stops
    #[arg(long, value_name = "string")]
    pub halt: Option<String>,

    /// Listen to secure requests, instead of plain HTTP
    #[arg(long)]
    pub https: bool,

    /// Print every HTTP request to the console
    #[arg(long)]
    pub verbose: bool,

    /// Print as much as possible to the console
    #[arg(long)]
    pub debug: bool,

    /// PEM certificate chain used with --https [default: ssl/cert.pem]
    #[arg(long, value_name = "path")]
    pub cert: Option<PathBuf>,

    /// PEM private key used with --https [default: ssl/key.pem]
    #[arg(long, value_name = "path")]
    pub key: Option<PathBuf>,

    /// Milliseconds between a halt response and exit [default: 1000]
    #[arg(long, value_name = "ms")]
    pub halt_delay_ms: Option<u64>,

    /// TOML file with default settings
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Output the version number
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Print this help information
    #[arg(short = '?', long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    /// Merge flags over the optional config file and validate the result.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => Config::default(),
        };

        if let Some(port) = self.port {
            config.port = port;
        }
        if self.halt.is_some() {
            config.halt = self.halt;
        }
        if let Some(delay) = self.halt_delay_ms {
            config.halt_delay_ms = delay;
        }
        if let Some(cert) = self.cert {
            config.tls.cert_path = cert;
        }
        if let Some(key) = self.key {
            config.tls.key_path = key;
        }
        config.https |= self.https;
        config.verbose |= self.verbose;
        config.debug |= self.debug;

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
