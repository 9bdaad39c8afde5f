//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port > 0, halt delay bounded)
//! - Detect incomplete TLS pairs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::Config;

/// Longest accepted halt grace period.
pub const MAX_HALT_DELAY_MS: u64 = 60_000;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("port must be a positive integer")]
    ZeroPort,

    #[error("halt secret must not be empty")]
    EmptyHaltSecret,

    #[error("halt delay must be between 1 and 60000 ms, got {0}")]
    HaltDelayOutOfRange(u64),

    #[error("alternate certificate and key must be given together")]
    IncompleteAltPair,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.halt.as_deref() == Some("") {
        errors.push(ValidationError::EmptyHaltSecret);
    }

    if !(1..=MAX_HALT_DELAY_MS).contains(&config.halt_delay_ms) {
        errors.push(ValidationError::HaltDelayOutOfRange(config.halt_delay_ms));
    }

    if config.tls.alt_cert_path.is_some() != config.tls.alt_key_path.is_some() {
        errors.push(ValidationError::IncompleteAltPair);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&Config::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = Config::default();
        config.port = 0;
        config.halt = Some(String::new());
        config.halt_delay_ms = 0;
        config.tls.alt_cert_path = Some(PathBuf::from("alt.pem"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroPort,
                ValidationError::EmptyHaltSecret,
                ValidationError::HaltDelayOutOfRange(0),
                ValidationError::IncompleteAltPair,
            ]
        );
    }

    #[test]
    fn complete_alt_pair_passes() {
        let mut config = Config::default();
        config.tls.alt_cert_path = Some(PathBuf::from("alt-cert.pem"));
        config.tls.alt_key_path = Some(PathBuf::from("alt-key.pem"));
        assert!(validate_config(&config).is_ok());
    }
}
