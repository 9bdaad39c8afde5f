//! TLS configuration and certificate loading.
//!
//! # Responsibilities
//! - Read PEM certificate/key pairs from disk
//! - Build a rustls server config limited to TLS 1.2 and 1.3
//! - Pick a certificate per SNI name
//!
//! # Design Decisions
//! - `localhost` and clients without SNI always get the default pair
//! - Any other name gets the alternate pair when one is configured

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::aws_lc_rs;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::{ClientHello, ResolvesServerCert};
use rustls::sign::CertifiedKey;
use rustls::ServerConfig;
use thiserror::Error;

use crate::config::TlsConfig;

/// Name that always resolves to the default certificate.
const DEFAULT_SNI_NAME: &str = "localhost";

/// Error type for TLS material loading.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid PEM in {path}: {source}")]
    Pem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No certificate found in {0}")]
    NoCertificate(PathBuf),

    #[error("No private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("Unsupported private key in {path}: {source}")]
    Key {
        path: PathBuf,
        source: rustls::Error,
    },

    #[error("TLS configuration rejected: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Raw PEM bytes of one certificate chain and its key.
#[derive(Debug, Clone)]
pub struct PemPair {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

impl PemPair {
    /// Read both files.
    pub async fn read(cert_path: &Path, key_path: &Path) -> Result<Self, TlsError> {
        let cert_pem = read_file(cert_path).await?;
        let key_pem = read_file(key_path).await?;
        Ok(Self {
            cert_path: cert_path.to_path_buf(),
            key_path: key_path.to_path_buf(),
            cert_pem,
            key_pem,
        })
    }

    /// Decode the PEM material into a signing-ready certificate.
    pub fn certified_key(&self) -> Result<CertifiedKey, TlsError> {
        let certs = rustls_pemfile::certs(&mut self.cert_pem.as_slice())
            .collect::<Result<Vec<CertificateDer<'static>>, _>>()
            .map_err(|source| TlsError::Pem {
                path: self.cert_path.clone(),
                source,
            })?;
        if certs.is_empty() {
            return Err(TlsError::NoCertificate(self.cert_path.clone()));
        }

        let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut self.key_pem.as_slice())
            .map_err(|source| TlsError::Pem {
                path: self.key_path.clone(),
                source,
            })?
            .ok_or_else(|| TlsError::NoPrivateKey(self.key_path.clone()))?;

        let signing_key = aws_lc_rs::sign::any_supported_type(&key).map_err(|source| TlsError::Key {
            path: self.key_path.clone(),
            source,
        })?;

        Ok(CertifiedKey::new(certs, signing_key))
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, TlsError> {
    tokio::fs::read(path).await.map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Certificate material for the HTTPS listener.
#[derive(Debug, Clone)]
pub struct SecureContext {
    default: PemPair,
    alternate: Option<PemPair>,
}

impl SecureContext {
    /// Load the default pair and, when configured, the alternate one.
    pub async fn load(config: &TlsConfig) -> Result<Self, TlsError> {
        let default = PemPair::read(&config.cert_path, &config.key_path).await?;
        let alternate = match (&config.alt_cert_path, &config.alt_key_path) {
            (Some(cert), Some(key)) => Some(PemPair::read(cert, key).await?),
            _ => None,
        };
        Ok(Self { default, alternate })
    }

    /// Length in bytes of the default certificate file.
    pub fn cert_len(&self) -> usize {
        self.default.cert_pem.len()
    }

    /// Length in bytes of the default key file.
    pub fn key_len(&self) -> usize {
        self.default.key_pem.len()
    }

    /// Build the SNI resolver from the loaded pairs.
    pub fn resolver(&self) -> Result<SniResolver, TlsError> {
        let alternate = match &self.alternate {
            Some(pair) => Some(Arc::new(pair.certified_key()?)),
            None => None,
        };
        Ok(SniResolver {
            default: Arc::new(self.default.certified_key()?),
            alternate,
        })
    }

    /// A rustls server config accepting TLS 1.2 and 1.3 only.
    pub fn server_config(&self) -> Result<ServerConfig, TlsError> {
        let mut config = ServerConfig::builder_with_provider(Arc::new(aws_lc_rs::default_provider()))
            .with_protocol_versions(&[&rustls::version::TLS12, &rustls::version::TLS13])?
            .with_no_client_auth()
            .with_cert_resolver(Arc::new(self.resolver()?));
        config.alpn_protocols = vec![b"http/1.1".to_vec()];
        Ok(config)
    }

    /// The server config wrapped for axum-server.
    pub fn rustls_config(&self) -> Result<RustlsConfig, TlsError> {
        Ok(RustlsConfig::from_config(Arc::new(self.server_config()?)))
    }
}

/// Chooses a certificate by requested server name.
#[derive(Debug)]
pub struct SniResolver {
    default: Arc<CertifiedKey>,
    alternate: Option<Arc<CertifiedKey>>,
}

impl SniResolver {
    /// Certificate for the given SNI name (or for no SNI at all).
    pub fn select(&self, server_name: Option<&str>) -> Arc<CertifiedKey> {
        match (server_name, &self.alternate) {
            (Some(name), Some(alternate)) if !name.eq_ignore_ascii_case(DEFAULT_SNI_NAME) => {
                Arc::clone(alternate)
            }
            _ => Arc::clone(&self.default),
        }
    }
}

impl ResolvesServerCert for SniResolver {
    fn resolve(&self, client_hello: ClientHello<'_>) -> Option<Arc<CertifiedKey>> {
        let server_name = client_hello.server_name();
        tracing::trace!(server_name = ?server_name, "Resolving certificate");
        Some(self.select(server_name))
    }
}
