//! TCP listener bootstrap.
//!
//! # Responsibilities
//! - Bind to the configured port on all interfaces
//! - Hand the socket to axum (plain) or axum-server (TLS)

use std::net::{Ipv4Addr, SocketAddr};

use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(SocketAddr, std::io::Error),
    /// Failed to convert the socket for the TLS acceptor.
    Convert(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(addr, e) => write!(f, "Failed to bind {}: {}", addr, e),
            ListenerError::Convert(e) => write!(f, "Failed to prepare listener: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// A bound TCP listener.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to `0.0.0.0:<port>`.
    pub async fn bind(port: u16) -> Result<Self, ListenerError> {
        Self::bind_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).await
    }

    /// Bind to an explicit address.
    pub async fn bind_addr(addr: SocketAddr) -> Result<Self, ListenerError> {
        let inner = TcpListener::bind(addr)
            .await
            .map_err(|e| ListenerError::Bind(addr, e))?;

        tracing::debug!(address = ?inner.local_addr().ok(), "Listener bound");
        Ok(Self { inner })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// The tokio listener, for `axum::serve`.
    pub fn into_tokio(self) -> TcpListener {
        self.inner
    }

    /// A non-blocking std listener, for `axum_server::from_tcp_rustls`.
    pub fn into_std(self) -> Result<std::net::TcpListener, ListenerError> {
        let listener = self.inner.into_std().map_err(ListenerError::Convert)?;
        listener.set_nonblocking(true).map_err(ListenerError::Convert)?;
        Ok(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let listener = Listener::bind_addr("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);

        let std_listener = listener.into_std().unwrap();
        assert_eq!(std_listener.local_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn port_in_use_is_bind_error() {
        let first = Listener::bind_addr("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = first.local_addr().unwrap();

        let err = Listener::bind_addr(addr).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind(a, _) if a == addr));
        assert!(err.to_string().starts_with("Failed to bind"));
    }
}
