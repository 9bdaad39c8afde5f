//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, hand socket to the HTTP layer)
//!     → tls.rs (optional TLS handshake, SNI certificate choice)
//!     → http::server (pipeline)
//! ```
//!
//! # Design Decisions
//! - Every connection runs on its own task; accepting never waits on a handler
//! - TLS is optional and handled transparently

pub mod listener;
pub mod tls;

pub use listener::{Listener, ListenerError};
pub use tls::{SecureContext, TlsError};
