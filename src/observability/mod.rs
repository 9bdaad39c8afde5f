//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pipeline stages, server, lifecycle
//!     → tracing events (structured fields)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stdout
//! ```

pub mod logging;
