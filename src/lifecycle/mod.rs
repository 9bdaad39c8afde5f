//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Pick transport → Load TLS material → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Halt effect (after grace delay) or Ctrl-C → broadcast → stop serving → exit 0
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Shutdown does not drain: the serve future is dropped

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
