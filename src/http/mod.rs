//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, catch-all handler)
//!     → request.rs (borrow method, headers, target into a context)
//!     → [pipeline decides] (url.rs rebuilds original and www. URLs)
//!     → response.rs (fixed headers, single write)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod url;

pub use request::{RequestContext, X_APEX2WWW_HALT};
pub use response::{Reply, VERSION, X_APEX2WWW_VERSION};
pub use server::{RedirectServer, ServeError};
pub use url::{ReconstructedUrl, Scheme, UrlError};
