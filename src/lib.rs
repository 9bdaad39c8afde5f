//! apex2www: redirects apex-domain requests to their `www.` counterpart.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod pipeline;

pub use config::Config;
pub use http::RedirectServer;
pub use lifecycle::Shutdown;
pub use pipeline::Pipeline;
