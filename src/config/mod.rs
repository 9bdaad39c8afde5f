//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags (cli.rs)      optional TOML file
//!          │                              │
//!          │                   loader.rs (parse & deserialize)
//!          └──────────── overlay ─────────┘
//!                          │
//!              validation.rs (semantic checks)
//!                          │
//!              Config (validated, immutable)
//!              → shared via Arc with every request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::Config;
pub use schema::TlsConfig;
