//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → CONFIG_FILE_PATH JSON file (loader.rs, serde defaults fill gaps)
//!     → validation.rs (reset out-of-range file values)
//!     → individual env var overrides (env.rs)
//!     → FixtureConfig (immutable snapshot)
//!     → shared via Arc to every handler
//! ```
//!
//! # Design Decisions
//! - Config is resolved exactly once, before the router is built
//! - A broken config file never aborts startup; it yields a warning
//! - Warnings are collected, not logged, because the log level itself
//!   comes out of the resolved config

pub mod env;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use loader::ConfigLoadWarning;
pub use resolver::{resolve, resolve_with, Resolution, CONFIG_FILE_PATH_VAR};
pub use schema::{
    ConfigSource, FeatureConfig, FixtureConfig, ProxyConfig, ServerConfig, SimulationConfig,
};
