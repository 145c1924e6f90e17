//! Diagnostic HTTP fixture for exercising container orchestration failure
//! paths: health probes, a configurable proxy passthrough, and on-demand
//! process termination or memory exhaustion.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod simulate;
pub mod status;

pub use config::FixtureConfig;
pub use http::{HttpServer, ServeOutcome};
