//! Structured logging.
//!
//! # Responsibilities
//! - Install the global tracing subscriber once, at startup
//! - Derive the filter from `server.logLevel` unless RUST_LOG is set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FALLBACK_LEVEL: &str = "info";

/// Filter directives for the crate and its HTTP middleware at `level`.
pub fn filter_directives(level: &str) -> String {
    format!("chaos_fixture={level},tower_http={level}")
}

/// Build the filter used when RUST_LOG is absent or invalid.
///
/// An unknown level name falls back to `info`.
pub fn configured_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(FALLBACK_LEVEL)))
}

/// Initialize the tracing subscriber.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
