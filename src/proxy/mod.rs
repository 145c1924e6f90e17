//! Proxy passthrough subsystem.
//!
//! # Data Flow
//! ```text
//! POST /proxy/ body {"host"?, "path"?}
//!     → target.rs (parse flat JSON map, fall back to configured defaults,
//!                  join host and path with exactly one slash)
//!     → forwarder.rs (one GET, no retry, hard deadline)
//!     → upstream body relayed as-is with 200
//! ```
//!
//! # Design Decisions
//! - Upstream status and headers are not relayed
//! - Every failure is reported as its error text; callers map it to 500

pub mod forwarder;
pub mod target;

use std::time::Duration;

use thiserror::Error;

pub use forwarder::Forwarder;
pub use target::{join_url, ProxyRequest};

/// Failure while resolving or performing an upstream call.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Request body is not a flat string-to-string JSON object.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("invalid upstream URL {url:?}: {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    #[error("failed to build upstream request: {0}")]
    BuildRequest(#[from] axum::http::Error),

    #[error("GET {url}: {message}")]
    Upstream { url: String, message: String },

    #[error("GET {url}: failed to read response body: {message}")]
    BodyRead { url: String, message: String },

    #[error("GET {url}: no response within {}s", .after.as_secs())]
    Timeout { url: String, after: Duration },
}
