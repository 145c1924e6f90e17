//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown, drain deadline)
//!     → request.rs (request ID, access log)
//!     → probes.rs | diagnostics.rs | proxy.rs | faults.rs
//!     → response.rs (errors mapped to status + text)
//!     → Send to client
//! ```

pub mod diagnostics;
pub mod faults;
pub mod probes;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::HandlerError;
pub use server::{AppState, HttpServer, ServeOutcome};
