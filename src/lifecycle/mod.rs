//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Resolve config → Init logging → Bind listener → Serve
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → graceful stop, exit 0
//!
//! Induced termination (simulate::terminate):
//!     POST /crash/ → stop accepting → drain → exit non-zero
//! ```

pub mod signals;

pub use signals::shutdown_signal;
