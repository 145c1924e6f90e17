//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, resolver, simulators:
//!     → logging.rs (structured tracing events, filter from config)
//!
//! Every heap allocation in the process:
//!     → alloc.rs (atomic live/cumulative byte counters)
//!     → read by the status reporter
//! ```
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured log level
//! - Allocation counters use relaxed atomics; they are diagnostics, not accounting

pub mod alloc;
pub mod logging;
