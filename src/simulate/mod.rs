//! Induced failure simulators.
//!
//! # Data Flow
//! ```text
//! POST /crash/
//!     → terminate.rs: Terminator::trigger(exit_code)
//!     → HTTP server stops accepting, flushes in-flight responses
//!     → main exits with the requested status
//!
//! /trigger/
//!     → memory.rs: spawn_memory_growth(chunk_bytes, chunk_limit)
//!     → detached thread allocates and retains chunks until the process dies
//! ```
//!
//! # Design Decisions
//! - Both operations are one-way: no cancellation, no result channel
//! - Termination is reported to `main` rather than exiting inside the library,
//!   so the response is flushed before the process goes away

pub mod memory;
pub mod terminate;

pub use memory::{spawn_memory_growth, MemoryGrowth};
pub use terminate::Terminator;
