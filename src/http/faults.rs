//! Induced failure endpoints: `/crash/` and `/trigger/`.

use axum::extract::State;

use crate::http::response::HandlerError;
use crate::http::server::AppState;
use crate::simulate::spawn_memory_growth;

pub const CRASH_ACK: &str = "Terminating process\n";
pub const TRIGGER_ACK: &str = "Memory growth started\n";

/// Acknowledge, then have the server exit once this response is flushed.
pub async fn crash(State(state): State<AppState>) -> &'static str {
    let exit_code = state.config.simulation.exit_code;
    if state.terminator.trigger(exit_code) {
        tracing::warn!(exit_code, "Induced termination requested");
    }
    CRASH_ACK
}

/// Launch unbounded memory growth in the background and return at once.
pub async fn trigger(State(state): State<AppState>) -> Result<&'static str, HandlerError> {
    let simulation = &state.config.simulation;
    spawn_memory_growth(simulation.chunk_bytes(), simulation.chunk_limit())
        .map_err(HandlerError::Simulation)?;
    tracing::warn!(
        chunk_mb = simulation.memory_chunk_mb,
        "Induced memory growth launched"
    );
    Ok(TRIGGER_ACK)
}
