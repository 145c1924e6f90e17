//! Read-only diagnostic endpoints: `/status/` and `/config/`.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::{ConfigSource, FixtureConfig};
use crate::http::server::AppState;
use crate::status::StatusReport;

/// Configuration echo, in the config file's shape plus its source.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReport {
    #[serde(flatten)]
    pub config: FixtureConfig,
    pub config_source: ConfigSource,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(StatusReport::collect(&state.started, &state.endpoints))
}

pub async fn config(State(state): State<AppState>) -> Json<ConfigReport> {
    Json(ConfigReport {
        config: FixtureConfig::clone(&state.config),
        config_source: ConfigSource::clone(&state.source),
    })
}
