//! Liveness and greeting endpoints.

use axum::{extract::Query, Json};
use serde_json::{json, Value};

/// `/` and any unrouted path.
pub async fn active() -> Json<Value> {
    Json(json!({ "active": true }))
}

/// `/healthz/`.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "healthy": true }))
}

/// `/hello/?name=...`. Repeated `name` keys use the first value.
pub async fn hello(Query(params): Query<Vec<(String, String)>>) -> String {
    let name = params
        .into_iter()
        .find_map(|(key, value)| (key == "name").then_some(value))
        .unwrap_or_default();
    format!("Hello {name}")
}
