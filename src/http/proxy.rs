//! `POST /proxy/` handler.

use axum::{body::Bytes, extract::State};

use crate::http::response::HandlerError;
use crate::http::server::AppState;
use crate::proxy::ProxyRequest;

/// Forward one GET upstream and relay its body with status 200.
pub async fn forward(State(state): State<AppState>, body: Bytes) -> Result<Bytes, HandlerError> {
    let request = ProxyRequest::from_body(&body)?;
    let url = request.target_url(&state.config.proxy);

    tracing::info!(
        url = %url,
        timeout_secs = state.forwarder.timeout().as_secs(),
        "Forwarding proxy request"
    );

    Ok(state.forwarder.fetch(&url).await?)
}
