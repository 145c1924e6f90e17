//! Handler errors and their HTTP mapping.
//!
//! # Design Decisions
//! - Status is fixed before the body is produced; one response value per error
//! - Proxy failures surface as 500 with the raw error text, never 502
//! - Wrong verbs on restricted endpoints surface as 405

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::ProxyError;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Method not allowed")]
    MethodNotAllowed(Method),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error("failed to start memory growth: {0}")]
    Simulation(#[source] std::io::Error),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::Proxy(_) | HandlerError::Simulation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            HandlerError::MethodNotAllowed(method) => {
                tracing::debug!(method = %method, "Rejected method");
            }
            _ => tracing::error!(error = %self, "Request failed"),
        }
        (status, self.to_string()).into_response()
    }
}

/// Method-router fallback for verb-restricted endpoints.
pub async fn method_not_allowed(method: Method) -> HandlerError {
    HandlerError::MethodNotAllowed(method)
}
