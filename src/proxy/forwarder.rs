//! Outbound HTTP client for the proxy passthrough.
//!
//! # Responsibilities
//! - Issue exactly one GET per proxy request, over http or https
//! - Enforce `requestTimeoutSeconds` over connect, headers and body
//! - Collect the upstream body without inspecting it

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::proxy::ProxyError;

const USER_AGENT: &str = concat!("chaos-fixture/", env!("CARGO_PKG_VERSION"));

/// Shared upstream client; cheap to clone.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(timeout: Duration) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new())
            .retry_canceled_requests(false)
            .build(connector);

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return the raw response body.
    ///
    /// The upstream status is logged but otherwise ignored.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, ProxyError> {
        let uri: Uri = url.parse().map_err(|source| ProxyError::InvalidTarget {
            url: url.to_string(),
            source,
        })?;

        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::USER_AGENT, USER_AGENT)
            .body(Body::empty())?;

        let start = Instant::now();
        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| ProxyError::Upstream {
                    url: url.to_string(),
                    message: error_chain(&e),
                })?;

            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| ProxyError::BodyRead {
                    url: url.to_string(),
                    message: error_chain(&e),
                })?
                .to_bytes();

            tracing::debug!(
                url = %url,
                upstream_status = %status,
                bytes = body.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream response received"
            );
            Ok::<_, ProxyError>(body)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }),
        }
    }
}

/// Render an error with all of its sources, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
