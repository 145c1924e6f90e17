//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Register optional endpoints according to feature flags
//! - Wire up middleware (request ID, tracing, access log)
//! - Serve until an external shutdown or an induced termination
//! - Bound the drain after an induced termination

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{any, get, post, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigSource, FeatureConfig, FixtureConfig};
use crate::http::request::{log_request, UuidRequestId};
use crate::http::response::method_not_allowed;
use crate::http::{diagnostics, faults, probes, proxy};
use crate::proxy::Forwarder;
use crate::simulate::Terminator;
use crate::status::StartTime;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FixtureConfig>,
    pub source: Arc<ConfigSource>,
    pub forwarder: Forwarder,
    pub started: StartTime,
    pub endpoints: Arc<[&'static str]>,
    pub terminator: Terminator,
}

/// Why [`HttpServer::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// External shutdown; exit normally.
    Stopped,
    /// `/crash/` was invoked; the process must exit with `exit_code`.
    Terminated { exit_code: i32 },
}

/// HTTP server for the fixture.
pub struct HttpServer {
    router: Router,
    config: Arc<FixtureConfig>,
    terminator: Terminator,
}

impl HttpServer {
    /// Create a new HTTP server from a resolved configuration snapshot.
    pub fn new(config: FixtureConfig, source: ConfigSource) -> Self {
        let config = Arc::new(config);
        let terminator = Terminator::new();

        let state = AppState {
            config: config.clone(),
            source: Arc::new(source),
            forwarder: Forwarder::new(config.proxy.request_timeout()),
            started: StartTime::now(),
            endpoints: registered_endpoints(&config.features).into(),
            terminator: terminator.clone(),
        };

        let router = Self::build_router(&config.features, state);
        Self {
            router,
            config,
            terminator,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(features: &FeatureConfig, state: AppState) -> Router {
        let mut router = Router::new().route("/", any(probes::active));
        router = route_both(router, "/healthz", any(probes::healthz));
        router = route_both(router, "/hello", any(probes::hello));

        if features.enable_status_endpoint {
            router = route_both(
                router,
                "/status",
                get(diagnostics::status).fallback(method_not_allowed),
            );
        }
        if features.enable_config_endpoint {
            router = route_both(
                router,
                "/config",
                get(diagnostics::config).fallback(method_not_allowed),
            );
        }

        router = route_both(router, "/proxy", post(proxy::forward).fallback(method_not_allowed));
        router = route_both(router, "/crash", post(faults::crash).fallback(method_not_allowed));
        router = route_both(router, "/trigger", any(faults::trigger));

        router
            .fallback(probes::active)
            .with_state(state)
            .layer(middleware::from_fn(log_request))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns when `shutdown` resolves or after `/crash/` is invoked. After
    /// an induced termination the listener is closed at once and in-flight
    /// responses get `simulation.drainTimeoutSeconds` to flush.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<ServeOutcome>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let drain_timeout = self.config.simulation.drain_timeout();
        let stop = {
            let terminator = self.terminator.clone();
            async move {
                tokio::select! {
                    exit_code = terminator.triggered() => {
                        tracing::warn!(exit_code, "Induced termination, refusing new connections");
                    }
                    _ = shutdown => {
                        tracing::info!("Shutdown signal received");
                    }
                }
            }
        };

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(stop)
            .into_future();

        let drain_deadline = async {
            self.terminator.triggered().await;
            tokio::time::sleep(drain_timeout).await;
        };

        tokio::select! {
            result = serve => result?,
            _ = drain_deadline => {
                tracing::warn!(
                    timeout_secs = drain_timeout.as_secs(),
                    "In-flight requests did not drain in time"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(match self.terminator.requested() {
            Some(exit_code) => ServeOutcome::Terminated { exit_code },
            None => ServeOutcome::Stopped,
        })
    }

    /// A clone of the fully layered router, without connection info.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn terminator(&self) -> &Terminator {
        &self.terminator
    }
}

/// Register `path` and `path/` with the same handler.
fn route_both(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}

/// Paths served for the given feature flags, as listed by `/status/`.
pub fn registered_endpoints(features: &FeatureConfig) -> Vec<&'static str> {
    let mut endpoints = vec!["/", "/healthz/", "/hello/"];
    if features.enable_status_endpoint {
        endpoints.push("/status/");
    }
    if features.enable_config_endpoint {
        endpoints.push("/config/");
    }
    endpoints.extend(["/proxy/", "/crash/", "/trigger/"]);
    endpoints
}
