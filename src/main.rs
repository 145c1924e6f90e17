use std::net::SocketAddr;

use tokio::net::TcpListener;

use chaos_fixture::config;
use chaos_fixture::lifecycle::shutdown_signal;
use chaos_fixture::observability::logging::init_logging;
use chaos_fixture::{HttpServer, ServeOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let resolution = config::resolve();

    init_logging(&resolution.config.server.log_level);
    tracing::info!("chaos-fixture v{} starting", env!("CARGO_PKG_VERSION"));
    resolution.log();

    let config::Resolution { config, source, .. } = resolution;

    tracing::info!(
        port = config.server.port,
        log_level = %config.server.log_level,
        proxy_default_host = %config.proxy.default_host,
        proxy_default_path = %config.proxy.default_path,
        request_timeout_secs = config.proxy.request_timeout_seconds,
        status_endpoint = config.features.enable_status_endpoint,
        config_endpoint = config.features.enable_config_endpoint,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.server.port))).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, source);
    match server.run(listener, shutdown_signal()).await? {
        ServeOutcome::Stopped => {
            tracing::info!("Shutdown complete");
            Ok(())
        }
        ServeOutcome::Terminated { exit_code } => {
            tracing::error!(exit_code, "Exiting on induced termination");
            std::process::exit(exit_code)
        }
    }
}
