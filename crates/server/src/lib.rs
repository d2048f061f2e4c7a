//! Relay server library.
//!
//! Provides a reusable server function to serve Relay either for the binary, or for the integration tests.

#![deny(missing_docs)]

mod assembly;
mod error;
mod generator;
mod http;
mod pipeline;
mod request;
mod state;
mod system_prompts;
mod ws;

use std::net::SocketAddr;

use anyhow::anyhow;
use axum::Router;
use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Configuration for serving Relay.
pub struct ServeConfig {
    /// The socket address (IP and port) the server will bind to.
    pub listen_address: SocketAddr,
    /// The deserialized Relay TOML configuration.
    pub config: Config,
    /// Cancellation token for graceful shutdown.
    pub shutdown_signal: CancellationToken,
    /// Log filter string (e.g., "info" or "server=debug").
    pub log_filter: String,
    /// The version string to log on startup.
    pub version: String,
    /// Optional oneshot sender to send back the bound address (useful if port 0 was specified).
    pub bound_addr_sender: Option<tokio::sync::oneshot::Sender<SocketAddr>>,
}

/// Starts and runs the Relay server with the provided configuration.
pub async fn serve(
    ServeConfig {
        listen_address,
        config,
        shutdown_signal,
        log_filter,
        version,
        bound_addr_sender,
    }: ServeConfig,
) -> anyhow::Result<()> {
    telemetry::init(&log_filter);

    log::info!("relay {version}");

    let state = AppState::load(config).await.map_err(|e| anyhow!("failed to load state: {e}"))?;

    let app = Router::new()
        .merge(http::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state));

    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|e| anyhow!("failed to bind to {listen_address}: {e}"))?;

    if let Some(sender) = bound_addr_sender {
        sender
            .send(listener.local_addr()?)
            .expect("failed to send back bound address");
    }

    log::info!("listening on http://{listen_address}");

    tokio::select! {
        result = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()) => {
            result.map_err(|e| anyhow!("server error: {e}"))?;
        }
        _ = shutdown_signal.cancelled() => {
            log::info!("received shutdown signal, shutting down gracefully...");
        }
    }

    Ok(())
}
