//! Server bootstrap

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::{ServerConfig, WeatherSearchConfig};
use crate::store;
use crate::weather::WeatherGateway;

/// Router with middleware and the optional static frontend
pub fn build_app(config: &ServerConfig, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = api::router(state);
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir, "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Application state wired from configuration
pub fn build_state(config: &WeatherSearchConfig) -> Result<AppState> {
    let store = store::open(&config.store)?;
    let gateway = WeatherGateway::from_config(&config.weather)?;
    Ok(AppState::new(store, gateway))
}

/// Serve until SIGINT or SIGTERM
pub async fn run(config: WeatherSearchConfig) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind))?;

    let state = build_state(&config)?;
    let app = build_app(&config.server, state);

    match config.server.tls_paths() {
        Some((cert, key)) => {
            serve_tls(app, addr, cert, key, config.server.shutdown_grace_seconds).await
        }
        None => serve_plain(app, addr).await,
    }
}

async fn serve_plain(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(feature = "tls")]
async fn serve_tls(
    app: Router,
    addr: SocketAddr,
    cert: std::path::PathBuf,
    key: std::path::PathBuf,
    grace_seconds: u64,
) -> Result<()> {
    use std::time::Duration;

    use axum_server::Handle;
    use axum_server::tls_rustls::RustlsConfig;

    // Already installed is fine
    let _ = rustls::crypto::ring::default_provider().install_default();

    let tls = RustlsConfig::from_pem_file(&cert, &key)
        .await
        .with_context(|| format!("Failed to load TLS material from {}", cert.display()))?;

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(grace_seconds)));
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(
    _app: Router,
    _addr: SocketAddr,
    _cert: std::path::PathBuf,
    _key: std::path::PathBuf,
    _grace_seconds: u64,
) -> Result<()> {
    anyhow::bail!("TLS is configured but this build lacks the `tls` feature")
}

async fn shutdown_signal() {
    tokio::select! {
        () = sigterm() => tracing::info!("Received SIGTERM, shutting down"),
        () = sigint() => tracing::info!("Received SIGINT, shutting down"),
    }
}

/// Return after the first SIGTERM signal received by this process
#[cfg(unix)]
async fn sigterm() {
    use tokio::signal::unix::{self, SignalKind};
    match unix::signal(SignalKind::terminate()) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn sigterm() {
    std::future::pending::<()>().await;
}

/// Return after the first SIGINT signal received by this process
async fn sigint() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for SIGINT: {}", e);
        std::future::pending::<()>().await;
    }
}
