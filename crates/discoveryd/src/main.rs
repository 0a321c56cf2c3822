//! Discovery daemon - serves the landing page bundle.
//!
//! The page itself runs entirely in the browser; this process only hands out
//! `index.html` and the wasm/js/css assets built by Trunk.
//!
//! Config file locations:
//! - Linux: ~/.config/discoveryd/config.toml
//! - Windows: %APPDATA%\discoveryd\config.toml
//! - MacOS: ~/Library/Application Support/discoveryd/config.toml

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod paths;
mod routes;

use config::{load_settings, ConfigError};
use paths::AppPaths;
use routes::{build_router, AppState};

#[derive(Debug, Error)]
enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let paths = match AppPaths::new() {
        Ok(p) => {
            info!(dir = %p.config_dir().display(), "config directory");
            Some(p)
        }
        Err(e) => {
            warn!("{}; using defaults and environment only", e);
            None
        }
    };
    let settings = load_settings(paths.as_ref())?;
    let addr = settings.socket_addr()?;

    if !settings.dist_dir.join("index.html").is_file() {
        warn!(dir = %settings.dist_dir.display(), "landing page bundle not built yet");
    }

    let app = build_router(Arc::new(AppState {
        dist_dir: settings.dist_dir,
    }));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    info!(%addr, "discovery daemon listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Serve)?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C: stopping"),
        Err(e) => {
            warn!("cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
