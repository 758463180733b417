//! HTTP server for the PMW workbench.
//!
//! This crate provides a native Rust HTTP server using axum, serving
//! the JSON API the workbench SPA talks to:
//! - `POST /api/render` - Markdown-subset to HTML fragment conversion
//! - `POST /api/generate` - proxy to the text-generation upstream
//! - `/api/entities`, `/api/audit` - in-memory entity store and audit trail
//! - `GET /api/health` - liveness and version
//!
//! # Quick Start
//!
//! ```ignore
//! use pmw_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! SPA ──HTTP──► Rust axum server (pmw-server)
//!                    │
//!                    ├─► /api/render ──► pmw-renderer (pure function)
//!                    │
//!                    ├─► /api/generate ──► pmw-upstream (ureq, blocking pool)
//!                    │                         └─► retry via pmw-retry
//!                    │
//!                    └─► /api/entities, /api/audit ──► pmw-store (MemoryStore)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use pmw_retry::RetryPolicy;
use pmw_store::{MemoryStore, Store};
use pmw_upstream::{Generator, HttpGenerator};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Generation endpoint URL (`None` disables /api/generate).
    pub upstream_url: Option<String>,
    /// Bearer token for the generation endpoint.
    pub upstream_token: Option<String>,
    /// Retry policy for upstream calls.
    pub retry: RetryPolicy,
    /// Application version (reported by /api/health).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            upstream_url: None,
            upstream_token: None,
            retry: RetryPolicy::default(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Process-lifetime store; state lives until the server exits.
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

    let generator: Option<Arc<dyn Generator>> = config
        .upstream_url
        .as_ref()
        .map(|url| {
            Arc::new(HttpGenerator::new(url.clone(), config.upstream_token.clone()))
                as Arc<dyn Generator>
        });

    let state = Arc::new(AppState {
        store,
        generator,
        retry: config.retry.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from PMW config.
///
/// # Arguments
///
/// * `config` - PMW configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &pmw_config::Config, version: String) -> ServerConfig {
    let (upstream_url, upstream_token, retry) = match &config.upstream {
        Some(upstream) => (
            Some(upstream.url.clone()),
            upstream.token.clone(),
            upstream.retry.clone(),
        ),
        None => (None, None, RetryPolicy::default()),
    };

    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        upstream_url,
        upstream_token,
        retry,
        version,
    }
}
