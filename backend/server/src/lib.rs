//! Proxy relay in front of the Oireachtas legislation API.
//!
//! The browser never talks to the upstream directly. Requests come here, get
//! reshaped (paging params become `skip`/`limit`, the bill type filter is dropped
//! for `all`), and responses come back with a derived pagination block.
//!
//! # Routes
//!
//! - `GET /api/bills?page=0&pageSize=10&billType=all`: one page of bills.
//! - `GET /api/bills/individual?billIds=123/2022,456/2023`: batch lookup by key,
//!   used for favourites. Keys that are malformed or fail upstream are skipped.
//! - `GET /api/oireachtas/{*path}`: raw passthrough to the upstream.
//!
//! # Configuration
//!
//! | Variable              | Default                        |
//! |-----------------------|--------------------------------|
//! | `PROXY_PORT`          | `3001`                         |
//! | `UPSTREAM_URL`        | `https://api.oireachtas.ie/v1` |
//! | `UPSTREAM_TIMEOUT_MS` | `10000`                        |
//! | `LOOKUP_CONCURRENCY`  | `8`                            |
//!
//! Logging is controlled with `RUST_LOG`.
//! ```sh
//! RUST_LOG=info cargo run -p oireachtas
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use error::AppError;
use routes::{bills_handler, individual_handler, relay_handler};
use state::State;

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");
    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Proxy server running on http://{address}");
    info!("Bills endpoint: http://localhost:{}/api/bills?page=0&pageSize=10", state.config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/bills", get(bills_handler))
        .route("/api/bills/individual", get(individual_handler))
        .route("/api/oireachtas/{*path}", get(relay_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
