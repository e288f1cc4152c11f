//! HTTP API for the calculators.
//!
//! Every calculator lives under `/prac-N/task-M`: `GET` returns the form
//! defaults, `POST` takes a URL-encoded form and returns labelled results.
//! `/prac-5/data` lists the reliability elements and `/` lists calculators.

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::{error, info};

use crate::tables::TableSource;

pub use handlers::ApiError;
pub use types::{CalculationResponse, CalculatorInfo, Defaults, ErrorResponse};

/// Application state shared across all request handlers.
///
/// Holds only the read-only table source; tables are read per request.
pub struct AppState {
    /// Reference table source.
    pub tables: Box<dyn TableSource + Send + Sync>,
}

impl AppState {
    pub fn new(tables: impl TableSource + Send + Sync + 'static) -> Self {
        Self {
            tables: Box::new(tables),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/prac-1/task-1",
            get(handlers::blank).post(handlers::solid_fuel),
        )
        .route(
            "/prac-1/task-2",
            get(handlers::blank).post(handlers::fuel_oil),
        )
        .route(
            "/prac-2/task-1",
            get(handlers::blank).post(handlers::emissions),
        )
        .route(
            "/prac-3/task-1",
            get(handlers::blank).post(handlers::forecast),
        )
        .route(
            "/prac-4/task-1",
            get(handlers::cable_defaults).post(handlers::cable),
        )
        .route(
            "/prac-5/task-1",
            get(handlers::blank).post(handlers::reliability),
        )
        .route("/prac-5/data", get(handlers::reliability_elements))
        .route(
            "/prac-6/task-1",
            get(handlers::load_defaults).post(handlers::loads),
        )
        .with_state(state)
}

/// Binds to the given address and serves the API until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! { _ = ctrl_c => {}, _ = terminate => {}, }
    info!("shutdown signal received");
}
