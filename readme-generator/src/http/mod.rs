//! JSON-over-HTTP surface.
//!
//! | method | path | body |
//! |---|---|---|
//! | POST | `/api/analyze` | `{ repositoryUrl }` |
//! | POST | `/api/generate` | `{ summary, additionalInstructions? }` |
//! | GET | `/healthz` | |
//!
//! Every failure is answered as `{ "error": message }`.

mod error;
mod handlers;
mod state;

pub use error::{ApiError, StartupError};
pub use handlers::AnalyzeRequest;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Builds the router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/generate", post(handlers::generate))
        .route("/healthz", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves the API on `listener` until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
