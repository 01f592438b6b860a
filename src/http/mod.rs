//! HTTP boundary: axum glue shared by every feature's controller.
//!
//! ## Routes
//!
//! - `GET /health`: always `200 {"status":"ok"}`.
//! - Everything else is mounted by feature modules through
//!   [`Startup::register_routes`](crate::Startup::register_routes).
//! - Anything unmatched: `404 {"code":"NOT_FOUND","message":"Route not found"}`.
//!
//! Failures render as `{ code, message, details? }` with the status taken
//! from [`DomainError::status_code`](crate::DomainError::status_code).
//!
//! ## Example
//!
//! ```ignore
//! let mut startup = Startup::new().module(UsersModule::in_memory(notifier));
//! startup.initialize()?;
//! let app = startup.register_routes(http::base_router())?;
//! http::serve(app, "0.0.0.0:8080").await?;
//! ```

mod boundary;
mod response;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::DomainError;

pub use boundary::{json_body, with_timeout};
pub use response::Created;

/// Router holding the routes no feature owns (currently `/health`).
///
/// Unknown paths, and methods nobody bound, render `404 NOT_FOUND` like
/// any other failure.
pub fn base_router() -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(route_not_found))
        .fallback(route_not_found)
}

/// Fallback for a path, or a method on a known path, that nothing serves.
pub(crate) async fn route_not_found() -> DomainError {
    DomainError::not_found("Route")
}

/// `GET /health`: returns `{ "status": "ok" }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Serve `app` at `addr` until Ctrl-C.
pub async fn serve(app: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app.layer(TraceLayer::new_for_http()))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
