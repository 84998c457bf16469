//! HTTP API over the adlens analysis engine.
//!
//! Clients upload a report, get a session id back and then query products,
//! metric lists and chart series of that session.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod upload;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use session::{Session, SessionId, SessionStore};
pub use state::ServerState;

pub const BANNER: &str = "adlens API Server";

/// Build the application router.
pub fn app(state: ServerState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/health", get(|| async { "ok" }))
        .merge(routes::upload_routes())
        .merge(routes::session_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
