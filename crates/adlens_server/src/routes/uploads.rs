use axum::{Router, routing::post};

use crate::handlers;
use crate::state::ServerState;

pub fn upload_routes() -> Router<ServerState> {
    Router::new().route("/api/uploads", post(handlers::upload_file))
}
