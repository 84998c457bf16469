use axum::{Router, routing::get};

use crate::handlers;
use crate::state::ServerState;

pub fn session_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/sessions/{id}/products", get(handlers::list_products))
        .route(
            "/api/sessions/{id}/products/{product}/metrics",
            get(handlers::get_product_metrics),
        )
        .route(
            "/api/sessions/{id}/products/{product}/chart",
            get(handlers::get_product_chart),
        )
}
