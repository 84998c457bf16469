use adlens_core::{chart_title, metrics_title};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::ApiResult;
use crate::models::{
    ChartResponse, MetricEntry, MetricsResponse, ProductsResponse, SessionSummary, product_names,
};
use crate::state::ServerState;

// ============================================================================
// Session Handlers
// ============================================================================

pub async fn get_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionSummary>> {
    let session = state.sessions.get(&id)?;
    Ok(Json(SessionSummary::new(&session)))
}

pub async fn delete_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.sessions.remove(&id)?;
    tracing::info!(session = %id, "Deleted session");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Product Query Handlers
// ============================================================================

pub async fn list_products(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductsResponse>> {
    let session = state.sessions.get(&id)?;
    Ok(Json(ProductsResponse {
        products: product_names(&session.analysis),
    }))
}

/// Every stored metric of a product; unknown products get an empty list.
pub async fn get_product_metrics(
    State(state): State<ServerState>,
    Path((id, product)): Path<(String, String)>,
) -> ApiResult<Json<MetricsResponse>> {
    let session = state.sessions.get(&id)?;
    let metrics = session
        .analysis
        .metrics_for(Some(&product))
        .into_iter()
        .map(|(name, value)| MetricEntry { name, value })
        .collect();

    Ok(Json(MetricsResponse {
        title: metrics_title(&product),
        product,
        metrics,
    }))
}

pub async fn get_product_chart(
    State(state): State<ServerState>,
    Path((id, product)): Path<(String, String)>,
) -> ApiResult<Json<ChartResponse>> {
    let session = state.sessions.get(&id)?;
    let points = session.analysis.chart_points_for(Some(&product));
    Ok(Json(ChartResponse::new(chart_title(&product), points)))
}
