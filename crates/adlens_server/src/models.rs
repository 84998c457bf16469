use adlens_core::{Analysis, ChartPoint, MetricName, NormalizedValue};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::{Session, SessionId};

// ============================================================================
// Upload / Session Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: SessionId,
    pub file_name: String,
    pub products: Vec<String>,
    pub columns: Vec<String>,
    pub row_count: usize,
}

impl UploadResponse {
    pub fn new(session: &Session) -> Self {
        let analysis = &session.analysis;
        Self {
            session_id: session.id,
            file_name: analysis.source().to_string(),
            products: product_names(analysis),
            columns: analysis.columns().to_vec(),
            row_count: analysis.row_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub file_name: String,
    pub product_count: usize,
    pub row_count: usize,
    pub created_at: DateTime<Utc>,
    pub last_access: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(session: &Session) -> Self {
        Self {
            session_id: session.id,
            file_name: session.analysis.source().to_string(),
            product_count: session.analysis.product_count(),
            row_count: session.analysis.row_count(),
            created_at: session.created_at,
            last_access: session.last_access(),
        }
    }
}

// ============================================================================
// Query Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricEntry {
    pub name: MetricName,
    pub value: NormalizedValue,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub product: String,
    pub title: String,
    pub metrics: Vec<MetricEntry>,
}

/// Bar chart of one product's non-ratio metrics
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub title: String,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub labels: Vec<MetricName>,
    pub values: Vec<f64>,
}

pub const CHART_X_AXIS: &str = "Métricas";
pub const CHART_Y_AXIS: &str = "Valores";

impl ChartResponse {
    pub fn new(title: String, points: Vec<ChartPoint>) -> Self {
        let (labels, values) = points.into_iter().map(|p| (p.metric, p.value)).unzip();
        Self {
            title,
            x_axis: CHART_X_AXIS,
            y_axis: CHART_Y_AXIS,
            labels,
            values,
        }
    }
}

pub fn product_names(analysis: &Analysis) -> Vec<String> {
    analysis.products().iter().map(|p| p.to_string()).collect()
}
