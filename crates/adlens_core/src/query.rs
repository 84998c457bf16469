//! Read-only lookups over an aggregated metrics map.
//!
//! These are what a presentation layer calls to fill a product selector, a
//! metric list and a bar chart. None of them hold state.

use serde::Serialize;

use crate::metrics::MetricName;
use crate::model::{MetricsByProduct, NormalizedValue, ProductKey, ProductMetrics};

/// Products in first-seen order.
pub fn list_products(metrics: &MetricsByProduct) -> Vec<&ProductKey> {
    metrics.keys().collect()
}

/// Every stored metric of a product. Empty when nothing is selected or the
/// product is unknown.
pub fn metrics_for(metrics: &MetricsByProduct, product: Option<&str>) -> ProductMetrics {
    product
        .and_then(|p| metrics.get(p))
        .cloned()
        .unwrap_or_default()
}

/// The product's metrics without the ratio metrics, order preserved.
pub fn chart_series_for(
    metrics: &MetricsByProduct,
    product: Option<&str>,
) -> Vec<(MetricName, NormalizedValue)> {
    metrics_for(metrics, product)
        .into_iter()
        .filter(|(metric, _)| !metric.is_ratio())
        .collect()
}

/// A bar of the metrics chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub metric: MetricName,
    pub value: f64,
}

/// The chart series reduced to plottable numbers.
///
/// Missing values and text that isn't a number are left out.
pub fn chart_points_for(metrics: &MetricsByProduct, product: Option<&str>) -> Vec<ChartPoint> {
    chart_series_for(metrics, product)
        .into_iter()
        .filter_map(|(metric, value)| value.as_f64().map(|value| ChartPoint { metric, value }))
        .collect()
}

/// Heading of a product's metric list.
pub fn metrics_title(product: &str) -> String {
    format!("Métricas do Produto: {product}")
}

/// Title of a product's bar chart.
pub fn chart_title(product: &str) -> String {
    format!("Métricas para o produto: {product}")
}
