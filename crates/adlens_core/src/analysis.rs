//! Read-then-aggregate pipeline and its result.

use std::path::Path;

use crate::aggregate::aggregate;
use crate::error::{AnalyzeError, ReadError};
use crate::format::FileFormat;
use crate::metrics::MetricName;
use crate::model::{MetricsByProduct, NormalizedValue, ProductKey, ProductMetrics, Table};
use crate::query::{self, ChartPoint};
use crate::reader::{read_bytes, read_path};

/// Aggregated state of one analyzed file.
///
/// Owned by whoever requested the analysis; a new file produces a new value
/// rather than updating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    source: String,
    columns: Vec<String>,
    row_count: usize,
    metrics: MetricsByProduct,
}

impl Analysis {
    /// Aggregate an already parsed table.
    pub fn from_table(source: impl Into<String>, table: &Table) -> Result<Self, AnalyzeError> {
        let metrics = aggregate(table)?;
        Ok(Self {
            source: source.into(),
            columns: table.columns().to_vec(),
            row_count: table.row_count(),
            metrics,
        })
    }

    /// Name of the file this analysis was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn metrics(&self) -> &MetricsByProduct {
        &self.metrics
    }

    pub fn products(&self) -> Vec<&ProductKey> {
        query::list_products(&self.metrics)
    }

    pub fn product_count(&self) -> usize {
        self.metrics.len()
    }

    pub fn product_at(&self, index: usize) -> Option<&ProductKey> {
        self.metrics.get_index(index).map(|(k, _)| k)
    }

    pub fn metrics_for(&self, product: Option<&str>) -> ProductMetrics {
        query::metrics_for(&self.metrics, product)
    }

    pub fn chart_series_for(&self, product: Option<&str>) -> Vec<(MetricName, NormalizedValue)> {
        query::chart_series_for(&self.metrics, product)
    }

    pub fn chart_points_for(&self, product: Option<&str>) -> Vec<ChartPoint> {
        query::chart_points_for(&self.metrics, product)
    }
}

/// Read a file from disk and aggregate it.
pub fn analyze(path: impl AsRef<Path>) -> Result<Analysis, AnalyzeError> {
    let path = path.as_ref();
    let table = read_path(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Analysis::from_table(source, &table)
}

/// Aggregate an in-memory upload; the format comes from `file_name`.
pub fn analyze_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Analysis, AnalyzeError> {
    let format =
        FileFormat::from_file_name(file_name).ok_or_else(|| ReadError::UnsupportedFormat {
            file_name: file_name.to_string(),
        })?;
    let table = read_bytes(bytes, format)?;
    Analysis::from_table(file_name, &table)
}
