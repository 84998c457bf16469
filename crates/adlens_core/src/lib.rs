//! Advertising metrics aggregation engine
//!
//! This crate turns a tabular export of advertising performance (CSV or a
//! spreadsheet) into a per-product metrics map that presentation layers can
//! query and chart.
//!
//! The pipeline is:
//! - [`reader`] loads the file into a [`Table`] of typed cells
//! - [`normalize`] resolves a raw cell into a [`NormalizedValue`]
//! - [`aggregate`] groups rows by product (last row wins per metric)
//! - [`query`] answers product list, metric list and chart series lookups
//!
//! ```ignore
//! use adlens_core::analyze;
//!
//! let analysis = analyze("relatorio.xlsx")?;
//! for product in analysis.products() {
//!     println!("{product}: {:?}", analysis.chart_points_for(Some(product.as_str())));
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod normalize;
pub mod query;
pub mod reader;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod format;
pub mod metrics;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::aggregate;
pub use analysis::{Analysis, analyze, analyze_bytes};
pub use error::{AggregationError, AnalyzeError, NumericFormatError, ReadError};
pub use format::{ACCEPTED_EXTENSIONS, FileFormat, SpreadsheetKind, is_allowed_file};
pub use metrics::{GROUPING_COLUMN, MetricName};
pub use model::{
    CellValue, MetricsByProduct, NormalizedValue, ProductKey, ProductMetrics, Row, Table,
};
pub use normalize::normalize;
pub use query::{
    ChartPoint, chart_points_for, chart_series_for, chart_title, list_products, metrics_for,
    metrics_title,
};
pub use reader::{read_bytes, read_delimited, read_path};
