//! Data model shared by the reader, aggregator and query layers.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::metrics::MetricName;

/// A raw cell as produced by the reader.
///
/// Cells are resolved into numbers or text by [`crate::normalize`]; nothing
/// else coerces them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => f.write_str(&format_number(*v)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// Render a float without a trailing `.0` when it holds an integral value.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One record of the input, keyed by column name in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: IndexMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Uniform view of a parsed input file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from rows alone, taking the column set in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for (name, _) in row.iter() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Raw grouping-column value, compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&CellValue> for ProductKey {
    fn from(cell: &CellValue) -> Self {
        Self(cell.to_string())
    }
}

impl Borrow<str> for ProductKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cell after normalization: a number, the original text, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Number(f64),
    Text(String),
    Missing,
}

impl NormalizedValue {
    /// Numeric reading used for charting. Text counts when it is a plain number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NormalizedValue::Number(v) if v.is_finite() => Some(*v),
            NormalizedValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, NormalizedValue::Missing)
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Number(v) => f.write_str(&format_number(*v)),
            NormalizedValue::Text(s) => f.write_str(s),
            NormalizedValue::Missing => f.write_str("nan"),
        }
    }
}

impl Serialize for NormalizedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedValue::Number(v) if v.is_finite() => serializer.serialize_f64(*v),
            NormalizedValue::Text(s) => serializer.serialize_str(s),
            _ => serializer.serialize_none(),
        }
    }
}

/// Metric values of one product, in canonical metric order.
pub type ProductMetrics = IndexMap<MetricName, NormalizedValue>;

/// Products in first-seen order, each with its metric values.
pub type MetricsByProduct = IndexMap<ProductKey, ProductMetrics>;
