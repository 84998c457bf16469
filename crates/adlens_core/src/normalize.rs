//! Cell normalization.
//!
//! Percent strings such as `"12%"` are the only values that get converted.
//! The digits before the sign are read literally: `"45%"` becomes `45.0`,
//! not `0.45`.

use crate::error::NumericFormatError;
use crate::model::{CellValue, NormalizedValue};

const PERCENT: char = '%';

/// Resolve a raw cell into a number, text, or a missing marker.
pub fn normalize(cell: &CellValue) -> Result<NormalizedValue, NumericFormatError> {
    let value = match cell {
        CellValue::Text(s) if s.contains(PERCENT) => NormalizedValue::Number(parse_percent(s)?),
        CellValue::Text(s) => NormalizedValue::Text(s.clone()),
        CellValue::Int(v) => NormalizedValue::Number(*v as f64),
        CellValue::Float(v) => NormalizedValue::Number(*v),
        CellValue::Bool(_) => NormalizedValue::Text(cell.to_string()),
        CellValue::Empty => NormalizedValue::Missing,
    };
    Ok(value)
}

fn parse_percent(raw: &str) -> Result<f64, NumericFormatError> {
    let stripped = raw.replace(PERCENT, "");
    stripped
        .trim()
        .parse::<f64>()
        .map_err(|_| NumericFormatError {
            raw: raw.to_string(),
        })
}
