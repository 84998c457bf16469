//! Tabular reader for delimited text and spreadsheet containers.
//!
//! Both paths produce the same [`Table`] shape: the first record is the
//! header, every following record becomes a [`Row`] keyed by header name.
//! Failures on either path come back as a [`ReadError`] value.

use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, Reader, Xls, Xlsb, Xlsx, open_workbook_auto_from_rs, open_workbook_from_rs};

use crate::error::ReadError;
use crate::format::{FileFormat, SpreadsheetKind};
use crate::model::{CellValue, Row, Table};

/// Markers read as an empty cell in delimited text.
const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read a file from disk, choosing the parser from its extension.
pub fn read_path(path: impl AsRef<Path>) -> Result<Table, ReadError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path).ok_or_else(|| ReadError::UnsupportedFormat {
        file_name: path.display().to_string(),
    })?;
    let bytes =
        fs::read(path).map_err(|e| ReadError::Io(format!("{}: {e}", path.display())))?;
    read_bytes(bytes, format)
}

/// Read an in-memory file with an already resolved format.
pub fn read_bytes(bytes: Vec<u8>, format: FileFormat) -> Result<Table, ReadError> {
    match format {
        FileFormat::Delimited => read_delimited(bytes.as_slice()),
        FileFormat::Spreadsheet(kind) => read_spreadsheet(bytes, kind),
    }
}

// ============================================================================
// Delimited text
// ============================================================================

/// Parse comma-separated text with a header record.
///
/// Column types are inferred over the whole column: a column is numeric only
/// when every non-empty cell is a number, otherwise its cells stay text.
pub fn read_delimited<R: Read>(reader: R) -> Result<Table, ReadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let raw_headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    let columns = unique_headers(raw_headers);

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in csv_reader.records() {
        records.push(result?);
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|idx| ColumnKind::infer(records.iter().filter_map(|r| r.get(idx))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .zip(&kinds)
                .zip(record.iter())
                .map(|((name, kind), raw)| (name.clone(), kind.cell(raw)))
                .collect::<Row>()
        })
        .collect();

    let table = Table::new(columns, rows);
    tracing::debug!(
        columns = table.columns().len(),
        rows = table.row_count(),
        "Read delimited table"
    );
    Ok(table)
}

fn is_na(raw: &str) -> bool {
    NA_VALUES.contains(&raw.trim())
}

/// Inferred type of a delimited column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.parse::<i64>().is_ok() {
            ColumnKind::Int
        } else if trimmed.parse::<f64>().is_ok() {
            ColumnKind::Float
        } else if parse_bool(trimmed).is_some() {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    fn widen(self, other: Self) -> Self {
        use ColumnKind::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Int, Float) | (Float, Int) => Float,
            _ => Text,
        }
    }

    fn infer<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        values
            .filter(|v| !is_na(v))
            .map(Self::classify)
            .reduce(Self::widen)
            .unwrap_or(ColumnKind::Float)
    }

    fn cell(self, raw: &str) -> CellValue {
        if is_na(raw) {
            return CellValue::Empty;
        }
        let trimmed = raw.trim();
        let parsed = match self {
            ColumnKind::Int => trimmed.parse::<i64>().ok().map(CellValue::Int),
            ColumnKind::Float => trimmed.parse::<f64>().ok().map(CellValue::Float),
            ColumnKind::Bool => parse_bool(trimmed).map(CellValue::Bool),
            ColumnKind::Text => None,
        };
        parsed.unwrap_or_else(|| CellValue::Text(raw.to_string()))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Spreadsheets
// ============================================================================

fn read_spreadsheet(bytes: Vec<u8>, kind: SpreadsheetKind) -> Result<Table, ReadError> {
    let cursor = Cursor::new(bytes);
    let table = match kind {
        SpreadsheetKind::OpenXml => first_sheet(open_workbook::<Xlsx<_>>(cursor)?)?,
        SpreadsheetKind::Binary => first_sheet(open_workbook::<Xlsb<_>>(cursor)?)?,
        SpreadsheetKind::Legacy => first_sheet(open_workbook::<Xls<_>>(cursor)?)?,
        SpreadsheetKind::Other => first_sheet(open_workbook_auto_from_rs(cursor)?)?,
    };
    tracing::debug!(
        ?kind,
        columns = table.columns().len(),
        rows = table.row_count(),
        "Read spreadsheet table"
    );
    Ok(table)
}

fn open_workbook<W>(cursor: Cursor<Vec<u8>>) -> Result<W, ReadError>
where
    W: Reader<Cursor<Vec<u8>>>,
    W::Error: Into<calamine::Error>,
{
    open_workbook_from_rs::<W, _>(cursor).map_err(spreadsheet_error)
}

fn spreadsheet_error<E: Into<calamine::Error>>(err: E) -> ReadError {
    ReadError::from(Into::<calamine::Error>::into(err))
}

/// Convert the first worksheet of an open workbook into a table.
fn first_sheet<W>(mut workbook: W) -> Result<Table, ReadError>
where
    W: Reader<Cursor<Vec<u8>>>,
    W::Error: Into<calamine::Error>,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheet)?
        .map_err(spreadsheet_error)?;

    let mut records = range.rows();
    let Some(header) = records.next() else {
        return Ok(Table::default());
    };
    let columns = unique_headers(header.iter().map(header_text).collect());

    // Blank rows are skipped anywhere in the sheet
    let rows = records
        .filter(|record| record.iter().any(|d| !matches!(d, Data::Empty)))
        .map(|record| {
            columns
                .iter()
                .enumerate()
                .map(|(idx, name)| {
                    let cell = record.get(idx).map(cell_from_data).unwrap_or_default();
                    (name.clone(), cell)
                })
                .collect::<Row>()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(v) => CellValue::Int(*v),
        // Workbooks store every number as a float; integral ones read back as integers
        Data::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => CellValue::Int(*v as i64),
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn header_text(data: &Data) -> String {
    cell_from_data(data).to_string()
}

// ============================================================================
// Headers
// ============================================================================

/// Give blank headers a positional name and suffix repeated ones (`.1`, `.2`, …).
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
