use std::fmt;

use crate::metrics::{GROUPING_COLUMN, MetricName};

/// Errors raised while turning a file into a [`crate::Table`].
///
/// Every variant is recoverable: callers report the file as unreadable.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadError {
    UnsupportedFormat { file_name: String },
    Io(String),
    /// Bad quoting, uneven field counts or invalid UTF-8 in delimited text
    MalformedDelimitedText(String),
    /// The spreadsheet container or its first sheet could not be decoded
    MalformedSpreadsheet(String),
    NoWorksheet,
}

impl ReadError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ReadError::MalformedDelimitedText(_)
                | ReadError::MalformedSpreadsheet(_)
                | ReadError::NoWorksheet
        )
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::UnsupportedFormat { file_name } => {
                write!(f, "unsupported file format: {file_name}")
            }
            ReadError::Io(msg) => write!(f, "io error: {msg}"),
            ReadError::MalformedDelimitedText(msg) => write!(f, "malformed delimited text: {msg}"),
            ReadError::MalformedSpreadsheet(msg) => write!(f, "malformed spreadsheet: {msg}"),
            ReadError::NoWorksheet => write!(f, "workbook has no worksheet"),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<csv::Error> for ReadError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(e) => ReadError::Io(e.to_string()),
            _ => ReadError::MalformedDelimitedText(err.to_string()),
        }
    }
}

impl From<calamine::Error> for ReadError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(e) => ReadError::Io(e.to_string()),
            other => ReadError::MalformedSpreadsheet(other.to_string()),
        }
    }
}

/// A percent-suffixed value whose remaining text is not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFormatError {
    pub raw: String,
}

impl fmt::Display for NumericFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not convert string to float: '{}'", self.raw)
    }
}

impl std::error::Error for NumericFormatError {}

/// Errors that abort aggregation of a whole table.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationError {
    MissingGroupingColumn,
    NumericFormat {
        /// Zero-based index into the table rows
        row: usize,
        product: String,
        metric: MetricName,
        source: NumericFormatError,
    },
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::MissingGroupingColumn => {
                write!(f, "missing grouping column '{GROUPING_COLUMN}'")
            }
            AggregationError::NumericFormat {
                row,
                product,
                metric,
                source,
            } => write!(
                f,
                "row {row} (product '{product}', column '{metric}'): {source}"
            ),
        }
    }
}

impl std::error::Error for AggregationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregationError::NumericFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of the read-then-aggregate pipeline.
///
/// `Display` renders the message shown to the end user.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    Read(ReadError),
    Aggregate(AggregationError),
}

impl AnalyzeError {
    pub fn is_unreadable(&self) -> bool {
        matches!(self, AnalyzeError::Read(_))
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Read(ReadError::Io(_)) => write!(
                f,
                "Erro ao ler o arquivo: arquivo não encontrado ou ilegível."
            ),
            AnalyzeError::Read(ReadError::UnsupportedFormat { file_name }) => {
                write!(f, "Tipo de arquivo não permitido: {file_name}")
            }
            AnalyzeError::Read(_) => write!(
                f,
                "Erro ao ler o arquivo: problema ao analisar o arquivo CSV ou Excel."
            ),
            AnalyzeError::Aggregate(AggregationError::MissingGroupingColumn) => write!(
                f,
                "A coluna '{GROUPING_COLUMN}' não está presente no arquivo."
            ),
            AnalyzeError::Aggregate(AggregationError::NumericFormat {
                row,
                metric,
                source,
                ..
            }) => write!(
                f,
                "Valor inválido '{}' na coluna '{metric}' (registro {}).",
                source.raw,
                row + 1
            ),
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzeError::Read(e) => Some(e),
            AnalyzeError::Aggregate(e) => Some(e),
        }
    }
}

impl From<ReadError> for AnalyzeError {
    fn from(err: ReadError) -> Self {
        AnalyzeError::Read(err)
    }
}

impl From<AggregationError> for AnalyzeError {
    fn from(err: AggregationError) -> Self {
        AnalyzeError::Aggregate(err)
    }
}
