//! Extension-based input format detection.

use std::path::Path;

/// Every extension an upload may carry, lowercase.
pub const ACCEPTED_EXTENSIONS: [&str; 13] = [
    "csv", "xlsx", "xlsm", "xlsb", "xltx", "xltm", "xls", "xml", "xlm", "xlam", "xla", "xlw",
    "xlr",
];

/// Spreadsheet container families recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetKind {
    /// Office Open XML workbooks and templates (`xlsx`, `xlsm`, `xltx`, `xltm`, `xlam`)
    OpenXml,
    /// Binary OOXML (`xlsb`)
    Binary,
    /// Legacy BIFF workbooks (`xls`, `xla`, `xlm`, `xlw`)
    Legacy,
    /// Anything else in the family (`xml`, `xlr`); the container is sniffed
    Other,
}

/// Parsing path selected for an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Delimited,
    Spreadsheet(SpreadsheetKind),
}

impl FileFormat {
    /// Resolve a bare extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        let format = match ext.as_str() {
            "csv" => FileFormat::Delimited,
            "xlsx" | "xlsm" | "xltx" | "xltm" | "xlam" => {
                FileFormat::Spreadsheet(SpreadsheetKind::OpenXml)
            }
            "xlsb" => FileFormat::Spreadsheet(SpreadsheetKind::Binary),
            "xls" | "xla" | "xlm" | "xlw" => FileFormat::Spreadsheet(SpreadsheetKind::Legacy),
            "xml" | "xlr" => FileFormat::Spreadsheet(SpreadsheetKind::Other),
            _ => return None,
        };
        Some(format)
    }

    /// Resolve from the text after the last dot of a file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }
}

/// Whether a file name carries one of the accepted extensions.
pub fn is_allowed_file(name: &str) -> bool {
    FileFormat::from_file_name(name).is_some()
}
