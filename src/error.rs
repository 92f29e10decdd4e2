use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, BoletimError>;

/// Error type covering the different failure cases that can occur while the
/// tool ingests grade sheets or emits report cards.
#[derive(Debug, Error)]
pub enum BoletimError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the PDF writer implementation.
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a sheet row is missing a cell its role requires.
    #[error("sheet '{sheet}' row {row} is missing required cell {column}")]
    ShortRow {
        sheet: String,
        row: usize,
        column: usize,
    },

    /// Raised when a unit label cannot be mapped to one of the four
    /// grading-unit slots.
    #[error("unit label '{label}' does not start with a digit between 1 and 4")]
    InvalidUnitLabel { label: String },

    /// Raised when a logo image cannot be decoded for embedding.
    #[error("logo image error: {0}")]
    Logo(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
