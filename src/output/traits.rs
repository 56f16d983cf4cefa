//! Exporter trait and error types

use crate::record::ProductRecord;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an export file
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for tabular exporters
///
/// Every exporter writes one header row followed by one row per record, in
/// record order. The column set is the base columns, plus the detail columns
/// when `include_details` is set.
pub trait Exporter {
    /// Writes `records` to the file at `path`, replacing it if it exists
    ///
    /// # Arguments
    ///
    /// * `records` - Records in output order
    /// * `include_details` - Whether to write the detail columns
    /// * `path` - Destination file
    fn export(&self, records: &[ProductRecord], include_details: bool, path: &Path)
        -> OutputResult<()>;
}
