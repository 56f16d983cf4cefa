//! Output module for exporting scraped records
//!
//! This module handles:
//! - Choosing the export format from a flag or the output file's extension
//! - Writing CSV and XLSX files
//! - Run statistics

mod csv_output;
pub mod stats;
mod traits;
mod xlsx_output;

pub use csv_output::CsvExporter;
pub use stats::{print_statistics, ScrapeStatistics};
pub use traits::{Exporter, OutputError, OutputResult};
pub use xlsx_output::{XlsxExporter, SHEET_NAME};

use crate::record::ProductRecord;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Tabular export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Picks a format from the output path
    ///
    /// `.csv` (any case) selects CSV; every other path gets a spreadsheet.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf_scrape::OutputFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("books.CSV")), OutputFormat::Csv);
    /// assert_eq!(OutputFormat::from_path(Path::new("books.xlsx")), OutputFormat::Xlsx);
    /// assert_eq!(OutputFormat::from_path(Path::new("books")), OutputFormat::Xlsx);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }

    /// Returns the exporter for this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Csv => Box::new(CsvExporter),
            Self::Xlsx => Box::new(XlsxExporter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Writes records to `path`
///
/// # Arguments
///
/// * `records` - Records in output order
/// * `include_details` - Whether to write the detail columns
/// * `path` - Destination file
/// * `format` - Explicit format; inferred from `path` when `None`
///
/// # Returns
///
/// * `Ok(OutputFormat)` - The format that was written
/// * `Err(OutputError)` - The file could not be written
pub fn export_records(
    records: &[ProductRecord],
    include_details: bool,
    path: &Path,
    format: Option<OutputFormat>,
) -> OutputResult<OutputFormat> {
    let format = format.unwrap_or_else(|| OutputFormat::from_path(path));

    tracing::info!(
        "Writing {} records to {} as {}",
        records.len(),
        path.display(),
        format
    );

    format.exporter().export(records, include_details, path)?;
    Ok(format)
}
