//! CSV export
//!
//! Comma-delimited, UTF-8, header row first. Prices are written with two
//! decimals and missing detail fields as empty cells.

use crate::output::traits::{Exporter, OutputResult};
use crate::record::{columns, ProductRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records as CSV
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Writes the CSV document to any writer
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        records: &[ProductRecord],
        include_details: bool,
    ) -> OutputResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Header
        csv_writer.write_record(columns(include_details))?;

        for record in records {
            let row: Vec<String> = record
                .fields(include_details)
                .iter()
                .map(|field| field.to_text())
                .collect();
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export(
        &self,
        records: &[ProductRecord],
        include_details: bool,
        path: &Path,
    ) -> OutputResult<()> {
        let file = File::create(path)?;
        self.write_to(file, records, include_details)
    }
}
