//! Spreadsheet (XLSX) export
//!
//! One worksheet named `Products` with a bold header row. Prices and ratings
//! are stored as numbers so they sort and sum in a spreadsheet application.

use crate::output::traits::{Exporter, OutputError, OutputResult};
use crate::record::{columns, FieldValue, ProductRecord};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Products";

/// Rows available to data below the header (XLSX allows 1,048,576 per sheet)
const MAX_DATA_ROWS: usize = 1_048_575;

/// Longest text a single cell may hold, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Cuts `text` to the cell limit on a character boundary
fn clamp_cell_text(text: &str) -> Option<&str> {
    text.char_indices()
        .nth(MAX_CELL_CHARS)
        .map(|(byte_index, _)| &text[..byte_index])
}

/// Writes records as an XLSX workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    /// Builds the workbook and returns the encoded file contents
    pub fn to_bytes(&self, records: &[ProductRecord], include_details: bool) -> OutputResult<Vec<u8>> {
        if records.len() > MAX_DATA_ROWS {
            return Err(OutputError::Format(format!(
                "{} records exceed the worksheet limit of {} rows",
                records.len(),
                MAX_DATA_ROWS
            )));
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_NAME)?;

            // Header row
            for (col, name) in columns(include_details).into_iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
            }

            // One row per record
            for (index, record) in records.iter().enumerate() {
                let row = index as u32 + 1;
                for (col, field) in record.fields(include_details).into_iter().enumerate() {
                    let col = col as u16;
                    match field {
                        FieldValue::Text(text) => {
                            let text = match clamp_cell_text(text) {
                                Some(clamped) => {
                                    tracing::warn!(
                                        "Truncating {} column of {} to {} characters",
                                        columns(include_details)[usize::from(col)],
                                        record.product_url,
                                        MAX_CELL_CHARS
                                    );
                                    clamped
                                }
                                None => text,
                            };
                            worksheet.write_string(row, col, text)?;
                        }
                        FieldValue::Decimal(number) => {
                            worksheet.write_number(row, col, number)?;
                        }
                        FieldValue::Integer(number) => {
                            worksheet.write_number(row, col, f64::from(number))?;
                        }
                        FieldValue::Empty => {}
                    }
                }
            }

            worksheet.set_freeze_panes(1, 0)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl Exporter for XlsxExporter {
    fn export(
        &self,
        records: &[ProductRecord],
        include_details: bool,
        path: &Path,
    ) -> OutputResult<()> {
        let bytes = self.to_bytes(records, include_details)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
