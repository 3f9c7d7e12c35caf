//! Workbook writer implementation - rows → .xlsx bytes

use crate::error::{SheetMapError, SheetMapResult};
use crate::types::Row;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel worksheet limits
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Output settings for an exported sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub sheet_name: String,
    pub column_width: f64,
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            column_width: 20.0,
            file_name: "data.xlsx".to_string(),
        }
    }
}

/// Exported workbook plus what an HTTP response needs to serve it as a download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl ExportArtifact {
    pub fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    pub fn content_disposition(&self) -> String {
        let file_name: String = self
            .file_name
            .chars()
            .filter(|c| *c != '"' && !c.is_control())
            .collect();
        format!("attachment; filename=\"{}\"", file_name)
    }
}

/// Write rows into a single-sheet workbook. Every cell is a text cell; empty
/// values are formatted blanks.
pub fn write_rows(rows: &[Row], options: &ExportOptions) -> SheetMapResult<Vec<u8>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if rows.len() > MAX_ROWS || width > MAX_COLUMNS {
        return Err(SheetMapError::Workbook(format!(
            "{} rows x {} columns exceeds the worksheet limit of {} x {}",
            rows.len(),
            width,
            MAX_ROWS,
            MAX_COLUMNS
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&options.sheet_name)
        .map_err(|e| SheetMapError::Workbook(format!("Failed to set worksheet name: {}", e)))?;

    for col in 0..width {
        worksheet
            .set_column_width(col as u16, options.column_width)
            .map_err(|e| SheetMapError::Workbook(format!("Failed to set column width: {}", e)))?;
    }

    // Empty strings are dropped unless formatted, so blanks carry the text
    // format. That keeps blank records inside the sheet's dimension.
    let text = Format::new().set_num_format("@");

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let (row_num, col_num) = (row_idx as u32, col_idx as u16);
            let written = if value.is_empty() {
                worksheet.write_blank(row_num, col_num, &text)
            } else {
                worksheet.write_string_with_format(row_num, col_num, value, &text)
            };
            written.map_err(|e| SheetMapError::Workbook(format!("Failed to write cell: {}", e)))?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| SheetMapError::Workbook(format!("Failed to save workbook: {}", e)))?;

    debug!(
        sheet = %options.sheet_name,
        rows = rows.len(),
        columns = width,
        bytes = bytes.len(),
        "wrote workbook"
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.sheet_name, "Sheet1");
        assert_eq!(options.column_width, 20.0);
        assert_eq!(options.file_name, "data.xlsx");
    }

    #[test]
    fn test_write_rows_produces_zip() {
        let rows = vec![vec!["Age".to_string(), "Name".to_string()]];
        let bytes = write_rows(&rows, &ExportOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_write_empty_rows() {
        let bytes = write_rows(&[], &ExportOptions::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_invalid_sheet_name_fails() {
        let options = ExportOptions {
            sheet_name: "bad[name]".to_string(),
            ..Default::default()
        };
        let err = write_rows(&[], &options).unwrap_err();
        assert!(matches!(err, SheetMapError::Workbook(_)));
    }

    #[test]
    fn test_content_headers() {
        let artifact = ExportArtifact {
            bytes: Vec::new(),
            file_name: "people \"2024\".xlsx".to_string(),
        };
        assert_eq!(artifact.content_type(), XLSX_CONTENT_TYPE);
        assert_eq!(
            artifact.content_disposition(),
            "attachment; filename=\"people 2024.xlsx\""
        );
    }
}
