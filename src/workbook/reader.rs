//! Workbook reader implementation - .xls/.xlsx bytes → rows

use super::format::ContainerFormat;
use crate::error::{SheetMapError, SheetMapResult};
use crate::types::Row;
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Excel worksheet row limit
const MAX_ROWS: usize = 1_048_576;

/// Read the first worksheet of a workbook held in memory
pub fn read_rows(bytes: &[u8], format: ContainerFormat) -> SheetMapResult<Vec<Row>> {
    let cursor = Cursor::new(bytes);

    let (range, declared_last_row) = match format {
        ContainerFormat::Xlsx => {
            let mut workbook: Xlsx<_> = Xlsx::new(cursor).map_err(|e| {
                SheetMapError::Workbook(format!("Failed to open .xlsx workbook: {}", e))
            })?;
            let declared_last_row = declared_last_row(&mut workbook);
            let range = workbook
                .worksheet_range_at(0)
                .transpose()
                .map_err(|e| SheetMapError::Workbook(format!("Failed to read worksheet: {}", e)))?;
            (range, declared_last_row)
        }
        ContainerFormat::Xls => {
            let mut workbook: Xls<_> = Xls::new(cursor).map_err(|e| {
                SheetMapError::Workbook(format!("Failed to open .xls workbook: {}", e))
            })?;
            let range = workbook
                .worksheet_range_at(0)
                .transpose()
                .map_err(|e| SheetMapError::Workbook(format!("Failed to read worksheet: {}", e)))?;
            (range, None)
        }
    };

    let mut rows = match range {
        Some(range) => range_to_rows(&range),
        None => Vec::new(), // Workbook without sheets
    };
    if let Some(last_row) = declared_last_row {
        pad_to_last_row(&mut rows, last_row);
    }

    debug!(format = %format, rows = rows.len(), "read first worksheet");
    Ok(rows)
}

/// Detect the container from `file_name` / signature, then read the first sheet
pub fn read_workbook(bytes: &[u8], file_name: Option<&str>) -> SheetMapResult<Vec<Row>> {
    let format = ContainerFormat::detect(file_name, bytes)?;
    read_rows(bytes, format)
}

/// Read the first sheet of a workbook file
pub fn read_workbook_file(path: &Path) -> SheetMapResult<Vec<Row>> {
    let bytes = std::fs::read(path)?;
    let file_name = path.file_name().and_then(|n| n.to_str());
    read_workbook(&bytes, file_name)
}

/// Grid of cell text at absolute positions (leading empty rows/columns kept)
fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];
    for cells in range.rows() {
        let mut row: Row = vec![String::new(); start_col as usize];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }
    rows
}

/// Last row of the first sheet's `<dimension>`. Unlike the cell range it
/// counts formatted blank cells, so trailing blank records stay visible.
fn declared_last_row<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Option<u32> {
    let name = workbook.sheet_names().first().cloned()?;
    let cells = workbook.worksheet_cells_reader(&name).ok()?;
    Some(cells.dimensions().end.0)
}

/// Extend with blank rows up to `last_row`; an empty sheet stays empty
fn pad_to_last_row(rows: &mut Vec<Row>, last_row: u32) {
    if rows.is_empty() {
        return;
    }
    let wanted = (last_row as usize + 1).min(MAX_ROWS);
    if rows.len() < wanted {
        rows.resize(wanted, Row::new());
    }
}

/// Text form of a cell, the way a spreadsheet shows it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(), // 30.0 → "30"
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
