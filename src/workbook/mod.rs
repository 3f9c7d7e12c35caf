//! Workbook adapters
//!
//! The mapping engine only sees `Row`s. This module moves them in and out of
//! spreadsheet containers:
//! - Read: .xls / .xlsx bytes → rows of the first worksheet (calamine)
//! - Write: rows → single-sheet .xlsx bytes (rust_xlsxwriter)

mod format;
mod reader;
mod writer;

pub use format::ContainerFormat;
pub use reader::{read_rows, read_workbook, read_workbook_file};
pub use writer::{write_rows, ExportArtifact, ExportOptions, XLSX_CONTENT_TYPE};
