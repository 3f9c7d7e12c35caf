//! CLI command handlers

pub mod commands;

pub use commands::{
    columns, export, export_records, export_records_file, import, import_rows,
    import_workbook_file, inspect,
};
