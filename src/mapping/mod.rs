//! Record <-> spreadsheet mapping engine
//!
//! - Resolve: field descriptor table → ordered export columns (`FieldSpec`)
//! - Export: records → header row + text rows → .xlsx
//! - Import: rows → records, coercing cell text into each field's declared type

mod coerce;
mod exporter;
mod importer;
mod resolver;
mod schema;

pub use coerce::{coerce, rule_for, CoercionError, CoercionFn, CoercionRule, COERCION_RULES};
pub use exporter::SheetExporter;
pub use importer::{ColumnLayout, SheetImporter};
pub use resolver::{header_row, resolve, FieldSpec};
pub use schema::{ExportMeta, Field, Record, RecordSchema, SchemaBuilder};

pub(crate) use importer::coerce_cell;
