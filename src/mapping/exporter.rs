//! Records -> rows -> .xlsx

use super::resolver::{header_row, resolve, FieldSpec};
use super::schema::{Field, RecordSchema};
use crate::error::{SheetMapError, SheetMapResult};
use crate::types::Row;
use crate::workbook::{write_rows, ExportArtifact, ExportOptions};
use tracing::debug;

/// Renders records of one schema into a single-sheet workbook
pub struct SheetExporter<'a, T> {
    schema: &'a RecordSchema<T>,
    options: ExportOptions,
}

impl<'a, T> SheetExporter<'a, T> {
    /// Create an exporter with default options (sheet `Sheet1`, width 20, `data.xlsx`)
    pub fn new(schema: &'a RecordSchema<T>) -> Self {
        Self {
            schema,
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export columns of the schema, in order
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        resolve(self.schema)
    }

    /// Header row followed by one text row per record
    pub fn export_rows(&self, records: &[T], specs: &[FieldSpec]) -> SheetMapResult<Vec<Row>> {
        let fields = self.lookup(specs)?;

        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(header_row(specs));

        for record in records {
            let row: Row = fields
                .iter()
                .map(|field| field.read(record).to_string())
                .collect();
            rows.push(row);
        }

        debug!(
            record_type = self.schema.type_name(),
            columns = specs.len(),
            records = records.len(),
            "rendered export rows"
        );

        Ok(rows)
    }

    /// Export to .xlsx bytes
    pub fn export(&self, records: &[T], specs: &[FieldSpec]) -> SheetMapResult<Vec<u8>> {
        let rows = self.export_rows(records, specs)?;
        write_rows(&rows, &self.options)
    }

    /// Resolve the schema's columns, export, and package the bytes for download
    pub fn export_artifact(&self, records: &[T]) -> SheetMapResult<ExportArtifact> {
        let specs = self.field_specs();
        let bytes = self.export(records, &specs)?;
        Ok(ExportArtifact {
            bytes,
            file_name: self.options.file_name.clone(),
        })
    }

    fn lookup(&self, specs: &[FieldSpec]) -> SheetMapResult<Vec<&'a Field<T>>> {
        let schema = self.schema;
        specs
            .iter()
            .map(|spec| {
                schema
                    .field(&spec.field_name)
                    .ok_or_else(|| SheetMapError::FieldNotFound {
                        field: spec.field_name.clone(),
                    })
            })
            .collect()
    }
}
