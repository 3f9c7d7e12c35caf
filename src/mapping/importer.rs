//! Rows -> records

use super::coerce::coerce;
use super::resolver::resolve;
use super::schema::{Field, RecordSchema};
use crate::error::{SheetMapError, SheetMapResult};
use crate::types::{FieldType, FieldValue, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How spreadsheet columns are matched to record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Column j feeds the j-th declared field, exportable or not
    #[default]
    Declaration,
    /// Column j feeds the j-th export column (same order `SheetExporter` writes)
    Export,
}

/// Parses the data rows of a sheet into records of one schema
pub struct SheetImporter<'a, T> {
    schema: &'a RecordSchema<T>,
    layout: ColumnLayout,
}

impl<'a, T: Default> SheetImporter<'a, T> {
    pub fn new(schema: &'a RecordSchema<T>) -> Self {
        Self {
            schema,
            layout: ColumnLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Fields in column order for the configured layout
    pub fn columns(&self) -> SheetMapResult<Vec<&'a Field<T>>> {
        let schema = self.schema;
        match self.layout {
            ColumnLayout::Declaration => Ok(schema.fields().iter().collect()),
            ColumnLayout::Export => resolve(schema)
                .iter()
                .map(|spec| {
                    schema
                        .field(&spec.field_name)
                        .ok_or_else(|| SheetMapError::FieldNotFound {
                            field: spec.field_name.clone(),
                        })
                })
                .collect(),
        }
    }

    /// Build one record per data row. Row 0 is the header and is always skipped.
    ///
    /// Blank rows are data rows too: they yield a record of blank values, or a
    /// `Format` error when a non-nullable numeric field cannot take a blank.
    /// Any failure aborts the whole call; no partial list is returned.
    pub fn import(&self, rows: &[Row]) -> SheetMapResult<Vec<T>> {
        let columns = self.columns()?;

        if let Some(field) = columns.iter().find(|f| !f.field_type().is_supported()) {
            warn!(
                record_type = self.schema.type_name(),
                field = field.name(),
                "import rejected: field type has no coercion rule"
            );
            return Err(SheetMapError::UnsupportedType {
                field: field.name().to_string(),
                type_name: field.field_type().type_name(),
            });
        }

        let mut records = Vec::with_capacity(rows.len().saturating_sub(1));

        for (row_index, row) in rows.iter().enumerate().skip(1) {
            let mut record = T::default();
            for (col, field) in columns.iter().enumerate() {
                let text = row.get(col).map(String::as_str).unwrap_or("");
                let value = coerce_cell(field, text, row_index)?;
                let kind = value.kind();
                if !field.write(&mut record, value) {
                    return Err(SheetMapError::Metadata(format!(
                        "{}: field '{}' rejected a {} value",
                        self.schema.type_name(),
                        field.name(),
                        kind.map(|k| k.tag()).unwrap_or("empty")
                    )));
                }
            }
            records.push(record);
        }

        debug!(
            record_type = self.schema.type_name(),
            layout = ?self.layout,
            records = records.len(),
            "imported rows"
        );

        Ok(records)
    }
}

/// Coerce one cell for `field`; `row` is the sheet row index used in diagnostics
pub(crate) fn coerce_cell<T>(field: &Field<T>, text: &str, row: usize) -> SheetMapResult<FieldValue> {
    match field.field_type() {
        FieldType::Scalar { nullable: true, .. } if text.trim().is_empty() => Ok(FieldValue::Empty),
        FieldType::Scalar { kind, .. } => {
            coerce(text, *kind).map_err(|e| SheetMapError::Format {
                row,
                field: field.name().to_string(),
                value: e.value,
                expected: e.expected,
            })
        }
        FieldType::Unsupported { type_name } => Err(SheetMapError::UnsupportedType {
            field: field.name().to_string(),
            type_name: type_name.clone(),
        }),
    }
}
