//! Metadata resolver: field descriptor table -> ordered export columns

use super::schema::RecordSchema;
use crate::types::{CellStyle, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One exported column: title, backing field, and sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub title: String,
    pub field_name: String,
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

impl FieldSpec {
    pub fn new(title: impl Into<String>, field_name: impl Into<String>, order: i32) -> Self {
        Self {
            title: title.into(),
            field_name: field_name.into(),
            order,
            style: None,
        }
    }
}

/// Exportable fields of `schema`, sorted by ascending order.
///
/// Fields without export metadata are left out. Equal orders keep declaration order.
pub fn resolve<T>(schema: &RecordSchema<T>) -> Vec<FieldSpec> {
    let mut specs: Vec<FieldSpec> = schema
        .fields()
        .iter()
        .filter_map(|field| {
            field.export_meta().map(|meta| FieldSpec {
                title: meta.title.clone(),
                field_name: field.name().to_string(),
                order: meta.order,
                style: field.cell_style().cloned(),
            })
        })
        .collect();

    // sort_by_key is stable
    specs.sort_by_key(|spec| spec.order);

    debug!(
        record_type = schema.type_name(),
        exported = specs.len(),
        declared = schema.len(),
        "resolved export columns"
    );

    specs
}

/// Header row: the titles, in column order
pub fn header_row(specs: &[FieldSpec]) -> Row {
    specs.iter().map(|spec| spec.title.clone()).collect()
}
