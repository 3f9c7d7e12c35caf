//! Records whose layout comes from a `SheetConfig` at run time
//!
//! These back the CLI and the HTTP API, where record types are described by
//! schema files instead of Rust structs.

use crate::config::SheetConfig;
use crate::error::{SheetMapError, SheetMapResult};
use crate::mapping::{coerce_cell, Field, RecordSchema};
use crate::types::{FieldType, FieldValue};
use serde_json::{Map, Number, Value};

static EMPTY: FieldValue = FieldValue::Empty;

/// Field values in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    values: Vec<FieldValue>,
}

impl DynamicRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    /// Value at `index`; unset slots read as `Empty`
    pub fn get(&self, index: usize) -> &FieldValue {
        self.values.get(index).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, index: usize, value: FieldValue) {
        if index >= self.values.len() {
            self.values.resize(index + 1, FieldValue::Empty);
        }
        self.values[index] = value;
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

/// Field descriptor table for a configured layout
pub fn build_schema(config: &SheetConfig) -> SheetMapResult<RecordSchema<DynamicRecord>> {
    let mut builder = RecordSchema::builder(config.sheet_name.clone());

    for (index, field_config) in config.fields.iter().enumerate() {
        let field_type = field_config.field_type();
        let expected = field_type.clone();
        let mut field = Field::with_accessors(
            field_config.name.clone(),
            field_type,
            move |record: &DynamicRecord| record.get(index).clone(),
            move |record: &mut DynamicRecord, value: FieldValue| {
                if !accepts(&expected, &value) {
                    return false;
                }
                record.set(index, value);
                true
            },
        );
        if let Some(title) = &field_config.title {
            field = field.export(title.clone(), field_config.order);
        }
        if let Some(style) = &field_config.style {
            field = field.style(style.clone());
        }
        builder = builder.field(field);
    }

    builder.build()
}

fn accepts(field_type: &FieldType, value: &FieldValue) -> bool {
    match (field_type, value.kind()) {
        (FieldType::Scalar { nullable, .. }, None) => *nullable,
        (FieldType::Scalar { kind, .. }, Some(actual)) => *kind == actual,
        (FieldType::Unsupported { .. }, _) => false,
    }
}

/// Build a record from a JSON/YAML object.
///
/// Values are rendered to text and coerced like spreadsheet cells; missing keys
/// and nulls are blank. `position` is the sheet row the record will occupy and
/// only feeds error messages.
pub fn record_from_json(
    schema: &RecordSchema<DynamicRecord>,
    value: &Value,
    position: usize,
) -> SheetMapResult<DynamicRecord> {
    let object = value.as_object().ok_or_else(|| {
        SheetMapError::Record(format!("record {} is not an object", position))
    })?;

    if let Some(key) = object.keys().find(|key| schema.field(key).is_none()) {
        return Err(SheetMapError::Record(format!(
            "record {} has unknown field '{}'",
            position, key
        )));
    }

    let mut record = DynamicRecord::default();
    for (index, field) in schema.fields().iter().enumerate() {
        let text = object.get(field.name()).map(json_text).unwrap_or_default();
        let value = match field.field_type() {
            // Kept as display text so the value still exports
            FieldType::Unsupported { .. } => FieldValue::Text(text),
            FieldType::Scalar { .. } => coerce_cell(field, &text, position)?,
        };
        record.set(index, value);
    }
    Ok(record)
}

/// Build records from a JSON/YAML array of objects
pub fn records_from_json(
    schema: &RecordSchema<DynamicRecord>,
    value: &Value,
) -> SheetMapResult<Vec<DynamicRecord>> {
    let items = value
        .as_array()
        .ok_or_else(|| SheetMapError::Record("expected a list of records".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| record_from_json(schema, item, idx + 1))
        .collect()
}

/// Object keyed by field name, in declaration order
pub fn record_to_json(schema: &RecordSchema<DynamicRecord>, record: &DynamicRecord) -> Value {
    let mut object = Map::with_capacity(schema.len());
    for field in schema.fields() {
        object.insert(field.name().to_string(), value_to_json(&field.read(record)));
    }
    Value::Object(object)
}

pub fn records_to_json(schema: &RecordSchema<DynamicRecord>, records: &[DynamicRecord]) -> Value {
    Value::Array(
        records
            .iter()
            .map(|record| record_to_json(schema, record))
            .collect(),
    )
}

/// Cell text for a JSON/YAML scalar. Floats use `f64` display, so a whole
/// float like `30.0` reads as `30` and still fills an integer field.
fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Decimals become strings so no precision is lost
fn value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Empty => Value::Null,
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Int32(v) => Value::Number((*v).into()),
        FieldValue::Int64(v) => Value::Number((*v).into()),
        FieldValue::Float32(v) => float_to_json(f64::from(*v)),
        FieldValue::Float64(v) => float_to_json(*v),
        FieldValue::Decimal(v) => Value::String(v.to_string()),
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
