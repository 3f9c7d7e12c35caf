//! Schema file tests

use pretty_assertions::assert_eq;
use royalbit_sheetmap::cli::{export_records, import_rows};
use royalbit_sheetmap::mapping::{resolve, ColumnLayout};
use royalbit_sheetmap::workbook::read_workbook;
use royalbit_sheetmap::{FieldType, ScalarKind, SheetConfig, SheetMapError};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

const ORDERS: &str = r#"
sheet_name: Orders
column_width: 14.5
file_name: orders.xlsx
fields:
  - name: id
    type: i64
    title: Order
    order: 0
  - name: customer
    type: String
    title: Customer
    order: 1
  - name: amount
    type: BigDecimal
    title: Amount
    order: 2
  - name: weight
    type: double
    nullable: true
    title: Weight (kg)
    order: 3
    style:
      font_name: Calibri
      wrap_text: true
"#;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(ORDERS.as_bytes()).unwrap();

    let config = SheetConfig::load(file.path()).unwrap();
    assert_eq!(config.sheet_name, "Orders");
    assert_eq!(config.column_width, 14.5);
    assert_eq!(config.export_options().file_name, "orders.xlsx");
}

#[test]
fn test_type_aliases() {
    let config = SheetConfig::from_yaml_str(ORDERS).unwrap();
    let types: Vec<FieldType> = config.fields.iter().map(|f| f.field_type()).collect();
    assert_eq!(
        types,
        vec![
            FieldType::scalar(ScalarKind::Int64),
            FieldType::scalar(ScalarKind::Text),
            FieldType::scalar(ScalarKind::Decimal),
            FieldType::nullable(ScalarKind::Float64),
        ]
    );
}

#[test]
fn test_style_is_carried_to_field_specs() {
    let config = SheetConfig::from_yaml_str(ORDERS).unwrap();
    let specs = resolve(&config.schema().unwrap());

    let weight = specs.iter().find(|s| s.field_name == "weight").unwrap();
    let style = weight.style.as_ref().unwrap();
    assert_eq!(style.font_name, "Calibri");
    assert!(style.wrap_text);
    assert!(specs[0].style.is_none());
}

#[test]
fn test_configured_round_trip() {
    let config = SheetConfig::from_yaml_str(ORDERS).unwrap();
    let records = json!([
        {"id": 1, "customer": "Acme", "amount": "99.95", "weight": 1.25},
        {"id": 2, "customer": "Globex", "amount": 5}
    ]);

    let artifact = export_records(&config, &records).unwrap();
    let rows = read_workbook(&artifact.bytes, Some(&artifact.file_name)).unwrap();
    assert_eq!(rows[0], vec!["Order", "Customer", "Amount", "Weight (kg)"]);

    let imported = import_rows(&config, &rows, ColumnLayout::Declaration).unwrap();
    assert_eq!(
        imported,
        json!([
            {"id": 1, "customer": "Acme", "amount": "99.95", "weight": 1.25},
            {"id": 2, "customer": "Globex", "amount": "5", "weight": null}
        ])
    );
}

#[test]
fn test_unknown_type_fails_on_import_only() {
    let config = SheetConfig::from_yaml_str(
        r#"
fields:
  - name: name
    type: text
    title: Name
  - name: address
    type: Address
"#,
    )
    .unwrap();

    let artifact = export_records(&config, &json!([{"name": "Li", "address": "Main St"}])).unwrap();
    let rows = read_workbook(&artifact.bytes, None).unwrap();
    assert_eq!(rows, vec![vec!["Name"], vec!["Li"]]);

    let err = import_rows(&config, &rows, ColumnLayout::Declaration).unwrap_err();
    assert!(matches!(err, SheetMapError::UnsupportedType { .. }));
}

#[test]
fn test_load_missing_file() {
    let err = SheetConfig::load(std::path::Path::new("/nonexistent/schema.yaml")).unwrap_err();
    assert!(matches!(err, SheetMapError::Config(_)));
    assert!(err.to_string().contains("/nonexistent/schema.yaml"));
}

#[test]
fn test_duplicate_field_names_rejected_by_schema() {
    let config = SheetConfig::from_yaml_str(
        "fields:\n  - {name: a, type: text}\n  - {name: a, type: int32}\n",
    )
    .unwrap();
    assert!(matches!(config.schema(), Err(SheetMapError::Metadata(_))));
}
