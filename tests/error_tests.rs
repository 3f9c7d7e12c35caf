//! Error handling tests

use royalbit_sheetmap::{ScalarKind, SheetMapError};

fn format_error() -> SheetMapError {
    SheetMapError::Format {
        row: 3,
        field: "age".to_string(),
        value: "abc".to_string(),
        expected: ScalarKind::Int32,
    }
}

#[test]
fn test_format_error_message_names_row_and_field() {
    let message = format_error().to_string();
    assert!(message.contains("row 3"));
    assert!(message.contains("'age'"));
    assert!(message.contains("\"abc\""));
    assert!(message.contains("int32"));
}

#[test]
fn test_unsupported_type_message() {
    let err = SheetMapError::UnsupportedType {
        field: "address".to_string(),
        type_name: "Address".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Unsupported type 'Address' for field 'address'"
    );
}

#[test]
fn test_field_not_found_message() {
    let err = SheetMapError::FieldNotFound {
        field: "email".to_string(),
    };
    assert_eq!(err.to_string(), "Field not found: 'email'");
}

#[test]
fn test_error_kinds() {
    assert_eq!(format_error().kind(), "format");
    assert_eq!(SheetMapError::Metadata("x".into()).kind(), "metadata");
    assert_eq!(SheetMapError::Workbook("x".into()).kind(), "workbook");
    assert_eq!(SheetMapError::Config("x".into()).kind(), "config");
    assert_eq!(
        SheetMapError::UnsupportedContainerFormat("x".into()).kind(),
        "unsupported_container_format"
    );
}

#[test]
fn test_data_errors() {
    assert!(format_error().is_data_error());
    assert!(SheetMapError::Record("x".into()).is_data_error());
    assert!(!SheetMapError::Metadata("x".into()).is_data_error());
    assert!(!SheetMapError::FieldNotFound { field: "x".into() }.is_data_error());
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: SheetMapError = io_err.into();
    assert!(matches!(err, SheetMapError::Io(_)));
    assert!(err.to_string().starts_with("IO error"));
}

#[test]
fn test_yaml_error_conversion() {
    let yaml_err = serde_yaml::from_str::<Vec<String>>("[").unwrap_err();
    let err: SheetMapError = yaml_err.into();
    assert_eq!(err.kind(), "yaml");
}
