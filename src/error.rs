use crate::types::ScalarKind;
use thiserror::Error;

pub type SheetMapResult<T> = Result<T, SheetMapError>;

#[derive(Error, Debug)]
pub enum SheetMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export metadata is unusable (empty title, duplicate field name)
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// A column names a field the record schema does not declare
    #[error("Field not found: '{field}'")]
    FieldNotFound { field: String },

    /// The declared field type has no coercion rule
    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedType { field: String, type_name: String },

    /// Cell text could not be parsed into the field's declared type
    #[error("Format error at row {row}, field '{field}': cannot parse {value:?} as {expected}")]
    Format {
        row: usize,
        field: String,
        value: String,
        expected: ScalarKind,
    },

    #[error("Unsupported container format: {0}")]
    UnsupportedContainerFormat(String),

    /// Failure reported by the spreadsheet reader or writer
    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid record: {0}")]
    Record(String),
}

impl SheetMapError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            SheetMapError::Io(_) => "io",
            SheetMapError::Yaml(_) => "yaml",
            SheetMapError::Json(_) => "json",
            SheetMapError::Metadata(_) => "metadata",
            SheetMapError::FieldNotFound { .. } => "field_not_found",
            SheetMapError::UnsupportedType { .. } => "unsupported_type",
            SheetMapError::Format { .. } => "format",
            SheetMapError::UnsupportedContainerFormat(_) => "unsupported_container_format",
            SheetMapError::Workbook(_) => "workbook",
            SheetMapError::Config(_) => "config",
            SheetMapError::Record(_) => "record",
        }
    }

    /// True when the failure comes from the data handed in, not from the schema or environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            SheetMapError::Format { .. }
                | SheetMapError::UnsupportedType { .. }
                | SheetMapError::Record(_)
        )
    }
}
