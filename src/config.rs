//! Sheet schema configuration files
//!
//! A `SheetConfig` describes a record layout at run time (field names, types,
//! export titles and order) plus the export options for its sheet. It is loaded
//! once, then passed by reference to whatever needs it.

use crate::dynamic::{build_schema, DynamicRecord};
use crate::error::{SheetMapError, SheetMapResult};
use crate::mapping::RecordSchema;
use crate::types::{CellStyle, FieldType, ScalarKind};
use crate::workbook::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum worksheet name length accepted by Excel
const MAX_SHEET_NAME_LEN: usize = 31;

fn default_sheet_name() -> String {
    ExportOptions::default().sheet_name
}

fn default_column_width() -> f64 {
    ExportOptions::default().column_width
}

fn default_file_name() -> String {
    ExportOptions::default().file_name
}

/// Run-time record layout and export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_column_width")]
    pub column_width: f64,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One declared field. A `title` makes it exportable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

impl FieldConfig {
    /// Declared type; tags with no coercion rule become `FieldType::Unsupported`
    pub fn field_type(&self) -> FieldType {
        match ScalarKind::from_tag(&self.type_tag) {
            Some(kind) if self.nullable => FieldType::nullable(kind),
            Some(kind) => FieldType::scalar(kind),
            None => FieldType::unsupported(self.type_tag.clone()),
        }
    }
}

impl SheetConfig {
    pub fn from_yaml_str(content: &str) -> SheetMapResult<Self> {
        let config: SheetConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML schema file
    pub fn load(path: &Path) -> SheetMapResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SheetMapError::Config(format!(
                "Failed to read schema file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> SheetMapResult<()> {
        let sheet_name = self.sheet_name.trim();
        if sheet_name.is_empty() {
            return Err(SheetMapError::Config("sheet_name must not be empty".to_string()));
        }
        if sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(SheetMapError::Config(format!(
                "sheet_name '{}' is longer than {} characters",
                sheet_name, MAX_SHEET_NAME_LEN
            )));
        }
        if !(self.column_width > 0.0 && self.column_width.is_finite()) {
            return Err(SheetMapError::Config(format!(
                "column_width must be a positive number, got {}",
                self.column_width
            )));
        }
        if self.file_name.trim().is_empty() {
            return Err(SheetMapError::Config("file_name must not be empty".to_string()));
        }
        if let Some(field) = self.fields.iter().find(|f| f.type_tag.trim().is_empty()) {
            return Err(SheetMapError::Config(format!(
                "field '{}' has no type",
                field.name
            )));
        }
        Ok(())
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.sheet_name.clone(),
            column_width: self.column_width,
            file_name: self.file_name.clone(),
        }
    }

    /// Field descriptor table for records of this layout
    pub fn schema(&self) -> SheetMapResult<RecordSchema<DynamicRecord>> {
        build_schema(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = r#"
sheet_name: People
file_name: people.xlsx
fields:
  - name: name
    type: text
    title: Name
    order: 1
  - name: age
    type: int32
    title: Age
  - name: nickname
    type: string
    nullable: true
"#;

    #[test]
    fn test_parse_people() {
        let config = SheetConfig::from_yaml_str(PEOPLE).unwrap();
        assert_eq!(config.sheet_name, "People");
        assert_eq!(config.column_width, 20.0);
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.fields[1].order, 0);
        assert_eq!(config.fields[2].title, None);
    }

    #[test]
    fn test_field_types() {
        let config = SheetConfig::from_yaml_str(PEOPLE).unwrap();
        assert_eq!(config.fields[0].field_type(), FieldType::scalar(ScalarKind::Text));
        assert_eq!(config.fields[2].field_type(), FieldType::nullable(ScalarKind::Text));

        let composite = FieldConfig {
            name: "address".to_string(),
            type_tag: "Address".to_string(),
            title: None,
            order: 0,
            nullable: false,
            style: None,
        };
        assert_eq!(composite.field_type(), FieldType::unsupported("Address"));
    }

    #[test]
    fn test_defaults() {
        let config = SheetConfig::from_yaml_str("fields: []").unwrap();
        assert_eq!(config.export_options(), ExportOptions::default());
    }

    #[test]
    fn test_rejects_long_sheet_name() {
        let yaml = format!("sheet_name: {}\n", "x".repeat(40));
        let err = SheetConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, SheetMapError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_column_width() {
        let err = SheetConfig::from_yaml_str("column_width: 0").unwrap_err();
        assert!(err.to_string().contains("column_width"));
    }

    #[test]
    fn test_rejects_missing_type() {
        let err = SheetConfig::from_yaml_str("fields:\n  - name: a\n    type: ''\n").unwrap_err();
        assert!(err.to_string().contains("has no type"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = SheetConfig::from_yaml_str("fields: [").unwrap_err();
        assert!(matches!(err, SheetMapError::Yaml(_)));
    }

    #[test]
    fn test_style_parses_with_defaults() {
        let yaml = r#"
fields:
  - name: total
    type: decimal
    title: Total
    style:
      wrap_text: true
"#;
        let config = SheetConfig::from_yaml_str(yaml).unwrap();
        let style = config.fields[0].style.clone().unwrap();
        assert!(style.wrap_text);
        assert_eq!(style.font_name, "Arial");
    }
}
