use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet row as raw cell text, in column order
pub type Row = Vec<String>;

//==============================================================================
// Scalar kinds
//==============================================================================

/// Scalar types a cell can be coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Plain text, passed through untouched
    Text,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// Single-precision float
    Float32,
    /// Double-precision float
    Float64,
    /// Fixed-point decimal
    Decimal,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::Text,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::Decimal,
    ];

    /// Canonical tag used in schema files
    pub fn tag(self) -> &'static str {
        match self {
            ScalarKind::Text => "text",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
            ScalarKind::Decimal => "decimal",
        }
    }

    /// Parse a schema type tag (case-insensitive, common aliases accepted)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "str" => Some(ScalarKind::Text),
            "int32" | "i32" | "int" | "integer" => Some(ScalarKind::Int32),
            "int64" | "i64" | "long" => Some(ScalarKind::Int64),
            "float32" | "f32" | "float" => Some(ScalarKind::Float32),
            "float64" | "f64" | "double" => Some(ScalarKind::Float64),
            "decimal" | "bigdecimal" => Some(ScalarKind::Decimal),
            _ => None,
        }
    }

    /// Position in `ALL`, also the slot of this kind in the coercion table
    pub fn index(self) -> usize {
        match self {
            ScalarKind::Text => 0,
            ScalarKind::Int32 => 1,
            ScalarKind::Int64 => 2,
            ScalarKind::Float32 => 3,
            ScalarKind::Float64 => 4,
            ScalarKind::Decimal => 5,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

//==============================================================================
// Field types and values
//==============================================================================

/// Declared type of a record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A coercible scalar; `nullable` fields accept blank cells as "no value"
    Scalar { kind: ScalarKind, nullable: bool },
    /// Anything else (composite/object types). Exportable as text, never importable.
    Unsupported { type_name: String },
}

impl FieldType {
    pub fn scalar(kind: ScalarKind) -> Self {
        FieldType::Scalar {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: ScalarKind) -> Self {
        FieldType::Scalar {
            kind,
            nullable: true,
        }
    }

    pub fn unsupported(type_name: impl Into<String>) -> Self {
        FieldType::Unsupported {
            type_name: type_name.into(),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FieldType::Scalar { .. })
    }

    /// Human-readable type name, e.g. `int32`, `decimal?`, `Address`
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Scalar {
                kind,
                nullable: false,
            } => kind.tag().to_string(),
            FieldType::Scalar {
                kind,
                nullable: true,
            } => format!("{}?", kind.tag()),
            FieldType::Unsupported { type_name } => type_name.clone(),
        }
    }
}

/// A value read from, or written into, a record field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value (a `None` in a nullable field, or a blank cell)
    #[default]
    Empty,
    Text(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
}

impl FieldValue {
    /// Scalar kind carried by this value, `None` for `Empty`
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(_) => Some(ScalarKind::Text),
            FieldValue::Int32(_) => Some(ScalarKind::Int32),
            FieldValue::Int64(_) => Some(ScalarKind::Int64),
            FieldValue::Float32(_) => Some(ScalarKind::Float32),
            FieldValue::Float64(_) => Some(ScalarKind::Float64),
            FieldValue::Decimal(_) => Some(ScalarKind::Decimal),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

/// Cell text form. `Empty` renders as the empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int32(v) => write!(f, "{}", v),
            FieldValue::Int64(v) => write!(f, "{}", v),
            FieldValue::Float32(v) => write!(f, "{}", v),
            FieldValue::Float64(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

//==============================================================================
// Rust types usable as record fields
//==============================================================================

/// Rust types that can back a mapped record field
pub trait SheetValue: Sized {
    fn field_type() -> FieldType;
    fn to_field_value(&self) -> FieldValue;
    /// `None` when the value's kind does not fit this type
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl SheetValue for String {
    fn field_type() -> FieldType {
        FieldType::scalar(ScalarKind::Text)
    }

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            FieldValue::Empty => Some(String::new()),
            _ => None,
        }
    }
}

macro_rules! numeric_sheet_value {
    ($ty:ty, $variant:ident) => {
        impl SheetValue for $ty {
            fn field_type() -> FieldType {
                FieldType::scalar(ScalarKind::$variant)
            }

            fn to_field_value(&self) -> FieldValue {
                FieldValue::$variant(*self)
            }

            fn from_field_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

numeric_sheet_value!(i32, Int32);
numeric_sheet_value!(i64, Int64);
numeric_sheet_value!(f32, Float32);
numeric_sheet_value!(f64, Float64);
numeric_sheet_value!(Decimal, Decimal);

impl<V: SheetValue> SheetValue for Option<V> {
    fn field_type() -> FieldType {
        match V::field_type() {
            FieldType::Scalar { kind, .. } => FieldType::nullable(kind),
            other => other,
        }
    }

    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Empty,
        }
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Empty => Some(None),
            other => V::from_field_value(other).map(Some),
        }
    }
}

//==============================================================================
// Caller-furnished presentation metadata
//==============================================================================

/// Cell style attached to an exported column.
///
/// Carried through to `FieldSpec` untouched; the mapping engine never renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    pub font_name: String,
    pub font_size: i16,
    pub font_color: i16,
    pub cell_color: i16,
    pub wrap_text: bool,
    pub alignment: i8,
    pub vertical_alignment: i8,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size: 12,
            font_color: 8,
            cell_color: 9,
            wrap_text: false,
            alignment: 1,
            vertical_alignment: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scalar_kind_tags_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_scalar_kind_aliases() {
        assert_eq!(ScalarKind::from_tag("String"), Some(ScalarKind::Text));
        assert_eq!(ScalarKind::from_tag("Integer"), Some(ScalarKind::Int32));
        assert_eq!(ScalarKind::from_tag("long"), Some(ScalarKind::Int64));
        assert_eq!(ScalarKind::from_tag("double"), Some(ScalarKind::Float64));
        assert_eq!(ScalarKind::from_tag(" BigDecimal "), Some(ScalarKind::Decimal));
        assert_eq!(ScalarKind::from_tag("Address"), None);
    }

    #[test]
    fn test_scalar_kind_index_matches_all() {
        for (idx, kind) in ScalarKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), idx);
        }
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Empty.to_string(), "");
        assert_eq!(FieldValue::Text("Li".to_string()).to_string(), "Li");
        assert_eq!(FieldValue::Int32(30).to_string(), "30");
        assert_eq!(FieldValue::Int64(-7).to_string(), "-7");
        assert_eq!(FieldValue::Float64(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Float64(3.0).to_string(), "3");
        assert_eq!(
            FieldValue::Decimal(Decimal::from_str("12.50").unwrap()).to_string(),
            "12.50"
        );
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::scalar(ScalarKind::Int32).type_name(), "int32");
        assert_eq!(FieldType::nullable(ScalarKind::Decimal).type_name(), "decimal?");
        assert_eq!(FieldType::unsupported("Address").type_name(), "Address");
        assert!(!FieldType::unsupported("Address").is_supported());
    }

    #[test]
    fn test_option_field_type_is_nullable() {
        assert_eq!(
            <Option<i64>>::field_type(),
            FieldType::nullable(ScalarKind::Int64)
        );
        assert_eq!(<i64>::field_type(), FieldType::scalar(ScalarKind::Int64));
    }

    #[test]
    fn test_option_from_empty_is_none() {
        assert_eq!(<Option<i32>>::from_field_value(FieldValue::Empty), Some(None));
        assert_eq!(
            <Option<i32>>::from_field_value(FieldValue::Int32(4)),
            Some(Some(4))
        );
        assert_eq!(<Option<i32>>::from_field_value(FieldValue::Int64(4)), None);
    }

    #[test]
    fn test_string_accepts_empty() {
        assert_eq!(String::from_field_value(FieldValue::Empty), Some(String::new()));
        assert_eq!(String::from_field_value(FieldValue::Int32(1)), None);
    }

    #[test]
    fn test_cell_style_defaults() {
        let style = CellStyle::default();
        assert_eq!(style.font_name, "Arial");
        assert_eq!(style.font_size, 12);
        assert!(!style.wrap_text);
    }
}
