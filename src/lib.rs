//! SheetMap - declarative record <-> spreadsheet mapping
//!
//! Declare each field of a record type once (title, export order, type) and
//! import/export any number of records as spreadsheet rows, without writing
//! per-type mapping code.
//!
//! # Features
//!
//! - Field descriptor tables instead of runtime reflection
//! - Export columns sorted by declared order (stable on ties)
//! - Typed import with text coercion (text, i32, i64, f32, f64, decimal)
//! - Fail-fast errors carrying row and field context
//! - .xlsx export, .xls/.xlsx import
//!
//! # Example
//!
//! ```
//! use royalbit_sheetmap::mapping::{Field, Record, SchemaBuilder, SheetExporter};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Record for Person {
//!     fn describe(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
//!         schema
//!             .field(Field::new("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name).export("Name", 1))
//!             .field(Field::new("age", |p: &Person| &p.age, |p: &mut Person| &mut p.age).export("Age", 0))
//!     }
//! }
//!
//! let schema = Person::schema()?;
//! let exporter = SheetExporter::new(&schema);
//! let people = vec![Person { name: "Li".to_string(), age: 30 }];
//!
//! let rows = exporter.export_rows(&people, &exporter.field_specs())?;
//! assert_eq!(rows, vec![vec!["Age", "Name"], vec!["30", "Li"]]);
//! # Ok::<(), royalbit_sheetmap::SheetMapError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod mapping;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use config::SheetConfig;
pub use error::{SheetMapError, SheetMapResult};
pub use mapping::{
    ColumnLayout, Field, FieldSpec, Record, RecordSchema, SheetExporter, SheetImporter,
};
pub use types::{FieldType, FieldValue, Row, ScalarKind, SheetValue};
