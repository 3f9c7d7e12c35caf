//! Field descriptor tables: the per-type mapping metadata
//!
//! A `RecordSchema<T>` lists every field of `T` in declaration order, with its
//! declared type, optional export metadata (title + order), and accessor
//! closures. It is built once through `RecordSchema::builder()` and shared by
//! reference afterwards.

use crate::error::{SheetMapError, SheetMapResult};
use crate::types::{CellStyle, FieldType, FieldValue, SheetValue};
use std::collections::HashMap;
use std::fmt;

type Getter<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, FieldValue) -> bool + Send + Sync>;

/// Export metadata attached to a field: column title and sort order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMeta {
    pub title: String,
    pub order: i32,
}

/// One entry of a record's field descriptor table
pub struct Field<T> {
    name: String,
    field_type: FieldType,
    export: Option<ExportMeta>,
    style: Option<CellStyle>,
    getter: Getter<T>,
    setter: Option<Setter<T>>,
}

impl<T: 'static> Field<T> {
    /// Typed field backed by a struct member
    ///
    /// ```
    /// use royalbit_sheetmap::mapping::Field;
    ///
    /// #[derive(Default)]
    /// struct Person {
    ///     name: String,
    /// }
    ///
    /// let field = Field::new("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name)
    ///     .export("Name", 1);
    /// assert_eq!(field.name(), "name");
    /// ```
    pub fn new<V, G, M>(name: impl Into<String>, get: G, get_mut: M) -> Self
    where
        V: SheetValue + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            field_type: V::field_type(),
            export: None,
            style: None,
            getter: Box::new(move |record: &T| get(record).to_field_value()),
            setter: Some(Box::new(move |record: &mut T, value: FieldValue| {
                match V::from_field_value(value) {
                    Some(v) => {
                        *get_mut(record) = v;
                        true
                    }
                    None => false,
                }
            })),
        }
    }

    /// Field of a type with no coercion rule (nested structs, lists, ...).
    /// Exports through its `Display` form; importing it fails with `UnsupportedType`.
    pub fn opaque<V, G>(name: impl Into<String>, type_name: impl Into<String>, get: G) -> Self
    where
        V: fmt::Display + 'static,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            field_type: FieldType::unsupported(type_name),
            export: None,
            style: None,
            getter: Box::new(move |record: &T| FieldValue::Text(get(record).to_string())),
            setter: None,
        }
    }

    /// Field with hand-written accessors, for records whose layout is only known at run time
    pub fn with_accessors<G, S>(
        name: impl Into<String>,
        field_type: FieldType,
        getter: G,
        setter: S,
    ) -> Self
    where
        G: Fn(&T) -> FieldValue + Send + Sync + 'static,
        S: Fn(&mut T, FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            field_type,
            export: None,
            style: None,
            getter: Box::new(getter),
            setter: Some(Box::new(setter)),
        }
    }
}

impl<T> Field<T> {
    /// Mark the field exportable under `title`, sorted by `order`
    pub fn export(mut self, title: impl Into<String>, order: i32) -> Self {
        self.export = Some(ExportMeta {
            title: title.into(),
            order,
        });
        self
    }

    /// Attach caller-furnished presentation metadata
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn export_meta(&self) -> Option<&ExportMeta> {
        self.export.as_ref()
    }

    pub fn cell_style(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    /// Current value of this field on `record`
    pub fn read(&self, record: &T) -> FieldValue {
        (self.getter)(record)
    }

    /// Assign `value`; false when the field is read-only or the value kind does not fit
    pub fn write(&self, record: &mut T, value: FieldValue) -> bool {
        match &self.setter {
            Some(setter) => setter(record, value),
            None => false,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("export", &self.export)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Field descriptor table for record type `T`, in declaration order
pub struct RecordSchema<T> {
    type_name: String,
    fields: Vec<Field<T>>,
    index: HashMap<String, usize>,
}

impl<T> RecordSchema<T> {
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder<T> {
        SchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// All fields, in declaration order
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Look a field up by name
    pub fn field(&self, name: &str) -> Option<&Field<T>> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for RecordSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Registration step for a `RecordSchema`
pub struct SchemaBuilder<T> {
    type_name: String,
    fields: Vec<Field<T>>,
}

impl<T> SchemaBuilder<T> {
    /// Declare the next field
    pub fn field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate metadata and freeze the table
    pub fn build(self) -> SheetMapResult<RecordSchema<T>> {
        let mut index = HashMap::with_capacity(self.fields.len());

        for (idx, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SheetMapError::Metadata(format!(
                    "{}: field #{} has an empty name",
                    self.type_name, idx
                )));
            }

            if let Some(meta) = &field.export {
                if meta.title.trim().is_empty() {
                    return Err(SheetMapError::Metadata(format!(
                        "{}: exportable field '{}' has an empty title",
                        self.type_name, field.name
                    )));
                }
            }

            if index.insert(field.name.clone(), idx).is_some() {
                return Err(SheetMapError::Metadata(format!(
                    "{}: field '{}' is declared twice",
                    self.type_name, field.name
                )));
            }
        }

        Ok(RecordSchema {
            type_name: self.type_name,
            fields: self.fields,
            index,
        })
    }
}

/// A record type with a statically declared field table
///
/// ```
/// use royalbit_sheetmap::mapping::{Field, Record, SchemaBuilder};
///
/// #[derive(Default)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// impl Record for Person {
///     fn describe(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
///         schema
///             .field(Field::new("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name).export("Name", 1))
///             .field(Field::new("age", |p: &Person| &p.age, |p: &mut Person| &mut p.age).export("Age", 0))
///     }
/// }
///
/// let schema = Person::schema()?;
/// assert_eq!(schema.type_name(), "Person");
/// # Ok::<(), royalbit_sheetmap::SheetMapError>(())
/// ```
pub trait Record: Default + Sized + 'static {
    fn describe(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self>;

    fn schema() -> SheetMapResult<RecordSchema<Self>> {
        Self::describe(RecordSchema::builder(short_type_name::<Self>())).build()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
