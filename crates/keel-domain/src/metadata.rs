//! Static entity metadata
//!
//! Every persistable type declares a [`ModelSchema`]: a static table naming
//! its fields, their kinds, and whether each participates in free-text
//! search. The search predicate builder walks these tables at the type
//! level; filter evaluation and ordering read concrete values back through
//! the [`Record`] trait.
//!
//! Navigation fields reference the target type's schema through a late-bound
//! function pointer so mutually navigating types (including self-cycles) can
//! be declared without initialization-order issues.

use chrono::{DateTime, Utc};

/// Late-bound reference to another entity type's schema
pub type SchemaRef = fn() -> &'static ModelSchema;

/// Kind of a declared field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// String-valued field, nullable at runtime
    Text,
    /// Integer-valued field
    Int,
    /// Boolean-valued field
    Bool,
    /// UTC timestamp field
    Timestamp,
    /// Single navigation to another entity, nullable at runtime
    Nav(SchemaRef),
    /// Collection navigation to another entity type
    Collection(SchemaRef),
}

/// One field declaration inside a [`ModelSchema`]
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Field name, matching what [`Record::field`] answers to
    pub name: &'static str,
    /// Declared kind
    pub kind: FieldKind,
    /// Whether free-text search may traverse or match this field
    pub searchable: bool,
}

/// Static description of an entity type
#[derive(Debug)]
pub struct ModelSchema {
    /// Entity type name used in diagnostics and error resources
    pub type_name: &'static str,
    /// Field table in declaration order
    pub fields: &'static [FieldSchema],
}

impl ModelSchema {
    /// Look up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Compile-time metadata hook: maps a type to its schema table
pub trait Model {
    /// The static schema describing this type's fields
    fn schema() -> &'static ModelSchema;
}

/// A field value read back from a live entity.
///
/// Variants mirror [`FieldKind`]; `None` payloads represent null fields.
pub enum FieldValue<'a> {
    /// Text field value
    Text(Option<&'a str>),
    /// Integer field value
    Int(Option<i64>),
    /// Boolean field value
    Bool(Option<bool>),
    /// Timestamp field value
    Timestamp(Option<DateTime<Utc>>),
    /// Single navigation target; `None` when the reference is null
    Entity(Option<&'a dyn Record>),
    /// Collection navigation elements; `None` when the collection itself
    /// is null (distinct from present-but-empty)
    Collection(Option<Vec<&'a dyn Record>>),
}

/// Runtime field access used by filter evaluation and ordering.
///
/// Implementations answer for every name declared in the type's schema and
/// return `None` for unknown names.
pub trait Record {
    /// Read the named field's current value
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}
