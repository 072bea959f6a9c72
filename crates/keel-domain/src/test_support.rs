//! Sample entity graph backing tests across the workspace
//!
//! A small set of persistable types with declared schemas: a flat type, a
//! self-cycling navigation, a type with no searchable surface, and a
//! document graph with a single navigation, a collection navigation, audit
//! stamps, soft deletion, and self-validation.

use crate::entity::{Auditable, Entity, HasId, SelfValidating, SoftDeletable};
use crate::metadata::{FieldKind, FieldSchema, FieldValue, Model, ModelSchema, Record};
use crate::validation::{ValidationContext, ValidationFailure};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Flat entity with one searchable text field
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Identity
    pub id: i64,
    /// Searchable display name
    pub name: Option<String>,
    /// Non-searchable alias
    pub nickname: Option<String>,
}

impl Person {
    /// Person with the given name and no nickname
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            nickname: None,
        }
    }
}

static PERSON_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Person",
    fields: &[
        FieldSchema {
            name: "name",
            kind: FieldKind::Text,
            searchable: true,
        },
        FieldSchema {
            name: "nickname",
            kind: FieldKind::Text,
            searchable: false,
        },
    ],
};

impl Model for Person {
    fn schema() -> &'static ModelSchema {
        &PERSON_SCHEMA
    }
}

impl Record for Person {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(self.name.as_deref())),
            "nickname" => Some(FieldValue::Text(self.nickname.as_deref())),
            _ => None,
        }
    }
}

impl HasId for Person {
    type Key = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Person {}

/// Self-cycling navigation: `next` points back at `Employee`
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Identity
    pub id: i64,
    /// Searchable display name
    pub name: Option<String>,
    /// Searchable navigation back into the same type
    pub next: Option<Box<Employee>>,
}

impl Employee {
    /// Employee with the given name and no successor
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            next: None,
        }
    }
}

fn employee_schema() -> &'static ModelSchema {
    &EMPLOYEE_SCHEMA
}

static EMPLOYEE_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Employee",
    fields: &[
        FieldSchema {
            name: "name",
            kind: FieldKind::Text,
            searchable: true,
        },
        FieldSchema {
            name: "next",
            kind: FieldKind::Nav(employee_schema),
            searchable: true,
        },
    ],
};

impl Model for Employee {
    fn schema() -> &'static ModelSchema {
        &EMPLOYEE_SCHEMA
    }
}

impl Record for Employee {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(self.name.as_deref())),
            "next" => Some(FieldValue::Entity(
                self.next.as_deref().map(|next| next as &dyn Record),
            )),
            _ => None,
        }
    }
}

impl HasId for Employee {
    type Key = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Employee {}

/// Entity with no searchable surface anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    /// Identity
    pub id: i64,
    /// Current count
    pub value: i64,
}

impl Counter {
    /// Counter at the given value
    pub fn new(id: i64, value: i64) -> Self {
        Self { id, value }
    }
}

static COUNTER_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Counter",
    fields: &[FieldSchema {
        name: "value",
        kind: FieldKind::Int,
        searchable: false,
    }],
};

impl Model for Counter {
    fn schema() -> &'static ModelSchema {
        &COUNTER_SCHEMA
    }
}

impl Record for Counter {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "value" => Some(FieldValue::Int(Some(self.value))),
            _ => None,
        }
    }
}

impl HasId for Counter {
    type Key = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Entity for Counter {}

/// Collection element of the document graph
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Identity
    pub id: i64,
    /// Searchable label
    pub label: Option<String>,
}

impl Tag {
    /// Tag with the given label
    pub fn new(id: i64, label: &str) -> Self {
        Self {
            id,
            label: Some(label.to_string()),
        }
    }
}

static TAG_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Tag",
    fields: &[FieldSchema {
        name: "label",
        kind: FieldKind::Text,
        searchable: true,
    }],
};

impl Model for Tag {
    fn schema() -> &'static ModelSchema {
        &TAG_SCHEMA
    }
}

impl Record for Tag {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "label" => Some(FieldValue::Text(self.label.as_deref())),
            _ => None,
        }
    }
}

/// Single-navigation target of the document graph
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    /// Identity
    pub id: i64,
    /// Searchable display name
    pub name: Option<String>,
}

impl Author {
    /// Author with the given name
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
        }
    }
}

static AUTHOR_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Author",
    fields: &[FieldSchema {
        name: "name",
        kind: FieldKind::Text,
        searchable: true,
    }],
};

impl Model for Author {
    fn schema() -> &'static ModelSchema {
        &AUTHOR_SCHEMA
    }
}

impl Record for Author {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(self.name.as_deref())),
            _ => None,
        }
    }
}

fn author_schema() -> &'static ModelSchema {
    &AUTHOR_SCHEMA
}

fn tag_schema() -> &'static ModelSchema {
    &TAG_SCHEMA
}

/// Full-featured entity: searchable graph, audit stamps, soft deletion,
/// and self-validation
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identity
    pub id: Uuid,
    /// Searchable title; must not be blank
    pub title: Option<String>,
    /// Non-searchable scalar used by ordering tests; must not be negative
    pub rating: i64,
    /// Searchable single navigation
    pub author: Option<Author>,
    /// Searchable collection navigation
    pub tags: Vec<Tag>,
    /// Audit stamp set on insert
    pub created_at: Option<DateTime<Utc>>,
    /// Audit stamp set on insert and update
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete stamp
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Fresh document with a random identity and the given title
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.to_string()),
            rating: 0,
            author: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    /// Attach an author
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Append a tag
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: i64) -> Self {
        self.rating = rating;
        self
    }
}

static DOCUMENT_SCHEMA: ModelSchema = ModelSchema {
    type_name: "Document",
    fields: &[
        FieldSchema {
            name: "title",
            kind: FieldKind::Text,
            searchable: true,
        },
        FieldSchema {
            name: "rating",
            kind: FieldKind::Int,
            searchable: false,
        },
        FieldSchema {
            name: "author",
            kind: FieldKind::Nav(author_schema),
            searchable: true,
        },
        FieldSchema {
            name: "tags",
            kind: FieldKind::Collection(tag_schema),
            searchable: true,
        },
        FieldSchema {
            name: "created_at",
            kind: FieldKind::Timestamp,
            searchable: false,
        },
        FieldSchema {
            name: "updated_at",
            kind: FieldKind::Timestamp,
            searchable: false,
        },
        FieldSchema {
            name: "deleted_at",
            kind: FieldKind::Timestamp,
            searchable: false,
        },
    ],
};

impl Model for Document {
    fn schema() -> &'static ModelSchema {
        &DOCUMENT_SCHEMA
    }
}

impl Record for Document {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "title" => Some(FieldValue::Text(self.title.as_deref())),
            "rating" => Some(FieldValue::Int(Some(self.rating))),
            "author" => Some(FieldValue::Entity(
                self.author.as_ref().map(|author| author as &dyn Record),
            )),
            "tags" => Some(FieldValue::Collection(Some(
                self.tags.iter().map(|tag| tag as &dyn Record).collect(),
            ))),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            "updated_at" => Some(FieldValue::Timestamp(self.updated_at)),
            "deleted_at" => Some(FieldValue::Timestamp(self.deleted_at)),
            _ => None,
        }
    }
}

impl HasId for Document {
    type Key = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Auditable for Document {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}

impl SoftDeletable for Document {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
        self.deleted_at = at;
    }
}

impl SelfValidating for Document {
    fn validate(&self, _ctx: &ValidationContext<'_>) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        if self.title.as_deref().is_none_or(|title| title.trim().is_empty()) {
            failures.push(ValidationFailure::new("title", "must not be blank"));
        }
        if self.rating < 0 {
            failures.push(ValidationFailure::new("rating", "must not be negative"));
        }
        failures
    }
}

impl Entity for Document {
    fn as_auditable(&self) -> Option<&dyn Auditable> {
        Some(self)
    }

    fn as_auditable_mut(&mut self) -> Option<&mut dyn Auditable> {
        Some(self)
    }

    fn as_soft_deletable(&self) -> Option<&dyn SoftDeletable> {
        Some(self)
    }

    fn as_soft_deletable_mut(&mut self) -> Option<&mut dyn SoftDeletable> {
        Some(self)
    }

    fn as_self_validating(&self) -> Option<&dyn SelfValidating> {
        Some(self)
    }
}
