//! Keel Domain Layer
//!
//! Core business types for the Keel data-access toolkit: entity capability
//! traits, static entity metadata, the filter AST, free-text search
//! predicate building, include-path resolution, query specifications, and
//! the persistence port consumed by storage adapters.
//!
//! This crate is pure: no runtime, no I/O, no registry. Higher layers wire
//! these types into an application at bootstrap.

pub mod constants;
pub mod entity;
pub mod error;
pub mod filter;
pub mod include;
pub mod metadata;
pub mod page;
pub mod ports;
pub mod query;
pub mod search;
pub mod test_support;
pub mod validation;

pub use constants::DEFAULT_PAGE_SIZE;
pub use entity::{Auditable, Entity, HasId, SelfValidating, SoftDeletable};
pub use error::{Error, ErrorKind, Result};
pub use filter::{Filter, Literal};
pub use include::{IncludeSet, PathExpr};
pub use metadata::{FieldKind, FieldSchema, FieldValue, Model, ModelSchema, Record};
pub use page::PagedResult;
pub use ports::store::{EntityStore, UpdateDepth};
pub use query::{OrderKey, QueryOptions, QuerySpec};
pub use search::SearchFilter;
pub use validation::{ValidationContext, ValidationFailure};
