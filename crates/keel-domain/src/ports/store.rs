//! Entity persistence port
//!
//! The capability a storage adapter must satisfy. Lookups express absence
//! as `Ok(None)`; only [`EntityStore::get_or_fail`] converts absence into a
//! not-found error. Mutations run the entity's self-validation hook first
//! and commit nothing when it fails.

use crate::entity::Entity;
use crate::error::Result;
use crate::filter::Filter;
use crate::page::PagedResult;
use crate::query::QuerySpec;
use async_trait::async_trait;

/// Depth of an update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDepth {
    /// Only scalar fields change; related records are left alone
    Shallow,
    /// The update cascades to related records
    Deep,
}

/// Asynchronous persistence operations over entity type `T`
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// All entities matching the filter, unfiltered when `None`
    async fn list(&self, filter: Option<&Filter>) -> Result<Vec<T>>;

    /// First entity matching the filter, or `None`
    async fn find(&self, filter: &Filter) -> Result<Option<T>>;

    /// Entity with the given identity, or `None`
    async fn get(&self, id: &T::Key) -> Result<Option<T>>;

    /// Entity with the given identity; absence is a not-found error
    async fn get_or_fail(&self, id: &T::Key) -> Result<T>;

    /// Whether any entity matches the filter
    async fn exists(&self, filter: &Filter) -> Result<bool>;

    /// Whether an entity with the given identity exists
    async fn exists_by_id(&self, id: &T::Key) -> Result<bool>;

    /// Persist a new entity, returning it with audit stamps applied
    async fn insert(&self, entity: T) -> Result<T>;

    /// Persist several entities; validation failures commit nothing
    async fn insert_many(&self, entities: Vec<T>) -> Result<Vec<T>>;

    /// Update an existing entity at the given depth
    async fn update(&self, entity: T, depth: UpdateDepth) -> Result<T>;

    /// Delete by identity; soft when the entity declares soft deletion,
    /// physical otherwise. Deleting an absent identity is a no-op.
    async fn delete(&self, id: &T::Key) -> Result<()>;

    /// Physically remove by identity regardless of soft-delete capability
    async fn hard_delete(&self, id: &T::Key) -> Result<()>;

    /// Count entities matching the filter, all when `None`
    async fn count(&self, filter: Option<&Filter>) -> Result<usize>;

    /// Apply a query specification without paging
    async fn query(&self, spec: &QuerySpec<T>) -> Result<Vec<T>>;

    /// Apply a query specification and return the selected page.
    ///
    /// The specification must carry a page number; a paged fetch without
    /// one is a configuration error.
    async fn query_paged(&self, spec: &QuerySpec<T>) -> Result<PagedResult<T>>;

    /// Free-text search over the entity's searchable surface. A blank term
    /// applies no filter; a non-blank term over a type with no searchable
    /// surface returns an empty list.
    async fn search(&self, term: &str) -> Result<Vec<T>>;
}
