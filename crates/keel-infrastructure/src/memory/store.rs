//! In-memory entity store
//!
//! Object store over a concurrent map, for development, tests, and
//! seeders. Rows hold full object graphs, so eager-load paths are resolved
//! and recorded but cannot change results here; a relational adapter
//! consumes the same specification unchanged.

use crate::memory::session::SessionPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use keel_domain::entity::Entity;
use keel_domain::error::{Error, Result};
use keel_domain::filter::Filter;
use keel_domain::metadata::{FieldValue, Model, Record};
use keel_domain::page::PagedResult;
use keel_domain::ports::store::{EntityStore, UpdateDepth};
use keel_domain::query::{OrderKey, QueryOptions, QuerySpec};
use keel_domain::search::SearchFilter;
use keel_domain::validation::ValidationContext;
use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::debug;

/// Injectable time source for audit and soft-delete stamps
pub type Clock = fn() -> DateTime<Utc>;

/// One stored row; `seq` preserves insertion order for deterministic reads
struct Row<T> {
    seq: u64,
    entity: T,
}

/// In-memory entity store over a concurrent map
pub struct InMemoryStore<T: Entity> {
    rows: DashMap<T::Key, Row<T>>,
    next_seq: AtomicU64,
    sessions: Arc<SessionPool>,
    clock: Clock,
}

impl<T: Entity> InMemoryStore<T> {
    /// Store stamping audit fields from the system clock
    pub fn new(sessions: Arc<SessionPool>) -> Self {
        Self::with_clock(sessions, Utc::now)
    }

    /// Store with an injected clock, for deterministic stamps in tests
    pub fn with_clock(sessions: Arc<SessionPool>, clock: Clock) -> Self {
        Self {
            rows: DashMap::new(),
            next_seq: AtomicU64::new(0),
            sessions,
            clock,
        }
    }

    /// Whether the row passes the soft-delete global filter
    fn visible(entity: &T, include_deleted: bool) -> bool {
        include_deleted
            || entity
                .as_soft_deletable()
                .is_none_or(|soft| !soft.is_deleted())
    }

    /// Clone the current rows in insertion order
    fn snapshot(&self, include_deleted: bool) -> Vec<T> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|row| Self::visible(&row.entity, include_deleted))
            .map(|row| (row.seq, row.entity.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Run the entity's self-validation hook; failures abort the commit
    fn check_valid(entity: &T, ctx: &ValidationContext<'_>) -> Result<()> {
        if let Some(validating) = entity.as_self_validating() {
            let failures = validating.validate(ctx);
            if !failures.is_empty() {
                return Err(Error::validation(failures));
            }
        }
        Ok(())
    }

    fn stamp_insert(&self, entity: &mut T) {
        let now = (self.clock)();
        if let Some(audit) = entity.as_auditable_mut() {
            audit.set_created_at(now);
            audit.set_updated_at(now);
        }
    }

    /// Apply a specification in the fixed order: predicate, execution
    /// options, include paths, ordering keys. Paging is the caller's step.
    fn apply_spec(&self, spec: &QuerySpec<T>) -> Result<Vec<T>> {
        spec.validate()?;

        let include_deleted = spec.options().contains(QueryOptions::IGNORE_GLOBAL_FILTERS);
        let mut rows = self.snapshot(include_deleted);

        if let Some(predicate) = spec.predicate() {
            rows.retain(|row| predicate.matches(row));
        }

        let includes = spec.includes().resolved();
        if !includes.is_empty() {
            // Rows already embed their graphs; recorded for observability
            debug!(entity = T::schema().type_name, paths = ?includes, "resolved include paths");
        }

        if !spec.order().is_empty() {
            rows.sort_by(|a, b| compare_by_keys(a, b, spec.order()));
        }

        Ok(rows)
    }
}

/// Multi-key comparison: first key is primary, later keys break ties
fn compare_by_keys<T: Record>(a: &T, b: &T, keys: &[OrderKey]) -> Ordering {
    for key in keys {
        let ord = compare_field(a, b, key.field);
        let ord = if key.ascending { ord } else { ord.reverse() };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Compare one field on two records; null sorts before any value and
/// non-scalar fields compare equal
fn compare_field<T: Record>(a: &T, b: &T, field: &str) -> Ordering {
    match (a.field(field), b.field(field)) {
        (Some(FieldValue::Text(x)), Some(FieldValue::Text(y))) => x.cmp(&y),
        (Some(FieldValue::Int(x)), Some(FieldValue::Int(y))) => x.cmp(&y),
        (Some(FieldValue::Bool(x)), Some(FieldValue::Bool(y))) => x.cmp(&y),
        (Some(FieldValue::Timestamp(x)), Some(FieldValue::Timestamp(y))) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    async fn list(&self, filter: Option<&Filter>) -> Result<Vec<T>> {
        let _session = self.sessions.acquire();
        let mut rows = self.snapshot(false);
        if let Some(filter) = filter {
            rows.retain(|row| filter.matches(row));
        }
        Ok(rows)
    }

    async fn find(&self, filter: &Filter) -> Result<Option<T>> {
        let _session = self.sessions.acquire();
        Ok(self
            .snapshot(false)
            .into_iter()
            .find(|row| filter.matches(row)))
    }

    async fn get(&self, id: &T::Key) -> Result<Option<T>> {
        let _session = self.sessions.acquire();
        Ok(self
            .rows
            .get(id)
            .filter(|row| Self::visible(&row.entity, false))
            .map(|row| row.entity.clone()))
    }

    async fn get_or_fail(&self, id: &T::Key) -> Result<T> {
        self.get(id).await?.ok_or_else(|| {
            Error::not_found(format!("{} '{:?}'", T::schema().type_name, id))
        })
    }

    async fn exists(&self, filter: &Filter) -> Result<bool> {
        Ok(self.find(filter).await?.is_some())
    }

    async fn exists_by_id(&self, id: &T::Key) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }

    async fn insert(&self, mut entity: T) -> Result<T> {
        let _session = self.sessions.acquire();

        Self::check_valid(&entity, &ValidationContext::for_insert())?;
        if self.rows.contains_key(&entity.id()) {
            return Err(Error::invalid_argument(format!(
                "{} '{:?}' already exists",
                T::schema().type_name,
                entity.id()
            )));
        }

        self.stamp_insert(&mut entity);
        let seq = self.next_seq.fetch_add(1, AtomicOrdering::Relaxed);
        self.rows.insert(
            entity.id(),
            Row {
                seq,
                entity: entity.clone(),
            },
        );
        Ok(entity)
    }

    async fn insert_many(&self, entities: Vec<T>) -> Result<Vec<T>> {
        let _session = self.sessions.acquire();

        // Validate the whole batch before committing anything
        let mut failures = Vec::new();
        for entity in &entities {
            if let Some(validating) = entity.as_self_validating() {
                failures.extend(validating.validate(&ValidationContext::for_insert()));
            }
        }
        if !failures.is_empty() {
            return Err(Error::validation(failures));
        }
        for entity in &entities {
            if self.rows.contains_key(&entity.id()) {
                return Err(Error::invalid_argument(format!(
                    "{} '{:?}' already exists",
                    T::schema().type_name,
                    entity.id()
                )));
            }
        }

        let mut inserted = Vec::with_capacity(entities.len());
        for mut entity in entities {
            self.stamp_insert(&mut entity);
            let seq = self.next_seq.fetch_add(1, AtomicOrdering::Relaxed);
            self.rows.insert(
                entity.id(),
                Row {
                    seq,
                    entity: entity.clone(),
                },
            );
            inserted.push(entity);
        }
        Ok(inserted)
    }

    async fn update(&self, mut entity: T, depth: UpdateDepth) -> Result<T> {
        let _session = self.sessions.acquire();

        let (seq, prior) = self
            .rows
            .get(&entity.id())
            .map(|row| (row.seq, row.entity.clone()))
            .ok_or_else(|| {
                Error::not_found(format!("{} '{:?}'", T::schema().type_name, entity.id()))
            })?;

        Self::check_valid(&entity, &ValidationContext::for_update(&prior))?;

        if let Some(audit) = entity.as_auditable_mut() {
            if let Some(created) = prior.as_auditable().and_then(|prior| prior.created_at()) {
                audit.set_created_at(created);
            }
            audit.set_updated_at((self.clock)());
        }

        // Rows embed their object graphs, so both depths replace the stored
        // value here; the depth distinguishes cascade behavior for
        // relational adapters
        debug!(entity = T::schema().type_name, depth = ?depth, "updating row");
        self.rows.insert(
            entity.id(),
            Row {
                seq,
                entity: entity.clone(),
            },
        );
        Ok(entity)
    }

    async fn delete(&self, id: &T::Key) -> Result<()> {
        let _session = self.sessions.acquire();

        let soft = match self.rows.get(id) {
            Some(row) => row.entity.as_soft_deletable().is_some(),
            None => return Ok(()),
        };

        if soft {
            if let Some(mut row) = self.rows.get_mut(id) {
                let now = (self.clock)();
                if let Some(deletable) = row.entity.as_soft_deletable_mut() {
                    deletable.set_deleted_at(Some(now));
                }
            }
        } else {
            self.rows.remove(id);
        }
        Ok(())
    }

    async fn hard_delete(&self, id: &T::Key) -> Result<()> {
        let _session = self.sessions.acquire();
        self.rows.remove(id);
        Ok(())
    }

    async fn count(&self, filter: Option<&Filter>) -> Result<usize> {
        Ok(self.list(filter).await?.len())
    }

    async fn query(&self, spec: &QuerySpec<T>) -> Result<Vec<T>> {
        let _session = self.sessions.acquire();
        self.apply_spec(spec)
    }

    async fn query_paged(&self, spec: &QuerySpec<T>) -> Result<PagedResult<T>> {
        let _session = self.sessions.acquire();

        let rows = self.apply_spec(spec)?;
        let page_number = spec.page_number().ok_or_else(|| {
            Error::configuration("paged fetch requires a page number on the specification")
        })?;
        let page_size = spec.page_size();

        let total_count = rows.len();
        let items = rows
            .into_iter()
            .skip((page_number - 1) * page_size)
            .take(page_size)
            .collect();
        Ok(PagedResult::new(items, total_count, page_number, page_size))
    }

    async fn search(&self, term: &str) -> Result<Vec<T>> {
        match SearchFilter::build::<T>(term) {
            Some(filter) => self.list(Some(&filter)).await,
            None => self.list(None).await,
        }
    }
}

/// Lazily built, shared stores keyed by entity type.
///
/// Registered by the core-services installer so seeders and application
/// code resolve one store per entity type, all drawing sessions from the
/// same pool.
pub struct StoreContext {
    pool: Arc<SessionPool>,
    clock: Clock,
    stores: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl StoreContext {
    /// Context stamping audit fields from the system clock
    pub fn new(pool: Arc<SessionPool>) -> Self {
        Self::with_clock(pool, Utc::now)
    }

    /// Context with an injected clock shared by every store it builds
    pub fn with_clock(pool: Arc<SessionPool>, clock: Clock) -> Self {
        Self {
            pool,
            clock,
            stores: DashMap::new(),
        }
    }

    /// The store for entity type `T`, built on first use
    pub fn store<T: Entity>(&self) -> Arc<InMemoryStore<T>> {
        let entry = self
            .stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Arc::new(InMemoryStore::<T>::with_clock(
                    Arc::clone(&self.pool),
                    self.clock,
                )) as Arc<dyn Any + Send + Sync>
            })
            .clone();
        entry
            .downcast::<InMemoryStore<T>>()
            .expect("store entry registered under its entity type id")
    }

    /// The session pool shared by every store in this context
    pub fn session_pool(&self) -> Arc<SessionPool> {
        Arc::clone(&self.pool)
    }
}
