//! # Keel
//!
//! A data-access and application-bootstrap toolkit: a generic entity store
//! and unit-of-work abstraction, a priority-ordered installer/seeder plugin
//! system wired at startup, and a metadata-driven search-predicate builder
//! that turns a free-text term into a filter over an entity graph.
//!
//! ## Example
//!
//! ```ignore
//! use keel::{AppConfig, init_app};
//! use keel::domain::test_support::Document;
//! use keel::domain::ports::store::EntityStore;
//!
//! let context = init_app(AppConfig::default()).await?;
//! let documents = context.stores()?.store::<Document>();
//! let hits = documents.search("quarterly").await?;
//! ```
//!
//! ## Architecture
//!
//! The workspace follows a layered architecture:
//!
//! - `domain` - entity capabilities, metadata, filter AST, query
//!   specifications, and the persistence port
//! - `application` - installer/seeder registries, service registry, seeder
//!   runner, and validator dispatch
//! - `infrastructure` - configuration, logging, the in-memory store, and
//!   the bootstrap composition root

/// Domain layer - entity capabilities, metadata, filters, queries
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use keel_domain::*;
}

/// Application layer - registries, seeding, validation dispatch
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use keel_application::*;
}

/// Infrastructure layer - config, logging, storage, and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use keel_infrastructure::*;
}

pub use keel_application::{
    Installer, Seeder, SeederRunner, SeederSet, ServiceRegistry, ValidatorRegistry, seed_if_absent,
};
pub use keel_domain::{
    Entity, Error, Filter, PagedResult, PathExpr, QueryOptions, QuerySpec, Result, SearchFilter,
};
pub use keel_infrastructure::{AppConfig, AppContext, ConfigLoader, init_app, init_test_app};
