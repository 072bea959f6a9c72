//! Entity capability traits
//!
//! Capabilities a persisted type may carry. The store checks for a
//! capability through the explicit `as_*` projections on [`Entity`]; a type
//! either implements a capability or it does not, with no runtime scanning.

use crate::metadata::{Model, Record};
use crate::validation::{ValidationContext, ValidationFailure};
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::hash::Hash;

/// Identity capability: every persisted entity carries a key
pub trait HasId {
    /// Key type identifying an instance
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Current identity value
    fn id(&self) -> Self::Key;

    /// Assign the identity value
    fn set_id(&mut self, id: Self::Key);
}

/// Audit capability: creation/modification stamps populated by the store
/// hook on insert and update
pub trait Auditable {
    /// When the record was first persisted
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Set the creation stamp
    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// When the record was last modified
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Set the modification stamp
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Soft-delete capability: a set timestamp marks the record deleted
/// without physical removal
pub trait SoftDeletable {
    /// Deletion stamp; `Some` means deleted
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Set or clear the deletion stamp
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);

    /// Whether the record is currently flagged deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Self-validation capability: the entity checks its own state and reports
/// zero or more field-level failures
pub trait SelfValidating {
    /// Validate current state given the ambient context (prior-state
    /// snapshot on update)
    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationFailure>;
}

/// Umbrella bound for persistable entities: identity plus metadata plus
/// optional capability projections.
///
/// The projections default to `None`; a type opts into a capability by
/// implementing the capability trait and overriding the matching
/// projection. Stores branch on the projection result instead of any form
/// of runtime type scanning.
pub trait Entity: HasId + Model + Record + Clone + Send + Sync + 'static {
    /// Audit capability (read side), when implemented
    fn as_auditable(&self) -> Option<&dyn Auditable> {
        None
    }

    /// Audit capability (write side), when implemented
    fn as_auditable_mut(&mut self) -> Option<&mut dyn Auditable> {
        None
    }

    /// Soft-delete capability (read side), when implemented
    fn as_soft_deletable(&self) -> Option<&dyn SoftDeletable> {
        None
    }

    /// Soft-delete capability (write side), when implemented
    fn as_soft_deletable_mut(&mut self) -> Option<&mut dyn SoftDeletable> {
        None
    }

    /// Self-validation capability, when implemented
    fn as_self_validating(&self) -> Option<&dyn SelfValidating> {
        None
    }
}
