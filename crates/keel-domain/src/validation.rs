//! Validation value objects
//!
//! Field-level failures produced by self-validating entities and registered
//! validators, plus the ambient context handed to an entity when it checks
//! its own state.

use crate::metadata::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Name of the offending field
    pub field: String,
    /// Human-readable description of the failure
    pub message: String,
}

impl ValidationFailure {
    /// Create a new failure for the given field
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ambient context available to an entity validating its own state.
///
/// On update the context carries a snapshot of the prior persisted state so
/// rules can compare against it; on insert there is no prior state.
pub struct ValidationContext<'a> {
    prior: Option<&'a dyn Record>,
}

impl<'a> ValidationContext<'a> {
    /// Context for a fresh insert; no prior state exists
    pub fn for_insert() -> Self {
        Self { prior: None }
    }

    /// Context for an update against the given prior-state snapshot
    pub fn for_update(prior: &'a dyn Record) -> Self {
        Self { prior: Some(prior) }
    }

    /// Prior-state snapshot, present only on update
    pub fn prior(&self) -> Option<&dyn Record> {
        self.prior
    }

    /// Whether this validation runs for an update
    pub fn is_update(&self) -> bool {
        self.prior.is_some()
    }
}
