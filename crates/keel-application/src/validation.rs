//! Validator dispatch
//!
//! Registered validators are keyed by a (source, input) type pair: the
//! source is the component the validation runs on behalf of, the input is
//! the value being checked. Dispatch exposes the failure sequence as an
//! async stream, or aggregates it into a single validation error.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use keel_domain::error::{Error, Result};
use keel_domain::validation::ValidationFailure;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Validates inputs of type `I` on behalf of source type `S`.
///
/// `S` participates only in registry keying; one input type may carry
/// different rules for different sources.
#[async_trait]
pub trait EntityValidator<S, I: Sync>: Send + Sync {
    /// Field-level failures for the input, empty when valid
    async fn failures(&self, input: &I, cancel: &CancellationToken) -> Vec<ValidationFailure>;
}

/// Registry of validators keyed by (source, input) type pair
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<(TypeId, TypeId), Arc<dyn Any + Send + Sync>>,
}

impl ValidatorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator for the (source, input) pair.
    ///
    /// Registering the same pair twice is a configuration error.
    pub fn register<S: 'static, I: Sync + 'static>(
        &mut self,
        validator: Arc<dyn EntityValidator<S, I>>,
    ) -> Result<()> {
        let key = (TypeId::of::<S>(), TypeId::of::<I>());
        if self.validators.contains_key(&key) {
            return Err(Error::configuration(format!(
                "validator for ({}, {}) is already registered",
                type_name::<S>(),
                type_name::<I>()
            )));
        }
        self.validators.insert(key, Arc::new(validator));
        Ok(())
    }

    /// Resolve the validator for the (source, input) pair; absence is a
    /// not-found error
    pub fn get<S: 'static, I: Sync + 'static>(&self) -> Result<Arc<dyn EntityValidator<S, I>>> {
        self.validators
            .get(&(TypeId::of::<S>(), TypeId::of::<I>()))
            .and_then(|validator| {
                Arc::clone(validator)
                    .downcast::<Arc<dyn EntityValidator<S, I>>>()
                    .ok()
            })
            .map(|outer| Arc::clone(&*outer))
            .ok_or_else(|| {
                Error::not_found(format!(
                    "validator for ({}, {})",
                    type_name::<S>(),
                    type_name::<I>()
                ))
            })
    }

    /// The registered validator's failure sequence for the input, as an
    /// async stream
    pub async fn failures<S: 'static, I: Sync + 'static>(
        &self,
        input: &I,
        cancel: &CancellationToken,
    ) -> Result<BoxStream<'static, ValidationFailure>> {
        let validator = self.get::<S, I>()?;
        let failures = validator.failures(input, cancel).await;
        Ok(stream::iter(failures).boxed())
    }

    /// Run the registered validator and aggregate any failures into one
    /// validation error carrying the full field-level list
    pub async fn ensure_valid<S: 'static, I: Sync + 'static>(
        &self,
        input: &I,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let validator = self.get::<S, I>()?;
        let failures = validator.failures(input, cancel).await;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(failures))
        }
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.validators.len())
            .finish()
    }
}
