//! Service registry
//!
//! Typed singleton map that installers populate during bootstrap. Mutation
//! happens only on the single bootstrap thread; afterwards the registry is
//! read-only and safe to share.

use keel_domain::error::{Error, Result};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of application services keyed by concrete type
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under its concrete type.
    ///
    /// Registering the same type twice is a configuration error; installers
    /// that want to replace a registration should resolve and wrap instead.
    pub fn register<T: Send + Sync + 'static>(&mut self, service: Arc<T>) -> Result<()> {
        if self.services.contains_key(&TypeId::of::<T>()) {
            return Err(Error::configuration(format!(
                "service '{}' is already registered",
                type_name::<T>()
            )));
        }
        self.services.insert(TypeId::of::<T>(), service);
        Ok(())
    }

    /// Resolve a service by type; absence is a not-found error
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .and_then(|service| Arc::clone(service).downcast::<T>().ok())
            .ok_or_else(|| Error::not_found(format!("service '{}'", type_name::<T>())))
    }

    /// Whether a service of the given type is registered
    pub fn contains<T: 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.len())
            .finish()
    }
}
