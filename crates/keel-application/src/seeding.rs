//! Seeder execution
//!
//! The discovered seeder set is registered as a service during bootstrap;
//! running it is a separate, possibly deferred step gated by configuration.
//! Execution is strictly sequential in priority order because later seeders
//! may read data earlier ones committed.

use crate::registry::seeder::{SeederEntry, discover_seeders};
use crate::services::ServiceRegistry;
use keel_domain::entity::Entity;
use keel_domain::error::{Error, Result};
use keel_domain::filter::Filter;
use keel_domain::ports::store::EntityStore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Ordered descriptor set of discovered seeders.
///
/// Registered into the service registry at install time without
/// instantiating any seeder; instances are constructed fresh per run.
pub struct SeederSet {
    entries: Vec<&'static SeederEntry>,
}

impl SeederSet {
    /// Snapshot the seeder registry in execution order
    pub fn discovered() -> Self {
        Self {
            entries: discover_seeders(),
        }
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[&'static SeederEntry] {
        &self.entries
    }

    /// Number of discovered seeders
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no seeders were discovered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the registered seeder set against a service registry
pub struct SeederRunner;

impl SeederRunner {
    /// Execute applicable seeders sequentially in priority order.
    ///
    /// Resolves the [`SeederSet`] from the registry, constructs each seeder
    /// fresh, skips those whose environment list lacks an exact match for
    /// `environment`, and awaits each applicable seeder to completion
    /// before starting the next. Cancellation is checked between seeders
    /// and forwarded into each; a trip surfaces as an internal error naming
    /// the first seeder that did not run. Returns the number of seeders
    /// executed.
    pub async fn run(
        services: &ServiceRegistry,
        environment: &str,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let set = services.resolve::<SeederSet>()?;
        let mut seeded = 0;

        for entry in set.entries() {
            if cancel.is_cancelled() {
                return Err(Error::internal(format!(
                    "seeding cancelled before seeder '{}' ran",
                    entry.name
                )));
            }

            let seeder = match (entry.construct)() {
                Ok(seeder) => seeder,
                Err(reason) => {
                    warn!(
                        seeder = entry.name,
                        reason, "skipping seeder that failed to construct"
                    );
                    continue;
                }
            };

            if !seeder.environments().contains(&environment) {
                debug!(
                    seeder = entry.name,
                    environment, "skipping seeder not applicable to environment"
                );
                continue;
            }

            info!(seeder = entry.name, priority = ?entry.priority, "running seeder");
            seeder.seed(services, cancel).await?;
            seeded += 1;
        }

        Ok(seeded)
    }
}

/// Insert an entity only when nothing matches the uniqueness filter.
///
/// The existence check runs first, so repeated runs with the same
/// identifying filter persist exactly one record. Returns whether an
/// insert happened.
pub async fn seed_if_absent<T, S, F>(store: &S, unique: &Filter, make: F) -> Result<bool>
where
    T: Entity,
    S: EntityStore<T> + ?Sized,
    F: FnOnce() -> T,
{
    if store.exists(unique).await? {
        return Ok(false);
    }
    store.insert(make()).await?;
    Ok(true)
}
