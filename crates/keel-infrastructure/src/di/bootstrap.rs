//! Bootstrap composition root
//!
//! Runs discovered installers against a fresh service registry, then,
//! when configured, runs the registered seeders for the current
//! environment. Both phases execute sequentially on the bootstrapping
//! task; the registry is never mutated after bootstrap completes.
//!
//! Installers are auto-registered via linkme distributed slices when this
//! crate is linked. No explicit registration call is needed.

use crate::config::AppConfig;
use crate::memory::store::StoreContext;
use keel_application::run_installers;
use keel_application::seeding::SeederRunner;
use keel_application::services::ServiceRegistry;
use keel_domain::error::Result;
use keel_domain::query::QuerySpec;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Application context produced by bootstrap
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    services: ServiceRegistry,
}

impl AppContext {
    /// The populated service registry, read-only after bootstrap
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Convenience access to the registered store context
    pub fn stores(&self) -> Result<Arc<StoreContext>> {
        self.services.resolve::<StoreContext>()
    }

    /// A fresh query specification carrying the configured default page size
    pub fn query_spec<T>(&self) -> QuerySpec<T> {
        QuerySpec::new().with_page_size(self.config.query.default_page_size)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("environment", &self.config.environment)
            .field("services", &self.services.len())
            .finish_non_exhaustive()
    }
}

/// Initialize the application context.
///
/// Runs every discovered installer in priority order against a fresh
/// registry, then runs the registered seeders for the configured
/// environment when `seeding.run_on_boot` is set.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    info!(environment = %config.environment, "bootstrapping application");

    let mut services = ServiceRegistry::new();
    let installed = run_installers(&mut services)?;
    info!(installed, "installers completed");

    if config.seeding.run_on_boot {
        let cancel = CancellationToken::new();
        let seeded = SeederRunner::run(&services, &config.environment, &cancel).await?;
        info!(seeded, "seeders completed");
    }

    Ok(AppContext {
        config: Arc::new(config),
        services,
    })
}

/// Initialize an application context for testing, with default
/// configuration and seeding left to the test
pub async fn init_test_app() -> Result<AppContext> {
    init_app(AppConfig::default()).await
}
