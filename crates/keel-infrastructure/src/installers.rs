//! Built-in installers
//!
//! Contributed to the application registry via linkme. Core services carry
//! priority 100 so later installers can resolve them; seeding registration
//! declares no priority and therefore runs after every prioritized
//! installer.

use crate::memory::session::SessionPool;
use crate::memory::store::StoreContext;
use keel_application::registry::installer::{INSTALLERS, Installer, InstallerEntry};
use keel_application::seeding::SeederSet;
use keel_application::services::ServiceRegistry;
use keel_domain::error::Result;
use linkme::distributed_slice;
use std::sync::Arc;
use tracing::info;

/// Registers the session pool and the entity store context
pub struct CoreServicesInstaller;

impl Installer for CoreServicesInstaller {
    fn name(&self) -> &str {
        "core-services"
    }

    fn install(&self, services: &mut ServiceRegistry) -> Result<()> {
        let pool = Arc::new(SessionPool::new());
        services.register(Arc::clone(&pool))?;
        services.register(Arc::new(StoreContext::new(pool)))?;
        info!("core services registered");
        Ok(())
    }
}

#[distributed_slice(INSTALLERS)]
static CORE_SERVICES: InstallerEntry = InstallerEntry {
    name: "core-services",
    description: "Session pool and entity store context",
    priority: Some(100),
    construct: || Ok(Box::new(CoreServicesInstaller)),
};

/// Registers the discovered seeder set without running it; execution is a
/// separate bootstrap step gated by configuration
pub struct SeedingInstaller;

impl Installer for SeedingInstaller {
    fn name(&self) -> &str {
        "seeding"
    }

    fn install(&self, services: &mut ServiceRegistry) -> Result<()> {
        let set = SeederSet::discovered();
        info!(seeders = set.len(), "seeder set registered");
        services.register(Arc::new(set))?;
        Ok(())
    }
}

#[distributed_slice(INSTALLERS)]
static SEEDING: InstallerEntry = InstallerEntry {
    name: "seeding",
    description: "Discovered seeder set registration",
    priority: None,
    construct: || Ok(Box::new(SeedingInstaller)),
};
