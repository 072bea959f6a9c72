//! Installer registry
//!
//! Auto-registration for bootstrap installers using linkme distributed
//! slices. Installers register themselves via
//! `#[linkme::distributed_slice(INSTALLERS)]` and are discovered, ordered,
//! and run at bootstrap.

use super::resolved_priority;
use crate::services::ServiceRegistry;
use keel_domain::error::Result;
use tracing::{debug, warn};

/// A bootstrap-time component that registers services into the application
pub trait Installer: Send + Sync {
    /// Installer name used in diagnostics
    fn name(&self) -> &str;

    /// Register this installer's services.
    ///
    /// The registry is shared and mutable so an installer can both read
    /// prior registrations and add new ones.
    fn install(&self, services: &mut ServiceRegistry) -> Result<()>;
}

/// Registry entry for installers
///
/// Each installer registers itself with this entry using
/// `#[linkme::distributed_slice(INSTALLERS)]`. The entry carries metadata,
/// the declared priority, and a factory to construct the instance.
pub struct InstallerEntry {
    /// Unique installer name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Declared run priority; lower runs first, `None` runs last
    pub priority: Option<u32>,
    /// Factory to construct the installer instance
    pub construct: fn() -> std::result::Result<Box<dyn Installer>, String>,
}

// Auto-collection via linkme distributed slices - installers submit entries
// at compile time
#[linkme::distributed_slice]
pub static INSTALLERS: [InstallerEntry] = [..];

/// Discover registered installers in execution order.
///
/// Snapshots the slice and stable-sorts ascending by resolved priority;
/// entries sharing a priority keep their slice order, which is fixed at
/// link time, so repeated runs order identically.
pub fn discover_installers() -> Vec<&'static InstallerEntry> {
    let mut entries: Vec<&'static InstallerEntry> = INSTALLERS.iter().collect();
    entries.sort_by_key(|entry| resolved_priority(entry.priority));
    entries
}

/// Construct and run every discovered installer in order.
///
/// An entry whose factory fails is logged and skipped so one broken
/// component does not abort the rest of bootstrap; a failure inside
/// `install` itself propagates. Returns the number of installers run.
pub fn run_installers(services: &mut ServiceRegistry) -> Result<usize> {
    let mut installed = 0;
    for entry in discover_installers() {
        match (entry.construct)() {
            Ok(installer) => {
                debug!(
                    installer = entry.name,
                    priority = ?entry.priority,
                    "running installer"
                );
                installer.install(services)?;
                installed += 1;
            }
            Err(reason) => {
                warn!(
                    installer = entry.name,
                    reason, "skipping installer that failed to construct"
                );
            }
        }
    }
    Ok(installed)
}

/// List registered installers as (name, description) pairs, in execution
/// order
pub fn list_installers() -> Vec<(&'static str, &'static str)> {
    discover_installers()
        .into_iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
