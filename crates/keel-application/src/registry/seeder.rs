//! Seeder registry
//!
//! Mirrors the installer registry for data seeders. Discovery orders
//! entries the same way but does not instantiate them; construction happens
//! fresh on every run so a seeder never carries state between runs.

use super::resolved_priority;
use crate::services::ServiceRegistry;
use async_trait::async_trait;
use keel_domain::error::Result;
use tokio_util::sync::CancellationToken;

/// A bootstrap-time component that populates initial or reference data
#[async_trait]
pub trait Seeder: Send + Sync {
    /// Seeder name used in diagnostics
    fn name(&self) -> &str;

    /// Environment names this seeder applies to, matched exactly against
    /// the current runtime environment
    fn environments(&self) -> &[&str];

    /// Populate data. Runs sequentially after every higher-priority seeder
    /// has completed, so earlier seeders' data is visible here.
    async fn seed(&self, services: &ServiceRegistry, cancel: &CancellationToken) -> Result<()>;
}

/// Registry entry for seeders
///
/// Each seeder registers itself with this entry using
/// `#[linkme::distributed_slice(SEEDERS)]`.
pub struct SeederEntry {
    /// Unique seeder name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Declared run priority; lower runs first, `None` runs last
    pub priority: Option<u32>,
    /// Factory to construct the seeder instance
    pub construct: fn() -> std::result::Result<Box<dyn Seeder>, String>,
}

// Auto-collection via linkme distributed slices - seeders submit entries at
// compile time
#[linkme::distributed_slice]
pub static SEEDERS: [SeederEntry] = [..];

/// Discover registered seeders in execution order.
///
/// Same ordering contract as installer discovery: stable ascending sort by
/// resolved priority, slice order breaking ties.
pub fn discover_seeders() -> Vec<&'static SeederEntry> {
    let mut entries: Vec<&'static SeederEntry> = SEEDERS.iter().collect();
    entries.sort_by_key(|entry| resolved_priority(entry.priority));
    entries
}

/// List registered seeders as (name, description) pairs, in execution order
pub fn list_seeders() -> Vec<(&'static str, &'static str)> {
    discover_seeders()
        .into_iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
