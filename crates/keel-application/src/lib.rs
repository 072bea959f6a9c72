//! Keel Application Layer
//!
//! Bootstrap-time composition for the Keel toolkit: the typed service
//! registry installers populate, the linkme-backed installer and seeder
//! registries with their priority-ordered discovery, the sequential seeder
//! runner with environment gating, and validator dispatch.
//!
//! This crate declares the registry slices; infrastructure and application
//! code contribute entries to them. It never depends on an adapter crate,
//! so registration cannot form a cycle.

pub mod registry;
pub mod seeding;
pub mod services;
pub mod validation;

pub use registry::installer::{
    INSTALLERS, Installer, InstallerEntry, discover_installers, list_installers, run_installers,
};
pub use registry::seeder::{SEEDERS, Seeder, SeederEntry, discover_seeders, list_seeders};
pub use seeding::{SeederRunner, SeederSet, seed_if_absent};
pub use services::ServiceRegistry;
pub use validation::{EntityValidator, ValidatorRegistry};
