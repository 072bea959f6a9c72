//! Plugin registries
//!
//! linkme distributed slices for installers and seeders. Components submit
//! entries at compile time; discovery snapshots a slice and stable-sorts it
//! ascending by declared priority, with slice (link) order as the
//! deterministic tie-break. An undeclared priority sorts last.

pub mod installer;
pub mod seeder;

pub use installer::{INSTALLERS, Installer, InstallerEntry};
pub use seeder::{SEEDERS, Seeder, SeederEntry};

/// Resolved priority for an entry with none declared: the sentinel maximum,
/// so the entry runs after every declared priority.
pub(crate) fn resolved_priority(priority: Option<u32>) -> u32 {
    priority.unwrap_or(u32::MAX)
}
