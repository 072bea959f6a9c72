//! Tests for the installer registry
//!
//! Declares installer entries in this test binary; linkme collects them
//! into the same slice production entries land in, so discovery and
//! ordering are exercised against real registrations.

use keel_application::registry::installer::{
    INSTALLERS, Installer, InstallerEntry, discover_installers, list_installers, run_installers,
};
use keel_application::services::ServiceRegistry;
use keel_domain::error::Result;
use linkme::distributed_slice;
use std::sync::Mutex;

static RUN_LOG: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

struct RecordingInstaller(&'static str);

impl Installer for RecordingInstaller {
    fn name(&self) -> &str {
        self.0
    }

    fn install(&self, _services: &mut ServiceRegistry) -> Result<()> {
        RUN_LOG.lock().unwrap().push(self.0);
        Ok(())
    }
}

// Declaration order is deliberately scrambled relative to priority so the
// ordering tests prove the sort, not the source layout.

#[distributed_slice(INSTALLERS)]
static UNDECLARED: InstallerEntry = InstallerEntry {
    name: "test-undeclared",
    description: "No declared priority, must run last",
    priority: None,
    construct: || Ok(Box::new(RecordingInstaller("test-undeclared"))),
};

#[distributed_slice(INSTALLERS)]
static LATE: InstallerEntry = InstallerEntry {
    name: "test-late",
    description: "Priority 2000",
    priority: Some(2000),
    construct: || Ok(Box::new(RecordingInstaller("test-late"))),
};

#[distributed_slice(INSTALLERS)]
static EARLY: InstallerEntry = InstallerEntry {
    name: "test-early",
    description: "Priority 1000",
    priority: Some(1000),
    construct: || Ok(Box::new(RecordingInstaller("test-early"))),
};

#[distributed_slice(INSTALLERS)]
static TIED_A: InstallerEntry = InstallerEntry {
    name: "test-tied-a",
    description: "Shares priority 1500 with test-tied-b",
    priority: Some(1500),
    construct: || Ok(Box::new(RecordingInstaller("test-tied-a"))),
};

#[distributed_slice(INSTALLERS)]
static TIED_B: InstallerEntry = InstallerEntry {
    name: "test-tied-b",
    description: "Shares priority 1500 with test-tied-a",
    priority: Some(1500),
    construct: || Ok(Box::new(RecordingInstaller("test-tied-b"))),
};

#[distributed_slice(INSTALLERS)]
static BROKEN: InstallerEntry = InstallerEntry {
    name: "test-broken",
    description: "Factory always fails",
    priority: Some(1),
    construct: || Err("deliberately unconstructible".to_string()),
};

/// Positions of our entries in the discovered order, keyed by name
fn discovered_positions(names: &[&str]) -> Vec<usize> {
    let order = discover_installers();
    names
        .iter()
        .map(|name| {
            order
                .iter()
                .position(|entry| entry.name == *name)
                .unwrap_or_else(|| panic!("installer '{name}' not discovered"))
        })
        .collect()
}

#[test]
fn priorities_order_ascending_with_undeclared_last() {
    let positions = discovered_positions(&["test-early", "test-late", "test-undeclared"]);
    assert!(positions[0] < positions[1]);
    assert!(positions[1] < positions[2]);
}

#[test]
fn tied_priorities_keep_a_stable_relative_order() {
    let first = discovered_positions(&["test-tied-a", "test-tied-b"]);
    let second = discovered_positions(&["test-tied-a", "test-tied-b"]);

    // Same relative order on every discovery pass.
    assert_eq!(
        first[0] < first[1],
        second[0] < second[1],
        "tie-break order changed between runs"
    );
}

#[test]
fn run_executes_in_discovered_order_and_isolates_broken_factories() {
    RUN_LOG.lock().unwrap().clear();

    let mut services = ServiceRegistry::new();
    let installed = run_installers(&mut services).unwrap();

    let log = RUN_LOG.lock().unwrap().clone();
    assert_eq!(installed, log.len());

    // The broken factory was skipped, everything else ran.
    assert!(!log.contains(&"test-broken"));
    let early = log.iter().position(|name| *name == "test-early").unwrap();
    let late = log.iter().position(|name| *name == "test-late").unwrap();
    let undeclared = log
        .iter()
        .position(|name| *name == "test-undeclared")
        .unwrap();
    assert!(early < late);
    assert!(late < undeclared);
}

#[test]
fn listing_reports_names_and_descriptions() {
    let listed = list_installers();
    assert!(
        listed
            .iter()
            .any(|(name, description)| *name == "test-early" && !description.is_empty())
    );
}
