//! Tests for the bootstrap composition root
//!
//! This binary links keel-infrastructure, so the built-in installers are
//! registered via linkme and run for real.

use keel_application::registry::installer::discover_installers;
use keel_application::seeding::SeederSet;
use keel_infrastructure::config::AppConfig;
use keel_infrastructure::di::bootstrap::{init_app, init_test_app};
use keel_infrastructure::memory::{SessionPool, StoreContext};
use keel_domain::test_support::Document;

#[test]
fn built_in_installers_order_core_services_before_seeding() {
    let order = discover_installers();
    let core = order
        .iter()
        .position(|entry| entry.name == "core-services")
        .expect("core-services installer registered");
    let seeding = order
        .iter()
        .position(|entry| entry.name == "seeding")
        .expect("seeding installer registered");

    assert!(core < seeding, "undeclared priority must run last");
}

#[tokio::test]
async fn bootstrap_registers_core_services_and_seeder_set() {
    let context = init_test_app().await.unwrap();

    assert!(context.services().contains::<SessionPool>());
    assert!(context.services().contains::<StoreContext>());
    assert!(context.services().contains::<SeederSet>());
}

#[tokio::test]
async fn context_query_specs_carry_the_configured_page_size() {
    let mut config = AppConfig::default();
    config.query.default_page_size = 7;

    let context = init_app(config).await.unwrap();
    let spec = context.query_spec::<Document>();
    assert_eq!(spec.page_size(), 7);
}

#[tokio::test]
async fn bootstrap_with_seeding_enabled_runs_without_registered_seeders() {
    let mut config = AppConfig::default();
    config.seeding.run_on_boot = true;

    // No seeder entries are linked into this test binary; the run is a
    // clean no-op.
    let context = init_app(config).await.unwrap();
    assert_eq!(context.config.environment, "Development");
}

#[tokio::test]
async fn bootstrapped_stores_are_usable() {
    let context = init_test_app().await.unwrap();
    let stores = context.stores().unwrap();

    use keel_domain::ports::store::EntityStore;
    let documents = stores.store::<Document>();
    documents.insert(Document::new("from bootstrap")).await.unwrap();
    assert_eq!(documents.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn contexts_are_isolated_from_each_other() {
    use keel_domain::ports::store::EntityStore;

    let first = init_test_app().await.unwrap();
    first
        .stores()
        .unwrap()
        .store::<Document>()
        .insert(Document::new("only in first"))
        .await
        .unwrap();

    let second = init_test_app().await.unwrap();
    assert_eq!(
        second
            .stores()
            .unwrap()
            .store::<Document>()
            .count(None)
            .await
            .unwrap(),
        0
    );
}
