//! Tests for the in-memory entity store
//!
//! Covers audit stamping, soft deletion, validation aborts, specification
//! application (filter, options, ordering, paging), free-text search, and
//! the session discipline.

use chrono::{DateTime, TimeZone, Utc};
use keel_domain::error::ErrorKind;
use keel_domain::filter::Filter;
use keel_domain::ports::store::{EntityStore, UpdateDepth};
use keel_domain::query::{QueryOptions, QuerySpec};
use keel_domain::test_support::{Author, Counter, Document, Person, Tag};
use keel_infrastructure::memory::{InMemoryStore, SessionPool, StoreContext};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

static TICKS: AtomicI64 = AtomicI64::new(0);

/// Monotonic test clock: every reading is one second after the previous
fn ticking_clock() -> DateTime<Utc> {
    let tick = TICKS.fetch_add(1, Ordering::Relaxed);
    Utc.timestamp_opt(1_700_000_000 + tick, 0).unwrap()
}

fn document_store() -> InMemoryStore<Document> {
    InMemoryStore::with_clock(Arc::new(SessionPool::new()), ticking_clock)
}

#[tokio::test]
async fn insert_stamps_creation_and_modification_together() {
    let store = document_store();

    let saved = store.insert(Document::new("fresh")).await.unwrap();

    assert!(saved.created_at.is_some());
    assert_eq!(saved.created_at, saved.updated_at);
}

#[tokio::test]
async fn update_preserves_creation_and_advances_modification() {
    let store = document_store();

    let saved = store.insert(Document::new("original")).await.unwrap();
    let mut changed = saved.clone();
    changed.title = Some("revised".to_string());

    let updated = store.update(changed, UpdateDepth::Shallow).await.unwrap();

    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at > saved.updated_at);
    assert_eq!(
        store.get_or_fail(&saved.id).await.unwrap().title.as_deref(),
        Some("revised")
    );
}

#[tokio::test]
async fn updating_an_absent_row_is_not_found() {
    let store = document_store();

    let err = store
        .update(Document::new("ghost"), UpdateDepth::Deep)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn invalid_entity_commits_nothing() {
    let store = document_store();

    let err = store
        .insert(Document::new("").with_rating(-5))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    // Both field failures aggregate into the one error.
    assert_eq!(err.metadata().len(), 2);
    assert_eq!(store.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_update_leaves_the_stored_row_untouched() {
    let store = document_store();
    let saved = store.insert(Document::new("kept")).await.unwrap();

    let mut broken = saved.clone();
    broken.title = Some(" ".to_string());
    let err = store.update(broken, UpdateDepth::Shallow).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        store.get_or_fail(&saved.id).await.unwrap().title.as_deref(),
        Some("kept")
    );
}

#[tokio::test]
async fn batch_insert_with_one_invalid_entity_commits_nothing() {
    let store = document_store();

    let err = store
        .insert_many(vec![
            Document::new("valid one"),
            Document::new(""),
            Document::new("valid two"),
        ])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(store.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_identity_is_rejected() {
    let store = document_store();
    let saved = store.insert(Document::new("first")).await.unwrap();

    let mut twin = Document::new("second");
    twin.id = saved.id;
    let err = store.insert(twin).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(store.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn lookups_express_absence_as_none_and_get_or_fail_as_error() {
    let store = document_store();
    let absent = Document::new("never stored");

    assert!(store.get(&absent.id).await.unwrap().is_none());
    assert!(!store.exists_by_id(&absent.id).await.unwrap());

    let err = store.get_or_fail(&absent.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!err.metadata().is_empty());
}

#[tokio::test]
async fn soft_deletable_entities_are_stamped_not_removed() {
    let store = document_store();
    let saved = store.insert(Document::new("target")).await.unwrap();

    store.delete(&saved.id).await.unwrap();

    // Hidden from normal reads.
    assert!(store.get(&saved.id).await.unwrap().is_none());
    assert_eq!(store.count(None).await.unwrap(), 0);

    // Still present when global filters are ignored, with the stamp set.
    let spec =
        QuerySpec::<Document>::new().with_options(QueryOptions::IGNORE_GLOBAL_FILTERS);
    let rows = store.query(&spec).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].deleted_at.is_some());

    // Hard delete removes the row for good.
    store.hard_delete(&saved.id).await.unwrap();
    let rows = store.query(&spec).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn entities_without_soft_delete_are_removed_physically() {
    let store: InMemoryStore<Person> = InMemoryStore::new(Arc::new(SessionPool::new()));
    store.insert(Person::new(1, "Ada")).await.unwrap();

    store.delete(&1).await.unwrap();

    let spec = QuerySpec::<Person>::new().with_options(QueryOptions::IGNORE_GLOBAL_FILTERS);
    assert!(store.query(&spec).await.unwrap().is_empty());

    // Deleting an absent identity stays a no-op.
    store.delete(&1).await.unwrap();
}

#[tokio::test]
async fn paging_windows_follow_the_ordering() {
    let store = document_store();
    for i in 1..=20 {
        store
            .insert(Document::new(&format!("doc-{i:02}")).with_rating(i))
            .await
            .unwrap();
    }

    let spec = QuerySpec::<Document>::new()
        .order_by("title")
        .with_page_size(5)
        .page(2);
    let page = store.query_paged(&spec).await.unwrap();

    let titles: Vec<&str> = page
        .items
        .iter()
        .map(|doc| doc.title.as_deref().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["doc-06", "doc-07", "doc-08", "doc-09", "doc-10"]
    );
    assert_eq!(page.total_count, 20);
    assert_eq!(page.total_pages(), 4);
    assert!(page.has_previous_page());
    assert!(page.has_next_page());

    let last = store.query_paged(&spec.clone().page(4)).await.unwrap();
    assert!(!last.has_next_page());
}

#[tokio::test]
async fn paged_fetch_without_a_page_number_is_a_configuration_error() {
    let store = document_store();
    store.insert(Document::new("only")).await.unwrap();

    let spec = QuerySpec::<Document>::new().with_page_size(5);
    let err = store.query_paged(&spec).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn conflicting_tracking_options_fail_on_every_apply() {
    let store = document_store();
    let spec = QuerySpec::<Document>::new()
        .with_options(QueryOptions::NO_TRACKING | QueryOptions::NO_TRACKING_WITH_IDENTITY);

    let first = store.query(&spec).await.unwrap_err();
    let second = store.query(&spec).await.unwrap_err();
    assert_eq!(first.kind(), ErrorKind::Configuration);
    assert_eq!(second.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn ordering_applies_then_by_keys_with_direction() {
    let store = document_store();
    store
        .insert(Document::new("alpha").with_rating(2))
        .await
        .unwrap();
    store
        .insert(Document::new("bravo").with_rating(1))
        .await
        .unwrap();
    store
        .insert(Document::new("apex").with_rating(2))
        .await
        .unwrap();

    let spec = QuerySpec::<Document>::new()
        .order_by_desc("rating")
        .order_by("title");
    let rows = store.query(&spec).await.unwrap();

    let titles: Vec<&str> = rows
        .iter()
        .map(|doc| doc.title.as_deref().unwrap())
        .collect();
    assert_eq!(titles, vec!["alpha", "apex", "bravo"]);
}

#[tokio::test]
async fn unordered_queries_keep_insertion_order() {
    let store = document_store();
    store.insert(Document::new("first")).await.unwrap();
    store.insert(Document::new("second")).await.unwrap();
    store.insert(Document::new("third")).await.unwrap();

    let rows = store.list(None).await.unwrap();
    let titles: Vec<&str> = rows
        .iter()
        .map(|doc| doc.title.as_deref().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn include_paths_are_accepted_and_deduplicated() {
    let store = document_store();
    store
        .insert(Document::new("graph").with_author(Author::new(1, "Grace")))
        .await
        .unwrap();

    let spec = QuerySpec::<Document>::new()
        .with_include_path("author")
        .with_include_path("author.name")
        .with_include_path("author.name");
    let rows = store.query(&spec).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn search_traverses_the_whole_graph() {
    let store = document_store();
    store
        .insert(
            Document::new("minutes")
                .with_author(Author::new(1, "Margaret"))
                .with_tag(Tag::new(1, "archive")),
        )
        .await
        .unwrap();
    store
        .insert(Document::new("margin notes"))
        .await
        .unwrap();
    store.insert(Document::new("agenda")).await.unwrap();

    // Matches the author navigation and a title substring.
    let hits = store.search("Marg").await.unwrap();
    assert_eq!(hits.len(), 2);

    // Matches only through the collection navigation.
    let hits = store.search("archive").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title.as_deref(), Some("minutes"));
}

#[tokio::test]
async fn blank_search_term_applies_no_filter() {
    let store = document_store();
    store.insert(Document::new("one")).await.unwrap();
    store.insert(Document::new("two")).await.unwrap();

    assert_eq!(store.search("   ").await.unwrap().len(), 2);
}

#[tokio::test]
async fn search_over_a_surfaceless_type_returns_nothing() {
    let store: InMemoryStore<Counter> = InMemoryStore::new(Arc::new(SessionPool::new()));
    store.insert(Counter::new(1, 42)).await.unwrap();

    assert!(store.search("42").await.unwrap().is_empty());
}

#[tokio::test]
async fn sessions_release_after_success_and_error_paths() {
    let pool = Arc::new(SessionPool::new());
    let store: InMemoryStore<Document> = InMemoryStore::new(Arc::clone(&pool));

    store.insert(Document::new("ok")).await.unwrap();
    assert_eq!(pool.active_sessions(), 0);

    let absent = Document::new("never stored");
    let _ = store.get_or_fail(&absent.id).await.unwrap_err();
    assert_eq!(pool.active_sessions(), 0);

    let _ = store.insert(Document::new("")).await.unwrap_err();
    assert_eq!(pool.active_sessions(), 0);
}

#[tokio::test]
async fn store_context_shares_one_store_per_entity_type() {
    let context = StoreContext::new(Arc::new(SessionPool::new()));

    let documents = context.store::<Document>();
    documents.insert(Document::new("shared")).await.unwrap();

    // A second resolution sees the same data.
    let again = context.store::<Document>();
    assert_eq!(again.count(None).await.unwrap(), 1);

    // Different entity types get independent stores on the same pool.
    let counters = context.store::<Counter>();
    assert_eq!(counters.count(None).await.unwrap(), 0);
}
