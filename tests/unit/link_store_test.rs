//! Unit tests for the LinkStore: server-confirmed mutation, error state,
//! and the preview fallback on unreachable pages.
//!
//! All URLs use the reserved `.invalid` TLD so the metadata fetch fails
//! deterministically and the extractor's hostname fallback kicks in.

use std::sync::Arc;

use linkstash::database::Database;
use linkstash::managers::link_manager::LinkManager;
use linkstash::services::auth_service::{AuthService, AuthServiceTrait};
use linkstash::services::link_store::LinkStore;
use linkstash::services::metadata_extractor::MetadataExtractor;
use linkstash::types::filter::FilterSpec;
use linkstash::types::metadata::FALLBACK_DESCRIPTION;

fn setup() -> (Arc<Database>, String) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let mut auth = AuthService::new(db.clone());
    let user = auth
        .sign_up("owner@example.com", "secret123")
        .expect("sign_up failed");
    (db, user.id)
}

fn store_for(db: &Arc<Database>, owner: &str) -> LinkStore<LinkManager> {
    LinkStore::new(LinkManager::new(db.clone()), MetadataExtractor::new(), owner)
}

/// The spec scenario: a fetch failure still produces a persisted record
/// titled with the hostname and carrying the submitted tags.
#[tokio::test]
async fn test_create_with_unreachable_page_persists_fallback() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();

    let created = store
        .create("stash-test.invalid", vec!["news".to_string()])
        .await;
    assert!(created);
    assert!(store.error().is_none());

    let link = store.links().first().expect("link should be present");
    assert_eq!(link.title, "stash-test.invalid");
    assert_eq!(link.description, FALLBACK_DESCRIPTION);
    assert_eq!(link.image, "");
    assert_eq!(link.tags.as_slice(), ["news".to_string()]);
    assert!(!link.id.is_empty());

    // A fresh store sees the persisted record too.
    let mut fresh = store_for(&db, &owner);
    fresh.load();
    assert_eq!(fresh.links().len(), 1);
    assert_eq!(fresh.links()[0].id, link.id);
}

#[tokio::test]
async fn test_create_prepends_newest() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();

    store.create("first.invalid", vec![]).await;
    store.create("second.invalid", vec![]).await;

    assert_eq!(store.links().len(), 2);
    assert_eq!(store.links()[0].title, "second.invalid");
    assert_eq!(store.links()[1].title, "first.invalid");
}

#[tokio::test]
async fn test_delete_failure_preserves_state() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("keep-me.invalid", vec![]).await;

    assert!(!store.delete("no-such-id"));
    assert!(store.error().unwrap().contains("Link not found"));
    assert_eq!(store.links().len(), 1, "loaded links must survive a failed delete");
}

#[tokio::test]
async fn test_delete_removes_locally_and_persisted() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("gone.invalid", vec![]).await;
    let id = store.links()[0].id.clone();

    assert!(store.delete(&id));
    assert!(store.links().is_empty());

    let mut fresh = store_for(&db, &owner);
    fresh.load();
    assert!(fresh.links().is_empty());
}

/// Tags are deduplicated before the persistence call.
#[tokio::test]
async fn test_set_tags_deduplicates() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("tagged.invalid", vec![]).await;
    let id = store.links()[0].id.clone();

    assert!(store.set_tags(
        &id,
        vec!["a".to_string(), "a".to_string(), "b".to_string()]
    ));
    assert_eq!(store.links()[0].tags.as_slice(), ["a".to_string(), "b".to_string()]);

    let mut fresh = store_for(&db, &owner);
    fresh.load();
    assert_eq!(fresh.links()[0].tags.as_slice(), ["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_set_tags_unknown_id_records_error() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();

    assert!(!store.set_tags("missing", vec!["x".to_string()]));
    assert!(store.error().is_some());
}

#[tokio::test]
async fn test_add_and_remove_tag() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("tags.invalid", vec!["rust".to_string()]).await;
    let id = store.links()[0].id.clone();

    assert!(store.add_tag(&id, "news"));
    assert_eq!(
        store.links()[0].tags.as_slice(),
        ["rust".to_string(), "news".to_string()]
    );

    // Adding an existing tag is a no-op, not a duplicate
    assert!(store.add_tag(&id, "news"));
    assert_eq!(store.links()[0].tags.len(), 2);

    assert!(store.remove_tag(&id, "rust"));
    assert_eq!(store.links()[0].tags.as_slice(), ["news".to_string()]);
}

/// A successful operation clears a previously recorded error.
#[tokio::test]
async fn test_error_clears_after_success() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();

    assert!(!store.delete("missing"));
    assert!(store.error().is_some());

    store.create("recovery.invalid", vec![]).await;
    assert!(store.error().is_none());
}

#[tokio::test]
async fn test_store_is_scoped_to_owner() {
    let (db, owner) = setup();
    let mut auth = AuthService::new(db.clone());
    let other = auth.sign_up("other@example.com", "secret123").unwrap();

    let mut mine = store_for(&db, &owner);
    mine.load();
    mine.create("mine.invalid", vec![]).await;

    let mut theirs = store_for(&db, &other.id);
    theirs.load();
    assert!(theirs.links().is_empty());

    // And they cannot delete my link
    let id = mine.links()[0].id.clone();
    assert!(!theirs.delete(&id));

    mine.load();
    assert_eq!(mine.links().len(), 1);
}

#[tokio::test]
async fn test_all_tags_in_first_seen_order() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("one.invalid", vec!["rust".to_string(), "news".to_string()]).await;
    store.create("two.invalid", vec!["news".to_string(), "food".to_string()]).await;

    // links() is newest-first, so "two"'s tags are seen first
    assert_eq!(
        store.all_tags(),
        vec!["news".to_string(), "food".to_string(), "rust".to_string()]
    );
}

#[tokio::test]
async fn test_visible_applies_active_filter() {
    let (db, owner) = setup();
    let mut store = store_for(&db, &owner);
    store.load();
    store.create("a.invalid", vec!["rust".to_string()]).await;
    store.create("b.invalid", vec!["food".to_string()]).await;

    let mut spec = FilterSpec::default();
    spec.tags.insert("rust");
    store.set_filter(spec);

    let visible = store.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "a.invalid");
    assert_eq!(store.links().len(), 2, "filtering never drops loaded links");
}
