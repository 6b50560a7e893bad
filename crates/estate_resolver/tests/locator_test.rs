//! Tests for the breadth-first bucket search.

use estate_error::EstateResult;
use estate_resolver::{locator_seeds, BucketLocator, LocatorConfig};
use estate_storage::{
    BucketStorage, InMemoryBucketStorage, ListOptions, StorageConfig, StorageEntry,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Number of segments in a bucket prefix; the root has depth 0.
fn depth(prefix: &str) -> usize {
    prefix.split('/').filter(|s| !s.is_empty()).count()
}

fn config() -> StorageConfig {
    StorageConfig::new("https://abc.supabase.co", "property-photos")
}

/// Every folder contains a folder named `a` until `max_depth`, so the tree
/// looks self-similar (`a`, `a/a`, `a/a/a`, ...) while being acyclic.
struct SelfSimilarStorage {
    max_depth: usize,
    listed: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl BucketStorage for SelfSimilarStorage {
    fn bucket(&self) -> &str {
        "property-photos"
    }

    async fn list(&self, prefix: &str, _options: &ListOptions) -> EstateResult<Vec<StorageEntry>> {
        self.listed.lock().unwrap().push(prefix.to_string());
        if depth(prefix) < self.max_depth {
            Ok(vec![StorageEntry::folder("a")])
        } else {
            Ok(Vec::new())
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://{}", path)
    }

    async fn exists(&self, _path: &str) -> EstateResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_finds_file_in_seed_folder() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("owner9/prop1/2.jpg");
    storage.insert("unrelated/2.jpg");

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator
        .locate("2.jpg", &locator_seeds("prop1", Some("owner9")))
        .await;

    assert_eq!(found.as_deref(), Some("owner9/prop1/2.jpg"));
    // prop1 does not exist, owner9 holds only a folder, then owner9/prop1 matches
    assert_eq!(locator.visited(), &["prop1", "owner9", "owner9/prop1"]);
}

#[tokio::test]
async fn test_falls_back_to_root_and_descends() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("archive/2019/march/kitchen.jpg");

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator
        .locate("kitchen.jpg", &locator_seeds("prop1", None))
        .await;

    assert_eq!(found.as_deref(), Some("archive/2019/march/kitchen.jpg"));
    assert_eq!(
        locator.visited(),
        &["prop1", "", "archive", "archive/2019", "archive/2019/march"]
    );
}

#[tokio::test]
async fn test_self_similar_tree_visits_each_prefix_once() {
    let storage = SelfSimilarStorage {
        max_depth: 6,
        listed: Mutex::new(Vec::new()),
    };
    let seeds = vec!["a".to_string(), "a/a".to_string(), "/a/".to_string()];

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator.locate("missing.jpg", &seeds).await;

    assert!(found.is_none());
    let listed = storage.listed.lock().unwrap().clone();
    let unique: HashSet<_> = listed.iter().collect();
    assert_eq!(unique.len(), listed.len(), "a prefix was listed twice: {listed:?}");
    // root plus a, a/a, ..., six levels deep
    assert_eq!(listed.len(), 7);
}

#[tokio::test]
async fn test_listing_failure_is_skipped() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("owner9/prop1/2.jpg");
    storage.fail_prefix("prop1");
    storage.fail_prefix("owner9");

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator
        .locate("2.jpg", &locator_seeds("prop1", Some("owner9")))
        .await;

    assert_eq!(found.as_deref(), Some("owner9/prop1/2.jpg"));
}

#[tokio::test]
async fn test_all_listings_failing_is_not_found() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("prop1/2.jpg");
    storage.fail_prefix("prop1");
    storage.fail_prefix("");

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator.locate("2.jpg", &locator_seeds("prop1", None)).await;

    assert!(found.is_none());
}

#[tokio::test]
async fn test_newer_folder_searched_first() {
    use chrono::{TimeZone, Utc};

    let storage = InMemoryBucketStorage::new(config());
    storage.insert_at(
        "old/x.jpg",
        Some(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()),
    );
    storage.insert_at(
        "new/x.jpg",
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    );

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    let found = locator.locate("x.jpg", &[]).await;

    assert_eq!(found.as_deref(), Some("new/x.jpg"));
}

#[tokio::test]
async fn test_empty_basename_issues_no_listing() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("prop1/2.jpg");

    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());
    assert!(locator.locate("", &locator_seeds("prop1", None)).await.is_none());
    assert_eq!(storage.list_calls(), 0);
}

#[tokio::test]
async fn test_prefix_budget_stops_search() {
    let storage = SelfSimilarStorage {
        max_depth: 50,
        listed: Mutex::new(Vec::new()),
    };
    let config = LocatorConfig {
        list_limit: 1000,
        max_prefixes: 3,
    };

    let mut locator = BucketLocator::new(&storage, config);
    assert!(locator.locate("missing.jpg", &[]).await.is_none());
    assert_eq!(storage.listed.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_listings_shared_across_searches() {
    let storage = InMemoryBucketStorage::new(config());
    storage.insert("prop1/a.jpg");
    storage.insert("prop1/b.jpg");

    let seeds = locator_seeds("prop1", None);
    let mut locator = BucketLocator::new(&storage, LocatorConfig::default());

    assert_eq!(locator.locate("a.jpg", &seeds).await.as_deref(), Some("prop1/a.jpg"));
    assert_eq!(locator.locate("b.jpg", &seeds).await.as_deref(), Some("prop1/b.jpg"));
    assert_eq!(storage.list_calls(), 1);
}
