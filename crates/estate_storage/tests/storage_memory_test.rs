//! Tests for the in-memory bucket backend.

use chrono::{TimeZone, Utc};
use estate_storage::{
    BucketStorage, EntryKind, InMemoryBucketStorage, ListOptions, SortOrder, StorageConfig,
};

fn storage() -> InMemoryBucketStorage {
    InMemoryBucketStorage::new(StorageConfig::new(
        "https://abc.supabase.co",
        "property-photos",
    ))
}

#[tokio::test]
async fn test_list_root_synthesizes_folders() {
    let storage = storage();
    storage.insert("prop1/a.jpg");
    storage.insert("prop1/b.jpg");
    storage.insert("owner9/prop1/c.jpg");
    storage.insert("loose.jpg");

    let mut entries = storage.list("", &ListOptions::default()).await.unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let summary: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("loose.jpg", EntryKind::File),
            ("owner9", EntryKind::Folder),
            ("prop1", EntryKind::Folder),
        ]
    );
}

#[tokio::test]
async fn test_list_nested_prefix() {
    let storage = storage();
    storage.insert("owner9/prop1/c.jpg");
    storage.insert("owner9/prop1/2024/d.jpg");

    let entries = storage
        .list("/owner9/prop1/", &ListOptions::default())
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.name == "c.jpg" && !e.is_folder()));
    assert!(entries.iter().any(|e| e.name == "2024" && e.is_folder()));
}

#[tokio::test]
async fn test_list_missing_prefix_is_empty() {
    let storage = storage();
    storage.insert("prop1/a.jpg");

    let entries = storage.list("nope", &ListOptions::default()).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_list_sorts_newest_first_and_caps() {
    let storage = storage();
    storage.insert_at("p/old.jpg", Some(Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap()));
    storage.insert_at("p/new.jpg", Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()));
    storage.insert_at("p/mid.jpg", Some(Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap()));

    let options = ListOptions {
        limit: 2,
        sort: SortOrder::UpdatedAtDesc,
    };
    let entries = storage.list("p", &options).await.unwrap();

    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["new.jpg", "mid.jpg"]);
}

#[tokio::test]
async fn test_injected_failure_and_call_log() {
    let storage = storage();
    storage.insert("prop1/a.jpg");
    storage.fail_prefix("prop1");

    let result = storage.list("prop1", &ListOptions::default()).await;
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err().kind(),
        estate_error::EstateErrorKind::Storage(_)
    ));

    storage.list("", &ListOptions::default()).await.unwrap();
    assert_eq!(storage.listed_prefixes(), vec!["prop1".to_string(), String::new()]);
    assert_eq!(storage.list_calls(), 2);
}

#[tokio::test]
async fn test_exists() {
    let storage = storage();
    storage.insert("prop1/a.jpg");

    assert!(storage.exists("prop1/a.jpg").await.unwrap());
    assert!(storage.exists("/prop1/a.jpg").await.unwrap());
    assert!(!storage.exists("prop1/b.jpg").await.unwrap());
    assert_eq!(storage.probe_calls(), 3);
}
