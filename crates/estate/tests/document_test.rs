//! Tests for property documents and end-to-end photo resolution.

use estate::{
    ImageResolver, InMemoryBucketStorage, ListingConfig, PropertyDocument, PropertyQuery,
    PropertyRepository, ResolverConfig, StorageConfig,
};
use std::sync::Arc;

const LISTING: &str = r#"[
  {
    "id": "prop1",
    "owner_id": "owner9",
    "title": "Harbor loft",
    "images": [
      {"storage_path": "prop1/cover.jpg"},
      {"url": "https://host/storage/v1/object/public/property-photos/owner9/prop1/2.jpg"},
      {"name": "2.jpg"}
    ]
  },
  {
    "id": 2,
    "user_id": "owner4",
    "photos": "[\"https://images.example.com/legacy.jpg\"]",
    "image_url": "property-photos/2/front.jpg"
  }
]"#;

fn public(path: &str) -> String {
    format!(
        "https://abc.supabase.co/storage/v1/object/public/property-photos/{}",
        path
    )
}

#[test]
fn test_parse_array_and_single() {
    let many = PropertyDocument::parse_all(LISTING).unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[0].images.len(), 3);
    assert_eq!(many[0].property.extra.get("title").and_then(|v| v.as_str()), Some("Harbor loft"));
    assert!(!many[0].property.extra.contains_key("images"));
    assert_eq!(many[1].property.id, "2");
    assert_eq!(many[1].property.owner_id.as_deref(), Some("owner4"));

    let one = PropertyDocument::parse_all(r#"{"id": "solo"}"#).unwrap();
    assert_eq!(one.len(), 1);
    assert!(one[0].images.is_empty());
}

#[test]
fn test_invalid_document_rejected() {
    assert!(PropertyDocument::parse_all("not json").is_err());
    assert!(PropertyDocument::parse_all(r#"{"images": []}"#).is_err());
}

#[test]
fn test_read_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(PropertyDocument::read_all(dir.path().join("none.json")).is_err());
}

#[tokio::test]
async fn test_listing_document_resolves_in_order() {
    let bucket = InMemoryBucketStorage::new(StorageConfig::new(
        "https://abc.supabase.co",
        "property-photos",
    ));
    bucket.insert("prop1/cover.jpg");
    bucket.insert("owner9/prop1/2.jpg");

    let documents = PropertyDocument::parse_all(LISTING).unwrap();
    let store = PropertyDocument::into_store(documents).await;
    let repo = PropertyRepository::new(
        Arc::new(store),
        ImageResolver::new(Arc::new(bucket), ResolverConfig::default()),
        ListingConfig::default(),
    );

    let page = repo.list_properties(&PropertyQuery::default()).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(
        page[0].photos,
        vec![public("prop1/cover.jpg"), public("owner9/prop1/2.jpg")]
    );
    assert_eq!(
        page[1].photos,
        vec![
            "https://images.example.com/legacy.jpg".to_string(),
            public("2/front.jpg"),
        ]
    );
}
