//! Tests for loading configuration files.

use estate::{EstateConfig, EstateErrorKind};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_file_overrides_defaults() {
    let file = write_config(
        r#"
        [storage]
        endpoint = "https://abc.supabase.co"
        bucket = "listing-media"
        api_key = "anon"

        [resolver]
        verify_candidates = false

        [listing]
        concurrency = 2
        "#,
    );

    let config = EstateConfig::from_file(file.path()).unwrap();

    assert_eq!(config.storage.endpoint, "https://abc.supabase.co");
    assert_eq!(config.storage.bucket, "listing-media");
    assert_eq!(config.storage.api_key.as_deref(), Some("anon"));
    assert!(!config.resolver.verify_candidates);
    assert_eq!(config.resolver.max_photos, 24);
    assert_eq!(config.listing.concurrency, 2);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = EstateConfig::from_file(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err.kind(), EstateErrorKind::Config(_)));
}

#[test]
fn test_bucket_with_slash_rejected() {
    let file = write_config("[storage]\nbucket = \"photos/2024\"\n");

    assert!(EstateConfig::from_file(file.path()).is_err());
}

#[test]
fn test_resolver_uses_configured_bucket() {
    let file = write_config("[storage]\nendpoint = \"https://abc.supabase.co/\"\n");
    let config = EstateConfig::from_file(file.path()).unwrap();

    let resolver = config.http_resolver().unwrap();

    assert_eq!(resolver.storage().bucket(), "property-photos");
    assert_eq!(
        resolver.storage().public_url("prop1/a b.jpg"),
        "https://abc.supabase.co/storage/v1/object/public/property-photos/prop1/a%20b.jpg"
    );
}
