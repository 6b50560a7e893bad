//! Estate - Property Image Path Resolution
//!
//! Property photos were uploaded over several generations of the listing
//! platform, so the stored references come in many shapes: full public
//! URLs, signed URLs, bucket-relative paths with or without the bucket
//! name, and bare filenames. Estate turns each of them into a public URL
//! that points at an object that exists, or drops it.
//!
//! # Features
//!
//! - **Normalization**: URL and path forms reduce to one bucket-relative path
//! - **Candidates**: ordered guesses built from the property and owner ids
//! - **Verification**: candidates are HEAD-checked before they are accepted
//! - **Bucket search**: a bounded breadth-first walk when every guess misses
//! - **Listings**: pages of properties resolve concurrently, in order
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use estate::{EstateConfig, PropertyDocument};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EstateConfig::load()?;
//!     let documents = PropertyDocument::read_all("property.json")?;
//!     let store = PropertyDocument::into_store(documents).await;
//!
//!     let repo = config.repository(Arc::new(store))?;
//!     if let Some(property) = repo.get_property("prop1").await? {
//!         for url in &property.photos {
//!             println!("{}", url);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `estate_error` - Error types
//! - `estate_storage` - Bucket listing, existence probes, and public URLs
//! - `estate_resolver` - Normalization, candidates, bucket search, aggregation
//! - `estate_listing` - Property rows and photo attachment
//!
//! This crate re-exports everything for convenience and adds layered
//! configuration.

mod config;
mod document;

pub use config::EstateConfig;
pub use document::PropertyDocument;

pub use estate_error::*;
pub use estate_listing::{
    ImageRow, InMemoryPropertyStore, ListingConfig, PropertyQuery, PropertyRecord,
    PropertyRepository, PropertyStore, PropertyWithPhotos, REFERENCE_FIELDS,
};
pub use estate_resolver::{
    BucketLocator, CandidatePaths, ImageResolver, ImageSources, LocatorConfig, MAX_PHOTOS,
    RawReference, Resolution, ResolverConfig, ResolverConfigBuilder, locator_seeds, normalize,
};
pub use estate_storage::{
    BucketStorage, EntryKind, HttpBucketStorage, InMemoryBucketStorage, ListOptions,
    PUBLIC_OBJECT_PATH, PublicUrlBuilder, SortOrder, StorageConfig, StorageEntry,
};
