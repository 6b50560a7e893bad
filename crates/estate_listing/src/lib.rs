//! Property photo attachment.
//!
//! This crate is the boundary between the property row store and image
//! resolution. Listing pages, detail pages, and search results all fetch
//! properties through [`PropertyRepository`], which resolves each property's
//! stored image references and attaches the resulting URL list.
//!
//! # Features
//!
//! - **Tolerant rows**: image rows are read by whichever path column is filled
//! - **Legacy columns**: array-valued photo columns and cover images are merged
//! - **Bounded fan-out**: a page of properties resolves concurrently, with a
//!   cap on in-flight resolutions and results in query order
//!
//! # Example
//!
//! ```rust
//! use estate_listing::{InMemoryPropertyStore, ListingConfig, PropertyRecord, PropertyRepository};
//! use estate_resolver::{ImageResolver, ResolverConfig};
//! use estate_storage::{InMemoryBucketStorage, StorageConfig};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bucket = InMemoryBucketStorage::new(StorageConfig::new("https://abc.supabase.co", "property-photos"));
//! bucket.insert("prop1/cover.jpg");
//!
//! let store = InMemoryPropertyStore::new();
//! store.insert(PropertyRecord::new("prop1"), vec![json!({"storage_path": "cover.jpg"}).into()]).await;
//!
//! let resolver = ImageResolver::new(Arc::new(bucket), ResolverConfig::default());
//! let repo = PropertyRepository::new(Arc::new(store), resolver, ListingConfig::default());
//!
//! let property = repo.get_property("prop1").await?.expect("property exists");
//! assert_eq!(property.photos.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod property;
mod repository;
mod row;
mod store;

pub use config::ListingConfig;
pub use property::{COVER_FIELDS, OWNER_FIELDS, PropertyRecord, PropertyWithPhotos};
pub use repository::PropertyRepository;
pub use row::{ImageRow, REFERENCE_FIELDS};
pub use store::{InMemoryPropertyStore, PropertyQuery, PropertyStore};
