//! Property image path resolution.
//!
//! Image references persisted for a property have drifted over time: full
//! public URLs, bucket-relative paths with and without the bucket name, bare
//! filenames, and legacy `public/` prefixes all coexist. This crate turns each
//! one into a renderable public URL by reconciling it against the bucket:
//!
//! 1. [`RawReference::classify`] normalizes the stored string into a tagged variant
//! 2. [`CandidatePaths::generate`] guesses bucket-relative paths in priority order
//! 3. [`ImageResolver`] probes candidates and, on a miss, asks [`BucketLocator`]
//!    to search the folder tree breadth-first for the basename
//! 4. Results are merged with legacy columns, deduplicated, and capped
//!
//! Resolution never fails. A reference that cannot be matched degrades to a
//! best-effort URL, and storage errors only reduce the number of images.
//!
//! # Example
//!
//! ```rust
//! use estate_resolver::{ImageResolver, ImageSources, ResolverConfig};
//! use estate_storage::{InMemoryBucketStorage, StorageConfig};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let storage = InMemoryBucketStorage::new(StorageConfig::new(
//!     "https://abc.supabase.co",
//!     "property-photos",
//! ));
//! storage.insert("owner9/prop1/kitchen.jpg");
//!
//! let resolver = ImageResolver::new(Arc::new(storage), ResolverConfig::default());
//! let sources = ImageSources::new("prop1")
//!     .with_owner_id(Some("owner9".to_string()))
//!     .with_rows(vec!["kitchen.jpg".to_string()]);
//!
//! let urls = resolver.resolve(&sources).await;
//! assert_eq!(
//!     urls,
//!     vec!["https://abc.supabase.co/storage/v1/object/public/property-photos/owner9/prop1/kitchen.jpg"]
//! );
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod candidates;
mod config;
mod locator;
mod reference;
mod resolver;

pub use candidates::CandidatePaths;
pub use config::{LocatorConfig, ResolverConfig, ResolverConfigBuilder, MAX_PHOTOS};
pub use locator::{locator_seeds, BucketLocator};
pub use reference::{normalize, RawReference};
pub use resolver::{ImageResolver, ImageSources, Resolution};

pub use estate_storage::PublicUrlBuilder;
