//! Object storage bucket access for Estate.
//!
//! This crate provides the read-only view of the property-photo bucket that
//! image resolution depends on. The abstraction separates *where* a file lives
//! (a bucket-relative path) from *how* it is reached (a public URL), and never
//! writes, moves, or deletes objects.
//!
//! # Features
//!
//! - **Pluggable backends**: Trait-based abstraction over the storage service
//! - **Deterministic URLs**: Public URLs are built from configuration, no I/O
//! - **In-memory fake**: A bucket tree for tests and offline dry runs
//!
//! # Example
//!
//! ```rust
//! use estate_storage::{BucketStorage, InMemoryBucketStorage, ListOptions, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::new("https://abc.supabase.co", "property-photos");
//! let storage = InMemoryBucketStorage::new(config);
//! storage.insert("prop1/cover.jpg");
//!
//! let entries = storage.list("prop1", &ListOptions::default()).await?;
//! assert_eq!(entries.len(), 1);
//! assert_eq!(
//!     storage.public_url("prop1/cover.jpg"),
//!     "https://abc.supabase.co/storage/v1/object/public/property-photos/prop1/cover.jpg"
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entry;
mod http;
mod memory;
mod storage;
mod url;

pub use config::StorageConfig;
pub use entry::{EntryKind, ListOptions, SortOrder, StorageEntry};
pub use estate_error::{StorageError, StorageErrorKind};
pub use http::HttpBucketStorage;
pub use memory::InMemoryBucketStorage;
pub use storage::BucketStorage;
pub use url::{PublicUrlBuilder, PUBLIC_OBJECT_PATH};
