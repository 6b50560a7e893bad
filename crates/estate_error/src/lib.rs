//! Error types for the Estate image resolution engine.
//!
//! Every crate in the workspace reports failures through the types defined here.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Image resolution itself never fails; these errors surface from the
//! storage backends, the property row store, and configuration loading.
//!
//! # Examples
//!
//! ```
//! use estate_error::{EstateResult, StorageError, StorageErrorKind};
//!
//! fn list_bucket() -> EstateResult<Vec<String>> {
//!     Err(StorageError::new(StorageErrorKind::Unavailable("timeout".into())))?
//! }
//!
//! match list_bucket() {
//!     Ok(entries) => println!("Got {} entries", entries.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod json;
mod repository;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{EstateError, EstateErrorKind, EstateResult};
pub use http::HttpError;
pub use json::JsonError;
pub use repository::{RepositoryError, RepositoryErrorKind};
pub use storage::{StorageError, StorageErrorKind};
