//! Storage trait definition.

use crate::{ListOptions, StorageEntry};
use estate_error::EstateResult;

/// Read-only access to a single object storage bucket.
///
/// Implementations list folder contents and build public URLs. The bucket
/// is a shared, externally owned resource: nothing here mutates it, so two
/// resolutions of the same property may observe different bucket states.
#[async_trait::async_trait]
pub trait BucketStorage: Send + Sync {
    /// Name of the bucket this backend reads from.
    fn bucket(&self) -> &str;

    /// List the immediate children (files and folders) of a prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Bucket-relative folder path; the empty string is the root
    /// * `options` - Entry cap and sort order
    ///
    /// # Returns
    ///
    /// At most `options.limit` entries in the requested order. A prefix
    /// that does not exist lists as empty rather than failing.
    async fn list(&self, prefix: &str, options: &ListOptions) -> EstateResult<Vec<StorageEntry>>;

    /// Build the public URL for a bucket-relative path.
    ///
    /// Pure string construction. Does not check that the object exists.
    fn public_url(&self, path: &str) -> String;

    /// Check whether an object exists at a bucket-relative path.
    ///
    /// # Returns
    ///
    /// `true` if the object exists, `false` if the service reports it missing.
    /// Transport failures are errors so callers can tell "missing" from
    /// "unknown".
    async fn exists(&self, path: &str) -> EstateResult<bool>;
}
