//! Per-property image resolution.

use crate::{locator_seeds, BucketLocator, CandidatePaths, RawReference, ResolverConfig};
use derive_getters::Getters;
use derive_setters::Setters;
use estate_storage::BucketStorage;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

/// Everything stored about one property's images.
///
/// `rows` are the per-image table references in fetch order; `legacy_photos`
/// and `cover_image` come from columns on the property record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct ImageSources {
    /// Owning property
    property_id: String,
    /// Uploader or agent, when known
    owner_id: Option<String>,
    /// References from image rows, in fetch order
    rows: Vec<String>,
    /// Legacy array-valued photo column
    legacy_photos: Vec<String>,
    /// Legacy single cover image column
    cover_image: Option<String>,
}

impl ImageSources {
    /// Sources for a property with nothing attached yet.
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            ..Self::default()
        }
    }
}

/// How a single reference was turned into a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Resolution {
    /// A generated candidate path was accepted
    #[display("candidate")]
    Candidate,
    /// The bucket search found the basename
    #[display("located")]
    Located,
    /// The reference was already a URL outside the bucket
    #[display("external")]
    External,
    /// Nothing matched; the reference was used as stored
    #[display("fallback")]
    Fallback,
}

/// Ordered URL list with first-wins deduplication and a hard cap.
struct UrlList {
    urls: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl UrlList {
    fn new(cap: usize) -> Self {
        Self {
            urls: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    fn push(&mut self, url: String) {
        if !self.is_full() && self.seen.insert(url.clone()) {
            self.urls.push(url);
        }
    }

    fn is_full(&self) -> bool {
        self.urls.len() >= self.cap
    }
}

/// Resolves stored image references into public URLs.
///
/// Read-only and idempotent for a fixed bucket state. Never fails: storage
/// errors are logged and degrade to fewer (or best-effort) URLs.
#[derive(Clone)]
pub struct ImageResolver {
    storage: Arc<dyn BucketStorage>,
    config: ResolverConfig,
}

impl std::fmt::Debug for ImageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResolver")
            .field("bucket", &self.storage.bucket())
            .field("config", &self.config)
            .finish()
    }
}

impl ImageResolver {
    /// Create a resolver over a storage backend.
    pub fn new(storage: Arc<dyn BucketStorage>, config: ResolverConfig) -> Self {
        Self { storage, config }
    }

    /// Get the resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Get the storage backend.
    pub fn storage(&self) -> &Arc<dyn BucketStorage> {
        &self.storage
    }

    /// Resolve all images for one property.
    ///
    /// Rows are resolved in order, then legacy photos, then the cover image.
    /// The result holds no duplicates and at most `max_photos` entries, in
    /// first-resolved order.
    #[instrument(
        skip(self, sources),
        fields(
            property_id = %sources.property_id,
            rows = sources.rows.len(),
            legacy = sources.legacy_photos.len()
        )
    )]
    pub async fn resolve(&self, sources: &ImageSources) -> Vec<String> {
        let mut urls = UrlList::new(self.config.max_photos);
        let mut locator = BucketLocator::new(self.storage.as_ref(), self.config.locator);

        for raw in &sources.rows {
            if urls.is_full() {
                break;
            }
            if let Some((url, resolution)) = self.resolve_row(raw, sources, &mut locator).await {
                tracing::debug!(reference = %raw, %resolution, url = %url, "Resolved image row");
                urls.push(url);
            }
        }

        let legacy = sources
            .legacy_photos
            .iter()
            .chain(sources.cover_image.iter());
        for raw in legacy {
            if let Some(url) = self.column_url(raw) {
                urls.push(url);
            }
        }

        tracing::debug!(resolved = urls.urls.len(), "Resolved property images");
        urls.urls
    }

    /// Resolve one image row reference.
    ///
    /// Returns `None` only for references with nothing in them.
    async fn resolve_row(
        &self,
        raw: &str,
        sources: &ImageSources,
        locator: &mut BucketLocator<'_>,
    ) -> Option<(String, Resolution)> {
        let reference = RawReference::classify(raw, self.storage.bucket());
        let candidates = match &reference {
            RawReference::Empty => return None,
            RawReference::ExternalUrl(url) => return Some((url.clone(), Resolution::External)),
            other => CandidatePaths::generate(
                other,
                &sources.property_id,
                sources.owner_id.as_deref(),
            ),
        };

        if let Some(path) = self.accept_candidate(&candidates).await {
            return Some((self.storage.public_url(&path), Resolution::Candidate));
        }

        let seeds = locator_seeds(&sources.property_id, sources.owner_id.as_deref());
        if let Some(path) = locator.locate(reference.basename(), &seeds).await {
            return Some((self.storage.public_url(&path), Resolution::Located));
        }

        Some((self.fallback_url(&reference, &candidates, raw), Resolution::Fallback))
    }

    /// Pick the candidate to use, probing when verification is on.
    async fn accept_candidate(&self, candidates: &CandidatePaths) -> Option<String> {
        if !self.config.verify_candidates {
            return candidates.first().map(str::to_string);
        }

        for candidate in candidates.iter() {
            match self.storage.exists(candidate).await {
                Ok(true) => return Some(candidate.to_string()),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(candidate, error = %e, "Existence probe failed, trying next candidate");
                }
            }
        }
        None
    }

    /// Best-effort URL when neither candidates nor the search matched.
    fn fallback_url(&self, reference: &RawReference, candidates: &CandidatePaths, raw: &str) -> String {
        match (reference, candidates.first()) {
            (RawReference::AbsoluteUrl { url, .. }, _) => url.clone(),
            (_, Some(path)) => self.storage.public_url(path),
            (_, None) => raw.trim().to_string(),
        }
    }

    /// URL for a legacy column entry: normalized, never probed.
    fn column_url(&self, raw: &str) -> Option<String> {
        match RawReference::classify(raw, self.storage.bucket()) {
            RawReference::Empty => None,
            RawReference::ExternalUrl(url) => Some(url),
            reference if reference.path().is_empty() => None,
            reference => Some(self.storage.public_url(reference.path())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_list_dedups_and_caps() {
        let mut list = UrlList::new(2);
        list.push("a".to_string());
        list.push("a".to_string());
        list.push("b".to_string());
        list.push("c".to_string());
        assert_eq!(list.urls, vec!["a", "b"]);
        assert!(list.is_full());
    }

    #[test]
    fn test_sources_setters() {
        let sources = ImageSources::new("prop1")
            .with_owner_id(Some("owner9".to_string()))
            .with_cover_image(Some("cover.jpg".to_string()));
        assert_eq!(sources.property_id(), "prop1");
        assert_eq!(sources.owner_id().as_deref(), Some("owner9"));
        assert!(sources.rows().is_empty());
    }
}
