//! Attaches resolved photos to property rows.

use crate::{ImageRow, ListingConfig, PropertyQuery, PropertyRecord, PropertyStore, PropertyWithPhotos};
use estate_error::EstateResult;
use estate_resolver::{ImageResolver, ImageSources};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Property access with photo resolution.
///
/// Every read path goes through [`PropertyRepository::resolve_images`], so
/// listing, detail, and search pages show the same photos for a property.
#[derive(Clone)]
pub struct PropertyRepository {
    store: Arc<dyn PropertyStore>,
    resolver: ImageResolver,
    config: ListingConfig,
}

impl std::fmt::Debug for PropertyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyRepository")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PropertyRepository {
    /// Create a repository over a row store.
    pub fn new(store: Arc<dyn PropertyStore>, resolver: ImageResolver, config: ListingConfig) -> Self {
        Self {
            store,
            resolver,
            config,
        }
    }

    /// The resolver used for every property.
    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    /// Resolve a property's image references to public URLs.
    ///
    /// Rows come first in their stored order, then the legacy photo column,
    /// then the cover image. Rows without a reference column are skipped.
    pub async fn resolve_images(
        &self,
        property_id: &str,
        owner_id: Option<&str>,
        raw_rows: &[ImageRow],
        legacy_photos: &[String],
        cover_image: Option<&str>,
    ) -> Vec<String> {
        let rows: Vec<String> = raw_rows
            .iter()
            .filter_map(|row| row.reference().map(str::to_string))
            .collect();

        if rows.len() < raw_rows.len() {
            debug!(
                property_id,
                skipped = raw_rows.len() - rows.len(),
                "Image rows without a reference column"
            );
        }

        let sources = ImageSources::new(property_id)
            .with_owner_id(owner_id.map(str::to_string))
            .with_rows(rows)
            .with_legacy_photos(legacy_photos.to_vec())
            .with_cover_image(cover_image.map(str::to_string));

        self.resolver.resolve(&sources).await
    }

    /// Fetch one property with its photos attached.
    #[instrument(skip(self))]
    pub async fn get_property(&self, id: &str) -> EstateResult<Option<PropertyWithPhotos>> {
        match self.store.fetch_property(id).await? {
            Some(record) => Ok(Some(self.attach_photos(record).await)),
            None => Ok(None),
        }
    }

    /// Fetch a page of properties with photos attached.
    ///
    /// At most `concurrency` properties resolve at once. Output order
    /// matches the store's row order.
    #[instrument(skip(self), fields(concurrency = self.config.concurrency))]
    pub async fn list_properties(&self, query: &PropertyQuery) -> EstateResult<Vec<PropertyWithPhotos>> {
        let records = self.store.list_properties(query).await?;
        debug!(count = records.len(), "Resolving photos for page");

        let resolved = stream::iter(records)
            .map(|record| self.attach_photos(record))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        Ok(resolved)
    }

    async fn attach_photos(&self, property: PropertyRecord) -> PropertyWithPhotos {
        let rows = match self.store.image_rows(&property.id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(property_id = %property.id, error = %e, "Image rows unavailable, using legacy columns only");
                Vec::new()
            }
        };

        let photos = self
            .resolve_images(
                &property.id,
                property.owner_id.as_deref(),
                &rows,
                &property.photos,
                property.cover_image.as_deref(),
            )
            .await;

        PropertyWithPhotos { property, photos }
    }
}
