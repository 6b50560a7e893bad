//! Property row store abstraction.

use crate::{ImageRow, PropertyRecord};
use async_trait::async_trait;
use estate_error::{EstateResult, RepositoryError, RepositoryErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

/// A page of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Only properties owned by this user
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Rows to skip
    #[serde(default)]
    pub offset: usize,
    /// Maximum rows returned, unbounded when `None`
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PropertyQuery {
    /// Restricts the page to one owner.
    pub fn for_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Sets offset and limit.
    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// External store holding property rows and their image rows.
///
/// Implementations return rows in a stable order; the repository keeps
/// that order when attaching photos.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Fetch one property, `None` when it does not exist.
    async fn fetch_property(&self, id: &str) -> EstateResult<Option<PropertyRecord>>;

    /// Fetch a page of properties.
    async fn list_properties(&self, query: &PropertyQuery) -> EstateResult<Vec<PropertyRecord>>;

    /// Image rows for a property, in display order.
    async fn image_rows(&self, property_id: &str) -> EstateResult<Vec<ImageRow>>;
}

/// In-memory property store.
///
/// Properties keep insertion order. Image row lookups can be made to fail
/// per property.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    properties: RwLock<Vec<PropertyRecord>>,
    images: RwLock<HashMap<String, Vec<ImageRow>>>,
    failing_rows: RwLock<HashSet<String>>,
}

impl InMemoryPropertyStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property with its image rows, replacing any with the same id.
    pub async fn insert(&self, record: PropertyRecord, rows: Vec<ImageRow>) {
        let mut properties = self.properties.write().await;
        match properties.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => properties.push(record.clone()),
        }
        self.images.write().await.insert(record.id, rows);
    }

    /// Makes image row lookups for `property_id` fail.
    pub async fn fail_rows(&self, property_id: impl Into<String>) {
        self.failing_rows.write().await.insert(property_id.into());
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn fetch_property(&self, id: &str) -> EstateResult<Option<PropertyRecord>> {
        let properties = self.properties.read().await;
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn list_properties(&self, query: &PropertyQuery) -> EstateResult<Vec<PropertyRecord>> {
        let properties = self.properties.read().await;
        let matching = properties
            .iter()
            .filter(|p| match &query.owner_id {
                Some(owner) => p.owner_id.as_ref() == Some(owner),
                None => true,
            })
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn image_rows(&self, property_id: &str) -> EstateResult<Vec<ImageRow>> {
        if self.failing_rows.read().await.contains(property_id) {
            return Err(RepositoryError::new(RepositoryErrorKind::Query(format!(
                "image rows unavailable for {}",
                property_id
            )))
            .into());
        }
        let images = self.images.read().await;
        Ok(images.get(property_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> InMemoryPropertyStore {
        let store = InMemoryPropertyStore::new();
        for (id, owner) in [("p1", "o1"), ("p2", "o2"), ("p3", "o1"), ("p4", "o1")] {
            store
                .insert(PropertyRecord::new(id).with_owner(owner), Vec::new())
                .await;
        }
        store
    }

    fn ids(records: &[PropertyRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let store = store().await;

        let all = store.list_properties(&PropertyQuery::default()).await.unwrap();
        assert_eq!(ids(&all), ["p1", "p2", "p3", "p4"]);

        let query = PropertyQuery::default().for_owner("o1").page(1, 1);
        let page = store.list_properties(&query).await.unwrap();
        assert_eq!(ids(&page), ["p3"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_in_place() {
        let store = store().await;
        store
            .insert(PropertyRecord::new("p2").with_owner("o9"), vec![ImageRow::from_path("a.jpg")])
            .await;

        let all = store.list_properties(&PropertyQuery::default()).await.unwrap();
        assert_eq!(ids(&all), ["p1", "p2", "p3", "p4"]);
        assert_eq!(all[1].owner_id.as_deref(), Some("o9"));
        assert_eq!(store.image_rows("p2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_rows() {
        let store = store().await;
        store.fail_rows("p1").await;

        assert!(store.image_rows("p1").await.is_err());
        assert!(store.image_rows("p2").await.unwrap().is_empty());
        assert!(store.fetch_property("missing").await.unwrap().is_none());
    }
}
