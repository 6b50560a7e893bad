//! Property documents: a property row with its image rows inline.
//!
//! ```json
//! {
//!   "id": "prop1",
//!   "owner_id": "owner9",
//!   "photos": ["prop1/legacy.jpg"],
//!   "images": [{"storage_path": "prop1/cover.jpg"}, {"url": "2.jpg"}]
//! }
//! ```
//!
//! A file holds one document or an array of them.

use estate_error::{EstateResult, JsonError};
use estate_listing::{ImageRow, InMemoryPropertyStore, PropertyRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A property row plus its image rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDocument {
    /// Image rows in display order
    #[serde(default)]
    pub images: Vec<ImageRow>,
    /// The property row
    #[serde(flatten)]
    pub property: PropertyRecord,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Many(Vec<PropertyDocument>),
    One(Box<PropertyDocument>),
}

impl PropertyDocument {
    /// Parse one document or an array of documents.
    pub fn parse_all(json: &str) -> EstateResult<Vec<Self>> {
        let file: DocumentFile = serde_json::from_str(json)
            .map_err(|e| JsonError::new(format!("Invalid property document: {}", e)))?;
        Ok(match file {
            DocumentFile::Many(documents) => documents,
            DocumentFile::One(document) => vec![*document],
        })
    }

    /// Read and parse a document file.
    pub fn read_all(path: impl AsRef<Path>) -> EstateResult<Vec<Self>> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            JsonError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_all(&json)
    }

    /// Load documents into an in-memory store, keeping their order.
    pub async fn into_store(documents: Vec<Self>) -> InMemoryPropertyStore {
        let store = InMemoryPropertyStore::new();
        for document in documents {
            store.insert(document.property, document.images).await;
        }
        store
    }
}
