//! Resolve photos for properties read from a document file.

use estate::{EstateConfig, EstateResult, JsonError, PropertyDocument, PropertyQuery};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Resolve every property in `path` against the configured bucket.
///
/// Prints one URL per line, a blank line between properties, or the
/// properties with photos as JSON.
pub async fn resolve_document(config: &EstateConfig, path: &Path, json: bool) -> EstateResult<()> {
    let documents = PropertyDocument::read_all(path)?;
    info!(count = documents.len(), bucket = %config.storage.bucket, "Resolving property photos");

    let store = PropertyDocument::into_store(documents).await;
    let repo = config.repository(Arc::new(store))?;
    let properties = repo.list_properties(&PropertyQuery::default()).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&properties)
            .map_err(|e| JsonError::new(e.to_string()))?;
        println!("{}", rendered);
        return Ok(());
    }

    for (i, property) in properties.iter().enumerate() {
        if properties.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("# {}", property.property.id);
        }
        for url in &property.photos {
            println!("{}", url);
        }
    }

    Ok(())
}
