//! Breadth-first basename search over the bucket's folder tree.

use crate::LocatorConfig;
use estate_storage::{BucketStorage, StorageEntry};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::instrument;

/// Seed prefixes for a property: the property folder, the owner folder, and
/// the nested `owner/property` folder. Blank identifiers are skipped.
pub fn locator_seeds(property_id: &str, owner_id: Option<&str>) -> Vec<String> {
    let property = property_id.trim();
    let owner = owner_id.map(str::trim).unwrap_or_default();

    let mut seeds = Vec::with_capacity(3);
    if !property.is_empty() {
        seeds.push(property.to_string());
    }
    if !owner.is_empty() {
        seeds.push(owner.to_string());
        if !property.is_empty() {
            seeds.push(format!("{}/{}", owner, property));
        }
    }
    seeds
}

/// Finds a file by basename when no candidate path matched.
///
/// The bucket is treated as an unweighted folder tree. Seed prefixes are
/// searched first, then the bucket root. Each prefix is listed at most once
/// per search; listings are newest first, so among siblings of one listing
/// the most recently modified match wins.
///
/// A locator lives for one property resolution. Listings are kept for that
/// lifetime so several references searching the same folders share calls.
pub struct BucketLocator<'a> {
    storage: &'a dyn BucketStorage,
    config: LocatorConfig,
    listings: HashMap<String, Vec<StorageEntry>>,
    last_visited: Vec<String>,
}

impl<'a> BucketLocator<'a> {
    /// Create a locator over a storage backend.
    pub fn new(storage: &'a dyn BucketStorage, config: LocatorConfig) -> Self {
        Self {
            storage,
            config,
            listings: HashMap::new(),
            last_visited: Vec::new(),
        }
    }

    /// Prefixes visited by the most recent search, in visit order.
    pub fn visited(&self) -> &[String] {
        &self.last_visited
    }

    /// Search for a file named `basename`.
    ///
    /// # Returns
    ///
    /// The bucket-relative path of the first match, or `None` when every
    /// reachable prefix was searched (or the prefix budget ran out).
    /// Listing failures count as empty folders.
    #[instrument(skip(self, seeds), fields(seed_count = seeds.len()))]
    pub async fn locate(&mut self, basename: &str, seeds: &[String]) -> Option<String> {
        self.last_visited.clear();
        let basename = basename.trim_matches('/');
        if basename.is_empty() {
            return None;
        }

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut queued: HashSet<String> = HashSet::new();
        let roots = seeds
            .iter()
            .map(|seed| clean_prefix(seed))
            .filter(|seed| !seed.is_empty())
            .chain(std::iter::once(String::new()));
        for prefix in roots {
            if queued.insert(prefix.clone()) {
                queue.push_back(prefix);
            }
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut found = None;

        while let Some(prefix) = queue.pop_front() {
            if !visited.insert(prefix.clone()) {
                continue;
            }
            if visited.len() > self.config.max_prefixes {
                tracing::warn!(
                    basename,
                    max_prefixes = self.config.max_prefixes,
                    "Bucket search budget exhausted"
                );
                break;
            }
            self.last_visited.push(prefix.clone());

            for entry in self.listing(&prefix).await {
                let path = child_path(&prefix, &entry.name);
                if entry.is_folder() {
                    if !visited.contains(&path) && queued.insert(path.clone()) {
                        queue.push_back(path);
                    }
                } else if entry.name == basename {
                    found = Some(path);
                    break;
                }
            }
            if found.is_some() {
                break;
            }
        }

        tracing::debug!(
            basename,
            visited = self.last_visited.len(),
            found = found.as_deref().unwrap_or(""),
            "Bucket search finished"
        );
        found
    }

    /// List a prefix once per locator lifetime.
    async fn listing(&mut self, prefix: &str) -> Vec<StorageEntry> {
        if let Some(entries) = self.listings.get(prefix) {
            return entries.clone();
        }

        let entries = match self
            .storage
            .list(prefix, &self.config.list_options())
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(prefix, error = %e, "Listing failed, treating prefix as empty");
                Vec::new()
            }
        };
        self.listings.insert(prefix.to_string(), entries.clone());
        entries
    }
}

fn clean_prefix(prefix: &str) -> String {
    prefix
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn child_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_with_owner() {
        assert_eq!(
            locator_seeds("prop1", Some("owner9")),
            vec!["prop1", "owner9", "owner9/prop1"]
        );
    }

    #[test]
    fn test_seeds_without_owner() {
        assert_eq!(locator_seeds("prop1", None), vec!["prop1"]);
        assert_eq!(locator_seeds(" ", Some("owner9")), vec!["owner9"]);
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("", "a.jpg"), "a.jpg");
        assert_eq!(child_path("prop1", "a.jpg"), "prop1/a.jpg");
    }
}
