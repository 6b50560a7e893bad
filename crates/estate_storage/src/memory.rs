//! In-memory bucket backend.
//!
//! Holds a flat set of object paths and synthesizes folder listings from
//! their shared prefixes, the same way object storage presents "folders".

use crate::{BucketStorage, ListOptions, PublicUrlBuilder, StorageConfig, StorageEntry};
use chrono::{DateTime, Utc};
use estate_error::{EstateResult, StorageError, StorageErrorKind};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Bucket backend backed by an in-process object map.
///
/// Besides serving listings it records every listed prefix and can be told
/// to fail listings for chosen prefixes, which makes it the fake backend for
/// resolver tests.
#[derive(Debug)]
pub struct InMemoryBucketStorage {
    config: StorageConfig,
    urls: PublicUrlBuilder,
    objects: RwLock<BTreeMap<String, Option<DateTime<Utc>>>>,
    failing_prefixes: RwLock<HashSet<String>>,
    listed: RwLock<Vec<String>>,
    probes: AtomicUsize,
}

impl InMemoryBucketStorage {
    /// Create an empty bucket.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            urls: PublicUrlBuilder::new(&config),
            config,
            objects: RwLock::new(BTreeMap::new()),
            failing_prefixes: RwLock::new(HashSet::new()),
            listed: RwLock::new(Vec::new()),
            probes: AtomicUsize::new(0),
        }
    }

    /// Add an object without a modification time.
    pub fn insert(&self, path: &str) {
        self.insert_at(path, None);
    }

    /// Add an object with a modification time.
    pub fn insert_at(&self, path: &str, updated_at: Option<DateTime<Utc>>) {
        let key = clean_path(path);
        if key.is_empty() {
            return;
        }
        if let Ok(mut objects) = self.objects.write() {
            objects.insert(key, updated_at);
        }
    }

    /// Make every listing of `prefix` fail with an unavailable error.
    pub fn fail_prefix(&self, prefix: &str) {
        if let Ok(mut failing) = self.failing_prefixes.write() {
            failing.insert(clean_path(prefix));
        }
    }

    /// Prefixes listed so far, in call order.
    pub fn listed_prefixes(&self) -> Vec<String> {
        self.listed.read().map(|l| l.clone()).unwrap_or_default()
    }

    /// Number of listing calls served (including failed ones).
    pub fn list_calls(&self) -> usize {
        self.listed.read().map(|l| l.len()).unwrap_or_default()
    }

    /// Number of existence probes served.
    pub fn probe_calls(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }

    fn poisoned(what: &str) -> StorageError {
        StorageError::new(StorageErrorKind::Unavailable(format!("{} lock poisoned", what)))
    }
}

fn clean_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait::async_trait]
impl BucketStorage for InMemoryBucketStorage {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn list(&self, prefix: &str, options: &ListOptions) -> EstateResult<Vec<StorageEntry>> {
        let prefix = clean_path(prefix);
        self.listed
            .write()
            .map_err(|_| Self::poisoned("listing log"))?
            .push(prefix.clone());

        let failing = self
            .failing_prefixes
            .read()
            .map_err(|_| Self::poisoned("failure set"))?
            .contains(&prefix);
        if failing {
            return Err(StorageError::new(StorageErrorKind::ListFailed {
                prefix,
                reason: "injected failure".to_string(),
            })
            .into());
        }

        let objects = self.objects.read().map_err(|_| Self::poisoned("object map"))?;
        let mut files = Vec::new();
        // Folder name -> newest timestamp beneath it
        let mut folders: HashMap<String, Option<DateTime<Utc>>> = HashMap::new();

        for (path, updated_at) in objects.iter() {
            let rest = if prefix.is_empty() {
                path.as_str()
            } else {
                match path
                    .strip_prefix(prefix.as_str())
                    .and_then(|r| r.strip_prefix('/'))
                {
                    Some(rest) => rest,
                    None => continue,
                }
            };

            match rest.split_once('/') {
                Some((folder, _)) => {
                    let newest = folders.entry(folder.to_string()).or_insert(None);
                    if *updated_at > *newest {
                        *newest = *updated_at;
                    }
                }
                None => files.push(StorageEntry::file(rest, *updated_at)),
            }
        }

        let mut entries: Vec<StorageEntry> = folders
            .into_iter()
            .map(|(name, updated_at)| StorageEntry {
                updated_at,
                ..StorageEntry::folder(name)
            })
            .chain(files)
            .collect();
        options.sort_entries(&mut entries);
        entries.truncate(options.limit);
        Ok(entries)
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.build(path)
    }

    async fn exists(&self, path: &str) -> EstateResult<bool> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let objects = self.objects.read().map_err(|_| Self::poisoned("object map"))?;
        Ok(objects.contains_key(&clean_path(path)))
    }
}
