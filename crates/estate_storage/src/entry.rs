//! Listing entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default cap on entries returned by a single listing call.
pub const DEFAULT_LIST_LIMIT: usize = 1000;

/// Type of a listed bucket entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A stored object
    #[display("file")]
    File,
    /// A virtual folder (a shared path prefix)
    #[display("folder")]
    Folder,
}

/// One child of a listed prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    /// Final path segment of the entry
    pub name: String,
    /// Whether the entry is a file or a folder
    pub kind: EntryKind,
    /// Last modification time, when the backend reports one
    pub updated_at: Option<DateTime<Utc>>,
}

impl StorageEntry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            updated_at,
        }
    }

    /// Create a folder entry.
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Folder,
            updated_at: None,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Sort order requested from a listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Most recently updated first; entries without a timestamp last
    #[default]
    UpdatedAtDesc,
    /// Lexicographic by name
    NameAsc,
}

/// Options for a single listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListOptions {
    /// Maximum number of entries to return
    pub limit: usize,
    /// Requested ordering
    pub sort: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            sort: SortOrder::UpdatedAtDesc,
        }
    }
}

impl ListOptions {
    /// Sort entries in place according to this option set.
    ///
    /// Ties fall back to name order so listings are stable.
    pub fn sort_entries(&self, entries: &mut [StorageEntry]) {
        match self.sort {
            SortOrder::UpdatedAtDesc => entries.sort_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::NameAsc => entries.sort_by(|a, b| a.name.cmp(&b.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strum::IntoEnumIterator;

    #[test]
    fn test_updated_desc_puts_undated_last() {
        let old = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut entries = vec![
            StorageEntry::folder("dir"),
            StorageEntry::file("old.jpg", Some(old)),
            StorageEntry::file("new.jpg", Some(new)),
        ];

        ListOptions::default().sort_entries(&mut entries);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["new.jpg", "old.jpg", "dir"]);
    }

    #[test]
    fn test_entry_kind_display() {
        assert_eq!(EntryKind::File.to_string(), "file");
        assert_eq!(EntryKind::Folder.to_string(), "folder");
    }

    #[test]
    fn test_entry_kind_display_matches_wire_name() {
        for kind in EntryKind::iter() {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, serde_json::Value::String(kind.to_string()));
            assert_eq!(serde_json::from_value::<EntryKind>(wire).unwrap(), kind);
        }
        assert_eq!(EntryKind::iter().count(), 2);
    }
}
