//! Image rows as stored by different generations of the upload path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Columns that may hold an image reference, in lookup order.
pub const REFERENCE_FIELDS: [&str; 6] =
    ["storage_path", "path", "file_path", "url", "image_url", "name"];

/// One row from the property images table.
///
/// The column holding the reference has changed over time, so the row keeps
/// every column and [`ImageRow::reference`] picks the first filled one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRow(Map<String, Value>);

impl ImageRow {
    /// Row with a single `storage_path` column.
    pub fn from_path(path: impl Into<String>) -> Self {
        let mut columns = Map::new();
        columns.insert("storage_path".to_string(), Value::String(path.into()));
        Self(columns)
    }

    /// First non-empty string among [`REFERENCE_FIELDS`].
    pub fn reference(&self) -> Option<&str> {
        REFERENCE_FIELDS.iter().find_map(|field| {
            self.0
                .get(*field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
    }

    /// Raw column value.
    pub fn column(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Value> for ImageRow {
    /// Non-object values become an empty row.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(columns) => Self(columns),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for ImageRow {
    fn from(columns: Map<String, Value>) -> Self {
        Self(columns)
    }
}
