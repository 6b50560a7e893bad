//! Property rows and their resolved form.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Columns naming the owner, in lookup order.
pub const OWNER_FIELDS: [&str; 3] = ["owner_id", "user_id", "agent_id"];

/// Columns naming the cover image, in lookup order.
pub const COVER_FIELDS: [&str; 2] = ["cover_image", "image_url"];

/// A property row from the row store.
///
/// Older rows name the owner column `user_id` or `agent_id`, store `photos`
/// as a JSON-encoded string, and use `image_url` for the cover. All of those
/// are accepted, and rows carrying several of them take the first filled
/// column in [`OWNER_FIELDS`] and [`COVER_FIELDS`] order. Columns the
/// resolver does not read are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PropertyRow")]
pub struct PropertyRecord {
    /// Property identifier
    pub id: String,

    /// Owning user or agent
    pub owner_id: Option<String>,

    /// Legacy photo column
    pub photos: Vec<String>,

    /// Legacy cover image column
    pub cover_image: Option<String>,

    /// Every other column
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Row as stored, before alias columns are resolved.
#[derive(Deserialize)]
struct PropertyRow {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "legacy_photos")]
    photos: Vec<String>,
    #[serde(flatten)]
    columns: Map<String, Value>,
}

impl From<PropertyRow> for PropertyRecord {
    fn from(row: PropertyRow) -> Self {
        let mut extra = row.columns;
        let owner_id = take_first(&mut extra, &OWNER_FIELDS, scalar_to_string);
        let cover_image = take_first(&mut extra, &COVER_FIELDS, |value| match value {
            Value::String(s) => Some(s),
            _ => None,
        });

        Self {
            id: row.id,
            owner_id,
            photos: row.photos,
            cover_image,
            extra,
        }
    }
}

/// Removes and returns the first non-blank value among `fields`.
///
/// The primary field is always removed so it cannot collide with the typed
/// field on serialization. Other alias columns that were not picked stay in
/// `columns`.
fn take_first(
    columns: &mut Map<String, Value>,
    fields: &[&str],
    convert: impl Fn(Value) -> Option<String>,
) -> Option<String> {
    let picked = fields.iter().find_map(|field| {
        columns
            .get(*field)
            .cloned()
            .and_then(&convert)
            .filter(|s| !s.trim().is_empty())
            .map(|value| (*field, value))
    });

    if let Some(primary) = fields.first() {
        columns.remove(*primary);
    }
    picked.map(|(field, value)| {
        columns.remove(field);
        value
    })
}

impl PropertyRecord {
    /// Record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the owner.
    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Sets the legacy photo column.
    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.photos = photos;
        self
    }

    /// Sets the legacy cover image.
    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }
}

/// A property with its image list resolved to public URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWithPhotos {
    /// The stored row
    pub property: PropertyRecord,
    /// Resolved URLs, at most the configured photo cap
    pub photos: Vec<String>,
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| serde::de::Error::custom("expected a string or number id"))
}

/// Accepts `null`, an array, or a string holding a JSON array.
///
/// A string that is not JSON is taken as a single path. Non-string array
/// items are dropped.
fn legacy_photos<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::Array(items)) => items,
            _ if encoded.trim().is_empty() => return Ok(Vec::new()),
            _ => return Ok(vec![encoded]),
        },
        Some(_) => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}
