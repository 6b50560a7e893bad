//! Listing configuration.

use serde::{Deserialize, Serialize};

/// Settings for resolving a page of properties.
///
/// ```toml
/// [listing]
/// concurrency = 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Properties resolved at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    8
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}
