// src/manifest/description.rs
use serde::Deserialize;
use url::Url;

use super::error::ManifestError;

/// One chunk's resource location and its rectangle within the map.
///
/// Immutable once constructed; owned by the manifest's chunk table. `width`
/// and `height` are the chunk's *actual* extent — edge chunks may be smaller
/// than the manifest's base chunk size, and grid math never looks at them.
#[derive(Clone, Debug)]
pub struct ChunkDescription {
    pub resource_location: Url,
    /// Top-left corner in map units (y grows downward).
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Decoded (wire) form of one chunk-table entry.
#[derive(Clone, Debug, Deserialize)]
pub struct ChunkDescriptionRecord {
    #[serde(rename = "relativeURL")]
    pub relative_url: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ChunkDescription {
    pub fn new(resource_location: Url, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { resource_location, x, y, width, height }
    }

    /// Build from a decoded manifest entry. Fails if the resource-location
    /// string is not a parseable URL; no other field is validated.
    pub fn from_record(record: &ChunkDescriptionRecord) -> Result<Self, ManifestError> {
        let resource_location =
            Url::parse(&record.relative_url).map_err(|source| ManifestError::Decode {
                location: record.relative_url.clone(),
                source,
            })?;
        Ok(Self::new(resource_location, record.x, record.y, record.width, record.height))
    }
}
