// src/manifest/error.rs
use url::ParseError;

/// Errors raised while constructing or decoding a chunk manifest.
///
/// All of these are fatal to the call that raises them; a manifest is never
/// partially valid.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// A map or base-chunk dimension was zero or negative.
    #[error("invalid map dimension: {field} = {value}")]
    InvalidDimension { field: &'static str, value: i64 },

    /// A key in the chunk table could not be parsed as an integer chunk id.
    #[error("chunk id '{key}' is not an integer")]
    MalformedKey { key: String },

    /// A resource-location string failed URL parsing.
    #[error("malformed resource location '{location}': {source}")]
    Decode { location: String, source: ParseError },
}
