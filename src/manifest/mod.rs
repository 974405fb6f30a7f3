mod chunk_manifest;
mod description;
mod error;

// Re-export the manifest types; the rest of the crate never needs the
// submodule paths.
pub use chunk_manifest::{ChunkManifest, ChunkManifestRecord};
pub use description::{ChunkDescription, ChunkDescriptionRecord};
pub use error::ManifestError;
