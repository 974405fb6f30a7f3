mod loader;
mod plugin;
mod systems;

pub use loader::{ChunkManifestLoader, ManifestLoadError};
pub use plugin::{ManifestHandle, MapStreamingPlugin, MANIFEST_PATH};
pub use systems::WantedChunks;
