// src/streaming/loader.rs
//! Asset loader for `.map.json` manifest documents.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};

use crate::manifest::{ChunkManifest, ChunkManifestRecord, ManifestError};

#[derive(Default)]
pub struct ChunkManifestLoader;

#[derive(thiserror::Error, Debug)]
pub enum ManifestLoadError {
    #[error("I/O while reading manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl AssetLoader for ChunkManifestLoader {
    type Asset = ChunkManifest;
    type Settings = ();
    type Error = ManifestLoadError;

    fn extensions(&self) -> &[&str] {
        &["map.json"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let record: ChunkManifestRecord = serde_json::from_slice(&bytes)?;
        Ok(ChunkManifest::from_record(&record)?)
    }
}
