// src/streaming/plugin.rs
use bevy::prelude::*;

use crate::manifest::ChunkManifest;
use crate::streaming::loader::ChunkManifestLoader;
use crate::streaming::systems::{update_wanted_chunks, WantedChunks};

/// Path of the manifest to stream, relative to the assets root.
pub const MANIFEST_PATH: &str = "maps/overworld.map.json";

/// Handle keeping the loaded manifest asset alive.
#[derive(Resource)]
pub struct ManifestHandle(pub Handle<ChunkManifest>);

pub struct MapStreamingPlugin;

impl Plugin for MapStreamingPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<ChunkManifest>()
            .register_asset_loader(ChunkManifestLoader)
            .init_resource::<WantedChunks>()
            .add_systems(Startup, load_manifest)
            .add_systems(Update, update_wanted_chunks);
    }
}

fn load_manifest(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle: Handle<ChunkManifest> = asset_server.load(MANIFEST_PATH);
    commands.insert_resource(ManifestHandle(handle));
    info!("Map streaming: queued manifest load from {MANIFEST_PATH}");
}
