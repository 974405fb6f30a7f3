// src/streaming/systems.rs
use std::collections::HashSet;

use bevy::prelude::*;

use crate::manifest::ChunkManifest;
use crate::setup::MainCamera;
use crate::streaming::plugin::ManifestHandle;

/// Latest wanted-chunk computation, published for whatever consumes it.
///
/// This crate only *computes* the set; correlating it against loaded
/// entities and issuing spawns/despawns is the consumer's job.
#[derive(Resource, Default)]
pub struct WantedChunks {
    /// Chunk ids the current view wants present (margin included).
    pub indices: HashSet<i64>,
    /// World view the indices were computed from.
    pub last_world_view: Option<Rect>,
}

/// Poll the main camera once per frame and recompute the wanted set when
/// the world view changed since the last frame.
pub fn update_wanted_chunks(
    manifests: Res<Assets<ChunkManifest>>,
    handle: Option<Res<ManifestHandle>>,
    mut wanted: ResMut<WantedChunks>,
    cam_q: Query<(&Projection, &GlobalTransform), With<MainCamera>>,
) {
    let Some(handle) = handle else { return };
    let Some(manifest) = manifests.get(&handle.0) else { return };
    let Ok((projection, cam_tf)) = cam_q.single() else { return };
    let Some(view) = world_view(projection, cam_tf) else { return };

    if wanted.last_world_view == Some(view) {
        return;
    }
    wanted.last_world_view = Some(view);

    wanted.indices = manifest.chunk_indices_from_view(view);
    debug!(
        "view ({:.0},{:.0})..({:.0},{:.0}) wants {} chunks",
        view.min.x,
        view.min.y,
        view.max.x,
        view.max.y,
        wanted.indices.len()
    );
}

/// World-space view rectangle of a 2D (orthographic) camera.
fn world_view(projection: &Projection, cam_tf: &GlobalTransform) -> Option<Rect> {
    let Projection::Orthographic(ortho) = projection else {
        return None;
    };
    let center = cam_tf.translation().truncate() + ortho.area.center();
    Some(Rect::from_center_size(center, ortho.area.size()))
}
