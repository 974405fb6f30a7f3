use bevy::prelude::*;

mod input;
mod manifest;
mod setup;
mod streaming;

use input::camera_controller;
use streaming::MapStreamingPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // manifest asset + wanted-chunk polling
        .add_plugins(MapStreamingPlugin)
        // camera
        .add_systems(Startup, setup::setup)
        .add_systems(Update, camera_controller)
        .run();
}
