use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn setup(mut commands: Commands) {
    // 2D camera over the map. Map coordinates are y-down, so the controller
    // and the streaming systems both treat +y as "further down the map".
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0),
        MainCamera,
    ));
}
