use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::setup::MainCamera;

pub const PAN_SPEED: f32 = 400.0;
pub const MAX_CAMERA_DT: f32 = 0.05; // never use a dt larger than 50ms

pub fn camera_controller(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut query: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    // 0) Clamp delta
    let mut dt = time.delta_secs();
    if dt > MAX_CAMERA_DT {
        dt = MAX_CAMERA_DT;
    }

    let Ok((mut tf, mut projection)) = query.single_mut() else { return; };

    // 1) Pan (y-down map space: W moves toward smaller y)
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) { dir.y -= 1.0; }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) { dir.y += 1.0; }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) { dir.x -= 1.0; }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) { dir.x += 1.0; }

    if dir != Vec2::ZERO {
        let delta = dir.normalize() * PAN_SPEED * dt;
        tf.translation.x += delta.x;
        tf.translation.y += delta.y;
    }

    // 2) Zoom
    if let Projection::Orthographic(ortho) = projection.as_mut() {
        for ev in scroll_evr.read() {
            let amount = match ev.unit {
                MouseScrollUnit::Line => ev.y * 0.1,
                MouseScrollUnit::Pixel => ev.y * 0.002,
            };
            ortho.scale = (ortho.scale * (1.0 - amount)).clamp(0.25, 8.0);
        }
    }
}
