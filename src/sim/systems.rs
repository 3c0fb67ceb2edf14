use hecs::World;

use super::{HitFlash, Intent};
use crate::world::{Camera, WorldGrid};

/// Movement rates, already in cells / radians per second.
#[derive(Clone, Copy, Debug)]
pub struct Rates {
    pub move_speed: f32,
    pub turn_speed: f32,
}

/// Apply buffered intents to the camera for a frame of `dt` seconds.
///
/// Rotation happens first so forward motion follows the new heading.
/// `ROTATE_LEFT` turns towards −Y (screen left when rows grow downwards).
pub fn player_input(camera: &mut Camera, grid: &WorldGrid, intent: Intent, rates: Rates, dt: f32) {
    let mut turn = 0.0;
    if intent.contains(Intent::ROTATE_LEFT) {
        turn -= 1.0;
    }
    if intent.contains(Intent::ROTATE_RIGHT) {
        turn += 1.0;
    }
    if turn != 0.0 {
        camera.rotate(turn * rates.turn_speed * dt);
    }

    let delta = rates.move_speed * dt;
    if intent.contains(Intent::FORWARD) {
        camera.try_move_forward(grid, delta);
    }
    if intent.contains(Intent::BACKWARD) {
        camera.try_move_backward(grid, delta);
    }
}

/// Count every hit flicker down by one frame, visible or not.
pub fn hit_flash(world: &mut World) {
    for (_, flash) in world.query_mut::<&mut HitFlash>() {
        flash.0 = flash.0.saturating_sub(1);
    }
}
