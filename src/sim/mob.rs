use super::{Enemy, HitFlash, Position, Vitals};
use glam::Vec2;
use hecs::World;

pub fn spawn_enemy(world: &mut World, pos: Vec2, health: i32) -> hecs::Entity {
    world.spawn((Enemy, Position(pos), Vitals::new(health), HitFlash::default()))
}
