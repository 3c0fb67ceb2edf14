use glam::Vec2;
use hecs::World;

use crate::{
    renderer::Shading,
    sim::{CombatConfig, Rates, spawn_enemy},
    world::{Camera, MapError, MapLoad, WorldGrid},
};

/// Everything tunable about a session. Built once, read every frame.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Frame-buffer size in pixels.
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view, radians.
    pub fov: f32,
    /// Cells per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
    /// Upper bound on a single frame's `dt`, seconds.
    pub max_frame_dt: f32,
    /// Initial yaw of the player, radians (0 = +X).
    pub start_yaw: f32,
    pub enemy_health: i32,
    pub texture_size: usize,
    pub texture_seed: u64,
    pub shading: Shading,
    pub combat: CombatConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            fov: 66f32.to_radians(),
            move_speed: 3.0,
            turn_speed: 2.5,
            max_frame_dt: 0.1,
            start_yaw: 0.0,
            enemy_health: 100,
            texture_size: 64,
            texture_seed: 0x5EED,
            shading: Shading::default(),
            combat: CombatConfig::default(),
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn rates(&self) -> Rates {
        Rates {
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
        }
    }
}

/// World state shared by the simulation and the render stages.
pub struct Scene {
    pub grid: WorldGrid,
    pub camera: Camera,
    pub entities: World,
}

impl Scene {
    /// Place the camera on the player start (or the first empty cell) and
    /// spawn one enemy per spawn point.
    pub fn from_map(map: MapLoad, cfg: &EngineConfig) -> Result<Self, MapError> {
        let MapLoad {
            grid,
            spawns,
            player_start,
        } = map;

        let start: Vec2 = player_start
            .or_else(|| grid.first_empty())
            .ok_or(MapError::NoFloor)?;
        let camera = Camera::new(start, cfg.start_yaw, cfg.fov);

        let mut entities = World::new();
        for p in spawns {
            spawn_enemy(&mut entities, p, cfg.enemy_health);
        }

        Ok(Self {
            grid,
            camera,
            entities,
        })
    }
}

/// Whether [`Engine::tick`](super::Engine::tick) does any work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    Running,
    #[default]
    Stopped,
}
