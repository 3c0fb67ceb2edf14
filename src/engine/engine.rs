use std::mem;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    engine::types::{EngineConfig, RunState, Scene},
    renderer::{Overlay, Renderer, RendererExt, Rgba},
    sim::{Combat, Intent, hit_flash, player_input},
    world::{MapError, MapLoad, TextureBank, TextureError, WorldGrid},
};

/// Frames the muzzle flash stays on screen after a shot.
const MUZZLE_FRAMES: u32 = 4;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("map: {0}")]
    Map(#[from] MapError),
    #[error("textures: {0}")]
    Texture(#[from] TextureError),
}

/// Owns the session and runs one frame per [`Engine::tick`].
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub scene: Scene,
    pub textures: TextureBank,
    pub config: EngineConfig,
    combat: Combat,
    intent: Intent,
    state: RunState,
    frame: u64,
}

impl<R: Renderer> Engine<R> {
    /// Build the scene from `map` and generate the texture bank.
    /// The engine starts out stopped.
    pub fn new(renderer: R, map: MapLoad, config: EngineConfig) -> Result<Self, EngineError> {
        let scene = Scene::from_map(map, &config)?;
        let textures = TextureBank::procedural(config.texture_size, config.texture_seed)?;
        info!(
            enemies = scene.entities.len(),
            textures = textures.len(),
            w = config.width,
            h = config.height,
            "engine ready"
        );
        Ok(Self {
            renderer,
            scene,
            textures,
            config,
            combat: Combat::default(),
            intent: Intent::empty(),
            state: RunState::Stopped,
            frame: 0,
        })
    }

    /// Parse a text map and build the engine from it.
    pub fn from_text(renderer: R, text: &str, config: EngineConfig) -> Result<Self, EngineError> {
        let map = WorldGrid::parse(text)?;
        Self::new(renderer, map, config)
    }

    pub fn start(&mut self) {
        if self.state != RunState::Running {
            info!(frame = self.frame, "running");
            self.state = RunState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            info!(frame = self.frame, "stopped");
            self.state = RunState::Stopped;
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    /// Buffer intents for the next tick; replaces anything buffered before.
    #[inline]
    pub fn set_input(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Advance one frame of `dt` seconds and hand the finished buffer to
    /// `submit`. Returns `false` (and touches nothing) while stopped.
    pub fn tick<F>(&mut self, dt: f32, submit: F) -> bool
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        if self.state == RunState::Stopped {
            return false;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };

        /*──────────────────────── input ─────────────────────────────*/
        let intent = mem::take(&mut self.intent);
        let scene = &mut self.scene;
        player_input(
            &mut scene.camera,
            &scene.grid,
            intent,
            self.config.rates(),
            dt,
        );

        self.combat.update();
        if intent.contains(Intent::FIRE) {
            let cfg = &self.config.combat;
            if let Some(hits) = self.combat.try_fire(&mut scene.entities, &scene.camera, cfg) {
                debug!(frame = self.frame, hits, "shot");
            }
        }

        /*──────────────────────── render ────────────────────────────*/
        let overlay = Overlay {
            muzzle_flash: self
                .combat
                .since_shot()
                .is_some_and(|n| n < MUZZLE_FRAMES),
        };
        self.renderer.draw_scene(
            self.config.width,
            self.config.height,
            &self.scene,
            &self.textures,
            &self.config.shading,
            &overlay,
            submit,
        );

        // flicker counts down whether or not the enemy was on screen
        hit_flash(&mut self.scene.entities);

        self.frame += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::Software,
        sim::{HitFlash, Vitals},
    };

    const MAP: &str = "\
1111111111
1P.....E.1
1........1
1111111111
";

    fn engine() -> Engine<Software> {
        let cfg = EngineConfig {
            width: 64,
            height: 40,
            texture_size: 16,
            ..Default::default()
        };
        Engine::from_text(Software::default(), MAP, cfg).unwrap()
    }

    fn enemy(e: &Engine<Software>) -> hecs::Entity {
        e.scene.entities.iter().next().unwrap().entity()
    }

    #[test]
    fn stopped_engine_does_nothing() {
        let mut e = engine();
        let before = e.scene.camera.pos();
        e.set_input(Intent::FORWARD);
        let mut called = false;
        assert!(!e.tick(0.05, |_, _, _| called = true));
        assert!(!called);
        assert_eq!(e.frame(), 0);
        assert_eq!(e.scene.camera.pos(), before);
    }

    #[test]
    fn intents_are_consumed_once() {
        let mut e = engine();
        e.start();
        e.set_input(Intent::FORWARD);
        assert!(e.tick(0.05, |_, _, _| {}));
        let moved = e.scene.camera.pos();
        assert!(moved.x > 1.5);
        assert!(e.tick(0.05, |_, _, _| {}));
        assert_eq!(e.scene.camera.pos(), moved);
    }

    #[test]
    fn dt_is_clamped() {
        let mut e = engine();
        e.start();
        e.set_input(Intent::FORWARD);
        e.tick(10.0, |_, _, _| {});
        let step = e.scene.camera.pos().x - 1.5;
        let max = e.config.move_speed * e.config.max_frame_dt;
        assert!((step - max).abs() < 1e-4, "{step} vs {max}");
    }

    #[test]
    fn fire_hits_once_and_flash_decays() {
        let mut e = engine();
        let target = enemy(&e);
        e.start();

        e.set_input(Intent::FIRE);
        e.tick(0.016, |_, _, _| {});
        let dmg = e.config.combat.damage;
        let health = e.scene.entities.get::<&Vitals>(target).unwrap().health;
        assert_eq!(health, 100 - dmg);
        // set to flash_frames during the tick, decayed once at its end
        let flash = e.scene.entities.get::<&HitFlash>(target).unwrap().0;
        assert_eq!(flash, e.config.combat.flash_frames - 1);

        // a second fire inside the cooldown window changes nothing
        e.set_input(Intent::FIRE);
        e.tick(0.016, |_, _, _| {});
        let health = e.scene.entities.get::<&Vitals>(target).unwrap().health;
        assert_eq!(health, 100 - dmg);
    }

    #[test]
    fn stop_and_restart() {
        let mut e = engine();
        e.start();
        assert_eq!(e.state(), RunState::Running);
        e.tick(0.016, |_, _, _| {});
        e.stop();
        assert!(!e.tick(0.016, |_, _, _| {}));
        e.start();
        assert!(e.tick(0.016, |_, _, _| {}));
        assert_eq!(e.frame(), 2);
    }
}
