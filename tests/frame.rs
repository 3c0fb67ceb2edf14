//! Whole frames through `Engine::tick` with the software backend.

use glam::vec2;
use gridcaster::{
    engine::{Engine, EngineConfig, RunState},
    renderer::{Shading, Software},
    sim::{Intent, Vitals},
    world::{SPAWN_MARKER, WorldGrid},
};

const W: usize = 96;
const H: usize = 60;

fn config() -> EngineConfig {
    EngineConfig {
        width: W,
        height: H,
        texture_size: 16,
        ..Default::default()
    }
}

fn build(map: &str) -> Engine<Software> {
    let mut e = Engine::from_text(Software::default(), map, config()).unwrap();
    e.start();
    e
}

#[test]
fn frame_is_submitted_with_requested_size() {
    let mut e = build("11111\n1P..1\n11111");
    let mut got = None;
    assert!(e.tick(0.016, |fb, w, h| got = Some((fb.len(), w, h))));
    assert_eq!(got, Some((W * H, W, H)));
    assert_eq!(e.state(), RunState::Running);
}

#[test]
fn stopped_engine_submits_nothing() {
    let mut e = build("11111\n1P..1\n11111");
    e.stop();
    let mut called = false;
    assert!(!e.tick(0.016, |_, _, _| called = true));
    assert!(!called);
}

#[test]
fn enemy_ahead_is_drawn_and_behind_is_not() {
    let mut ahead = build("1111111111\n1...P..E.1\n1111111111");
    ahead.tick(0.016, |_, _, _| {});
    let stats = ahead.renderer.stats();
    assert_eq!(stats.sprites_drawn, 1);
    assert_eq!(stats.sprites_behind, 0);

    let mut behind = build("1111111111\n1.E..P...1\n1111111111");
    behind.tick(0.016, |_, _, _| {});
    let stats = behind.renderer.stats();
    assert_eq!(stats.sprites_drawn, 0);
    assert_eq!(stats.sprites_behind, 1);
}

#[test]
fn wall_between_camera_and_enemy_hides_it() {
    let mut e = build(
        "1111111111\n\
         1P..2..E.1\n\
         1111111111",
    );
    e.tick(0.016, |_, _, _| {});
    let stats = e.renderer.stats();
    assert_eq!(stats.sprites_drawn, 0);
    assert_eq!(stats.sprites_occluded, 1);
}

#[test]
fn corridor_depth_and_no_skipped_columns() {
    // camera in cell (1,1) facing +X with 7 empty cells ahead
    let mut e = build("1111111111\n1P.......1\n1111111111");
    e.tick(0.0, |_, _, _| {});
    assert!((e.renderer.depth()[W / 2] - 7.5).abs() < 1e-4);
    assert_eq!(e.renderer.stats().columns_skipped, 0);
}

#[test]
fn numeric_map_with_markers_builds_a_session() {
    let rows = [
        [1u8, 1, 1, 1, 1, 1],
        [1, 0, 0, 0, SPAWN_MARKER, 1],
        [1, 1, 1, 1, 1, 1],
    ];
    let map = WorldGrid::load(&rows, &[]).unwrap();
    let mut e = Engine::new(Software::default(), map, config()).unwrap();
    // no player start: first empty cell
    assert_eq!(e.scene.camera.pos(), vec2(1.5, 1.5));
    e.start();
    e.tick(0.016, |_, _, _| {});
    assert_eq!(e.renderer.stats().sprites_drawn, 1);
}

#[test]
fn firing_damages_once_and_kills_eventually() {
    let mut e = build("1111111111\n1P....E..1\n1111111111");
    let target = e.scene.entities.iter().next().unwrap().entity();
    let cfg = e.config.combat;

    // hold fire for a whole second of frames
    let mut shots = 0;
    for _ in 0..60 {
        e.set_input(Intent::FIRE);
        e.tick(1.0 / 60.0, |_, _, _| {});
        if e.combat().since_shot() == Some(0) {
            shots += 1;
        }
    }
    let expected = 60_u32.div_ceil(cfg.cooldown_frames) as i32;
    assert_eq!(shots, expected);

    // 34 per shot: the third one is lethal, the fourth finds nothing
    let v = *e.scene.entities.get::<&Vitals>(target).unwrap();
    assert_eq!(v.health, 100 - 3 * cfg.damage);
    assert!(!v.alive);

    // dead enemies leave the picture
    e.tick(0.016, |_, _, _| {});
    assert_eq!(e.renderer.stats().sprites_drawn, 0);
}

#[test]
fn background_is_split_at_the_horizon() {
    // far walls leave the top and bottom rows uncovered
    let mut e = build("1111111111\n1P.......1\n1111111111");
    e.tick(0.0, |_, _, _| {});
    let shading = Shading::default();
    assert_eq!(e.renderer.pixel(W / 2, 0), shading.ceiling);
    // right of the weapon barrel
    assert_eq!(e.renderer.pixel(W / 2 + 10, H - 1), shading.floor);
}
