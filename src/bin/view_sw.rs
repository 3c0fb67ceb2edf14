//! Windowed front-end for the software raycaster.
//!
//! ```bash
//! cargo run --release --features window -- [map.txt] --width 960 --height 540
//! ```
//!
//! Arrows / WASD move and turn, Ctrl or Space fires, P pauses, Esc quits.

use std::{
    fs,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridcaster::{
    engine::{Engine, EngineConfig, FrameClock, RunState},
    renderer::Software,
    sim::Intent,
};

const DEFAULT_MAP: &str = include_str!("../../maps/arena.txt");

#[derive(Parser, Debug)]
#[command(version, about = "Grid raycaster viewer")]
struct Args {
    /// Text map; the built-in arena when omitted.
    map: Option<PathBuf>,

    #[arg(long, default_value_t = 960)]
    width: usize,

    #[arg(long, default_value_t = 540)]
    height: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 66.0)]
    fov: f32,

    /// Distance fog density; 0 disables it.
    #[arg(long, default_value_t = 0.08)]
    fog: f32,

    /// Seed for the procedural textures.
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Log filter, e.g. `gridcaster=debug`. `RUST_LOG` wins when set.
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .init();

    let text = match &args.map {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => DEFAULT_MAP.to_owned(),
    };

    let mut cfg = EngineConfig {
        width: args.width,
        height: args.height,
        fov: args.fov.clamp(10.0, 170.0).to_radians(),
        texture_seed: args.seed,
        ..Default::default()
    };
    cfg.shading.fog = (args.fog > 0.0).then_some(args.fog);

    let mut engine = Engine::from_text(Software::default(), &text, cfg).context("building engine")?;
    let mut clock = FrameClock::new(cfg.max_frame_dt);

    let mut win = Window::new("gridcaster", cfg.width, cfg.height, WindowOptions::default())?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    engine.start();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        if win.is_key_pressed(Key::P, KeyRepeat::No) {
            match engine.state() {
                RunState::Running => engine.stop(),
                RunState::Stopped => {
                    clock.reset();
                    engine.start();
                }
            }
        }

        engine.set_input(read_intent(&win));

        let t0 = Instant::now();
        let dt = clock.tick();
        let mut present = Ok(());
        let drawn = engine.tick(dt, |fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            present = win.update_with_buffer(fb, w, h);
        });
        present?;
        if !drawn {
            // paused: keep polling keys
            win.update();
        }

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            info!(frame = engine.frame(), "avg render: {avg_ms:.2} ms ({fps:.1} FPS)");
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    engine.stop();
    Ok(())
}

/// Held keys become held intents; fire is edge-triggered.
fn read_intent(win: &Window) -> Intent {
    let mut intent = Intent::empty();
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        intent |= Intent::FORWARD;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        intent |= Intent::BACKWARD;
    }
    if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
        intent |= Intent::ROTATE_LEFT;
    }
    if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
        intent |= Intent::ROTATE_RIGHT;
    }
    let fire = [Key::LeftCtrl, Key::RightCtrl, Key::Space]
        .into_iter()
        .any(|k| win.is_key_pressed(k, KeyRepeat::No));
    if fire {
        intent |= Intent::FIRE;
    }
    intent
}
