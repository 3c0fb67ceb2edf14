//! Grid raycaster core.
//!
//! A 2-D occupancy grid plus a moving [`world::Camera`] become a
//! perspective-correct first-person view: textured walls from a per-column
//! DDA pass, depth-tested billboard enemies, and a hit-scan weapon.
//!
//! Frame order, driven by [`engine::Engine::tick`]:
//!
//! ```text
//! intents → camera → raycast pass (walls + depth) → sprite pass → overlay → submit
//! ```

pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
