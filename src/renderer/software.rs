//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Walls come from a per-column DDA pass, which also records the
//!   perpendicular distance of every column in a depth buffer.
//! * Billboards are tested against that depth buffer at their centre column
//!   and painted far-to-near, so nearer ones overwrite farther ones.
//! ---------------------------------------------------------------------------

mod renderer;
mod sprites;
mod walls;

pub use renderer::{FrameStats, Software};
pub use sprites::VisSprite;
