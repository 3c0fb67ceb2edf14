//! Rendering abstraction layer.
//!
//! The orchestrator never touches a pixel buffer directly. It hands the
//! [`Scene`] to a type implementing [`Renderer`], which runs the stages in a
//! fixed order:
//!
//! 1. `begin_frame`: flat ceiling/floor, depth buffer reset
//! 2. `draw_walls`: one ray per column, writes wall strips **and** depth
//! 3. `draw_sprites`: billboards gated by the depth written in step 2
//! 4. `draw_overlay`: crosshair and weapon
//! 5. `end_frame`: loan the finished buffer to the presenter
//!
//! [`RendererExt::draw_scene`] runs the whole sequence.

use crate::{
    engine::Scene,
    world::{Side, TextureBank},
};

pub mod software;

pub use software::{FrameStats, Software, VisSprite};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Lighting for the wall pass and the flat background.
#[derive(Clone, Copy, Debug)]
pub struct Shading {
    /// Multiplier for faces hit on a horizontal grid line.
    pub y_side: f32,
    /// Distance darkening `1 / (1 + d * fog)`; `None` disables it.
    pub fog: Option<f32>,
    pub ceiling: Rgba,
    pub floor: Rgba,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            y_side: 0.7,
            fog: Some(0.08),
            ceiling: 0x00_383848,
            floor: 0x00_505040,
        }
    }
}

impl Shading {
    /// Combined light factor for a wall texel, always in `[0, 1]`.
    #[inline]
    pub fn factor(&self, side: Side, dist: f32) -> f32 {
        let mut k = 1.0;
        if side == Side::Y {
            k *= self.y_side;
        }
        if let Some(fog) = self.fog {
            k *= 1.0 / (1.0 + dist.max(0.0) * fog);
        }
        k.clamp(0.0, 1.0)
    }
}

/// Scale each colour channel by `k`.
#[inline]
pub fn shade(c: Rgba, k: f32) -> Rgba {
    if k >= 1.0 {
        return c;
    }
    // 8.8 fixed point keeps the three channels in one multiply each
    let k = (k.max(0.0) * 256.0) as u32;
    let rb = ((c & 0x00FF00FF) * k >> 8) & 0x00FF00FF;
    let g = ((c & 0x0000FF00) * k >> 8) & 0x0000FF00;
    rb | g
}

/// Foreground state decided by the orchestrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overlay {
    pub muzzle_flash: bool,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate scratch for the requested resolution, paint the
    /// background and reset the depth buffer.
    fn begin_frame(&mut self, width: usize, height: usize, shading: &Shading);

    /// Raycast pass: wall strips plus one depth value per column.
    fn draw_walls(&mut self, scene: &Scene, bank: &TextureBank, shading: &Shading);

    /// Entity pass. Must run after `draw_walls` in the same frame.
    fn draw_sprites(&mut self, scene: &Scene, bank: &TextureBank);

    /// Fixed foreground.
    fn draw_overlay(&mut self, overlay: &Overlay);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl running every stage in order.
pub trait RendererExt: Renderer {
    fn draw_scene<F>(
        &mut self,
        width: usize,
        height: usize,
        scene: &Scene,
        bank: &TextureBank,
        shading: &Shading,
        overlay: &Overlay,
        submit: F,
    ) where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.begin_frame(width, height, shading);
        self.draw_walls(scene, bank, shading);
        self.draw_sprites(scene, bank);
        self.draw_overlay(overlay);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_is_multiplicative_and_bounded() {
        let s = Shading {
            y_side: 0.5,
            fog: Some(1.0),
            ..Default::default()
        };
        assert_eq!(s.factor(Side::X, 0.0), 1.0);
        assert!((s.factor(Side::Y, 0.0) - 0.5).abs() < 1e-6);
        assert!((s.factor(Side::Y, 1.0) - 0.25).abs() < 1e-6);
        let bright = Shading {
            y_side: 3.0,
            fog: None,
            ..Default::default()
        };
        assert_eq!(bright.factor(Side::Y, 5.0), 1.0);
    }

    #[test]
    fn shade_never_overflows_channels() {
        assert_eq!(shade(0x00_FFFFFF, 1.0), 0x00_FFFFFF);
        assert_eq!(shade(0x00_FFFFFF, 0.0), 0);
        let half = shade(0x00_FF8040, 0.5);
        assert_eq!(half, 0x00_7F4020);
    }
}
