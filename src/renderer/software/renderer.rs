use smallvec::SmallVec;

use crate::{
    engine::Scene,
    renderer::{
        Overlay, Renderer, Rgba, Shading,
        software::sprites::{SPRITE_INLINE, VisSprite},
    },
    world::TextureBank,
};

const CROSSHAIR: Rgba = 0x00_E0E0E0;
const GUN_BODY: Rgba = 0x00_303030;
const GUN_EDGE: Rgba = 0x00_707070;
const MUZZLE: Rgba = 0x00_FFD040;

/// Counters for the frame in flight; reset by `begin_frame`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Columns whose ray produced no usable hit.
    pub columns_skipped: usize,
    /// Billboards at or behind the camera plane.
    pub sprites_behind: usize,
    /// Billboards in front of the camera but entirely beside the screen.
    pub sprites_offscreen: usize,
    /// Billboards rejected by the depth test.
    pub sprites_occluded: usize,
    /// Billboards that reached the rasteriser.
    pub sprites_drawn: usize,
}

/// Grid raycaster backend.
#[derive(Default)]
pub struct Software {
    pub scratch: Vec<Rgba>,
    /// Perpendicular wall distance per column, `INFINITY` where no wall.
    pub depth: Vec<f32>,
    pub sprites: SmallVec<[VisSprite; SPRITE_INLINE]>,
    pub stats: FrameStats,

    pub width: usize,
    pub height: usize,

    pub width_f: f32,
    pub height_f: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize, shading: &Shading) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.width_f = w as f32;
            self.height_f = h as f32;
            self.half_w = self.width_f * 0.5;
            self.half_h = self.height_f * 0.5;
            self.scratch.resize(w * h, 0);
            self.depth.resize(w, f32::INFINITY);
        }

        // flat ceiling above the horizon, flat floor below
        let split = (h / 2) * w;
        self.scratch[..split].fill(shading.ceiling);
        self.scratch[split..].fill(shading.floor);

        self.depth.fill(f32::INFINITY);
        self.sprites.clear();
        self.stats = FrameStats::default();
    }

    fn draw_walls(&mut self, scene: &Scene, bank: &TextureBank, shading: &Shading) {
        self.raycast_pass(&scene.grid, &scene.camera, bank, shading);
    }

    fn draw_sprites(&mut self, scene: &Scene, bank: &TextureBank) {
        self.collect_sprites(&scene.entities, &scene.camera);
        self.draw_collected_sprites(bank);
    }

    fn draw_overlay(&mut self, overlay: &Overlay) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let cx = self.width as i32 / 2;
        let cy = self.height as i32 / 2;
        let unit = (self.height as i32 / 60).max(1);

        // crosshair, gap in the middle
        for d in 2..2 + unit * 3 {
            self.put(cx - d, cy, CROSSHAIR);
            self.put(cx + d, cy, CROSSHAIR);
            self.put(cx, cy - d, CROSSHAIR);
            self.put(cx, cy + d, CROSSHAIR);
        }

        // weapon: a barrel rising from the bottom edge
        let bw = unit * 4;
        let bh = unit * 12;
        let y_top = self.height as i32 - bh;
        self.fill_rect(cx - bw, y_top, cx + bw, self.height as i32, GUN_BODY);
        self.fill_rect(cx - bw, y_top, cx - bw + unit, self.height as i32, GUN_EDGE);
        self.fill_rect(cx + bw - unit, y_top, cx + bw, self.height as i32, GUN_EDGE);

        if overlay.muzzle_flash {
            let r = unit * 4;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy <= r * r {
                        self.put(cx + dx, y_top - r + dy, MUZZLE);
                    }
                }
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    /// Depth buffer of the current frame.
    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }

    /// Clipped single-pixel write.
    #[inline]
    fn put(&mut self, x: i32, y: i32, c: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = c;
        }
    }

    /// Clipped half-open rectangle `[x0, x1) × [y0, y1)`.
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgba) {
        let x0 = x0.clamp(0, self.width as i32) as usize;
        let x1 = x1.clamp(0, self.width as i32) as usize;
        let y0 = y0.clamp(0, self.height as i32) as usize;
        let y1 = y1.clamp(0, self.height as i32) as usize;
        for y in y0..y1 {
            let row = y * self.width;
            self.scratch[row + x0..row + x1.max(x0)].fill(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_paints_background_and_resets_depth() {
        let shading = Shading::default();
        let mut sw = Software::default();
        sw.begin_frame(8, 6, &shading);
        sw.depth[3] = 1.0;
        sw.stats.sprites_drawn = 4;

        sw.begin_frame(8, 6, &shading);
        assert_eq!(sw.pixel(0, 0), shading.ceiling);
        assert_eq!(sw.pixel(7, 2), shading.ceiling);
        assert_eq!(sw.pixel(0, 3), shading.floor);
        assert_eq!(sw.pixel(7, 5), shading.floor);
        assert!(sw.depth().iter().all(|d| d.is_infinite()));
        assert_eq!(sw.stats(), FrameStats::default());
    }

    #[test]
    fn overlay_draws_crosshair_and_flash() {
        let shading = Shading::default();
        let mut sw = Software::default();
        sw.begin_frame(120, 120, &shading);
        sw.draw_overlay(&Overlay { muzzle_flash: false });
        assert_eq!(sw.pixel(62, 60), CROSSHAIR);
        assert!(!sw.scratch.contains(&MUZZLE));

        sw.draw_overlay(&Overlay { muzzle_flash: true });
        assert!(sw.scratch.contains(&MUZZLE));
    }

    #[test]
    fn end_frame_loans_buffer() {
        let mut sw = Software::default();
        sw.begin_frame(4, 2, &Shading::default());
        let mut seen = (0, 0, 0);
        sw.end_frame(|fb, w, h| seen = (fb.len(), w, h));
        assert_eq!(seen, (8, 4, 2));
    }
}
