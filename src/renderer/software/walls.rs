use tracing::trace;

use crate::{
    renderer::{Shading, shade, software::Software},
    world::{Camera, RayHit, Side, Texture, TextureBank, WorldGrid, ray},
};

/// Distances below this are clamped so strip heights stay finite.
const MIN_DIST: f32 = 1e-3;

impl Software {
    /// Cast one ray per column; draw the wall strip and record its depth.
    ///
    /// Every column's depth is written here, before any sprite is
    /// considered. A column without a usable hit keeps `INFINITY`.
    pub fn raycast_pass(
        &mut self,
        grid: &WorldGrid,
        camera: &Camera,
        bank: &TextureBank,
        shading: &Shading,
    ) {
        // a ray crosses at most one line per row and column
        let max_steps = grid.width() + grid.height() + 2;
        let origin = camera.pos();

        for x in 0..self.width {
            let camera_x = 2.0 * x as f32 / self.width_f - 1.0;
            let ray_dir = camera.ray_dir(camera_x);

            let Some(hit) = ray::cast(grid, origin, ray_dir, max_steps) else {
                trace!(x, ?ray_dir, "column skipped");
                self.stats.columns_skipped += 1;
                self.depth[x] = f32::INFINITY;
                continue;
            };

            self.depth[x] = hit.perp_dist;
            let tex = bank.texture_or_missing(hit.material);
            self.draw_wall_column(x, &hit, tex, shading);
        }
    }

    /// Draw a single vertical textured strip.
    fn draw_wall_column(&mut self, x: usize, hit: &RayHit, tex: &Texture, shading: &Shading) {
        let dist = hit.perp_dist.max(MIN_DIST);
        let line_h = self.height_f / dist;
        let top = self.half_h - line_h * 0.5;
        let bot = self.half_h + line_h * 0.5;

        /* clip to the visible rows */
        let y0 = top.max(0.0) as usize;
        let y1 = (bot.min(self.height_f).max(0.0)) as usize;
        if y0 >= y1 {
            return;
        }

        let u = texture_column(hit, tex.size);
        let v_step = tex.size as f32 / line_h;
        let mut v = (y0 as f32 - top) * v_step;
        let k = shading.factor(hit.side, dist);

        for y in y0..y1 {
            let tv = (v as usize).min(tex.size - 1);
            self.scratch[y * self.width + x] = shade(tex.texel(u, tv), k);
            v += v_step;
        }
    }
}

/// Texel column for a hit, mirrored so both faces of a wall read the
/// texture left-to-right as seen by the viewer.
#[inline]
fn texture_column(hit: &RayHit, size: usize) -> usize {
    let u = ((hit.wall_x * size as f32) as usize).min(size - 1);
    let mirror = match hit.side {
        Side::X => hit.ray_dir.x > 0.0,
        Side::Y => hit.ray_dir.y < 0.0,
    };
    if mirror { size - 1 - u } else { u }
}
