use std::cmp::Ordering;

use hecs::World;
use tracing::trace;

use crate::{
    renderer::{Rgba, software::Software},
    sim::{Enemy, HitFlash, Position, Vitals},
    world::{Camera, ENEMY_SPRITE, NO_TEXTURE, TRANSPARENT, TextureBank, TextureId},
};

/// Sprites kept on the stack before the list spills to the heap.
pub const SPRITE_INLINE: usize = 16;

/// Billboards never grow past this many screen heights.
const MAX_SCALE: f32 = 8.0;

/// A billboard that survived the behind-camera cull.
#[derive(Clone, Copy, Debug)]
pub struct VisSprite {
    /// Camera-space depth along `dir`.
    pub depth: f32,
    /// Screen column of the sprite centre (may be off screen).
    pub screen_x: i32,
    /// Edge length in pixels.
    pub size: i32,
    /// Draw this frame with the hit tint.
    pub flash: bool,
}

impl Software {
    /// Project every living enemy and queue it, sorted far-to-near.
    pub fn collect_sprites(&mut self, world: &World, camera: &Camera) {
        let max_size = self.height_f * MAX_SCALE;

        for (_, (_, pos, vitals, flash)) in world
            .query::<(&Enemy, &Position, &Vitals, &HitFlash)>()
            .iter()
        {
            if !vitals.alive {
                continue;
            }
            let t = match camera.to_cam(pos.0) {
                Some(t) if t.y > 0.0 => t,
                _ => {
                    self.stats.sprites_behind += 1;
                    continue;
                }
            };

            let screen_x = self.half_w * (1.0 + t.x / t.y);
            let size = (self.height_f / t.y).abs().min(max_size);
            if !screen_x.is_finite() || !size.is_finite() {
                self.stats.sprites_behind += 1;
                continue;
            }
            // extent entirely beside the screen; bounds screen_x before the cast
            let half = size * 0.5;
            if screen_x + half < 0.0 || screen_x - half >= self.width_f {
                self.stats.sprites_offscreen += 1;
                continue;
            }

            self.sprites.push(VisSprite {
                depth: t.y,
                screen_x: screen_x as i32,
                size: size as i32,
                // two frames tinted, two plain
                flash: flash.0 > 0 && (flash.0 / 2) % 2 == 0,
            });
        }

        // painter order
        self.sprites
            .sort_unstable_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
    }

    /// Depth-test and rasterise the queued sprites.
    pub fn draw_collected_sprites(&mut self, bank: &TextureBank) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let tex_id = bank.id(ENEMY_SPRITE).unwrap_or(NO_TEXTURE);

        for i in 0..self.sprites.len() {
            let spr = self.sprites[i];

            // one sample at the centre column
            let probe = spr.screen_x.clamp(0, self.width as i32 - 1) as usize;
            if spr.depth >= self.depth[probe] {
                trace!(depth = spr.depth, wall = self.depth[probe], "sprite occluded");
                self.stats.sprites_occluded += 1;
                continue;
            }

            self.draw_billboard(&spr, bank, tex_id);
            self.stats.sprites_drawn += 1;
        }
    }

    fn draw_billboard(&mut self, spr: &VisSprite, bank: &TextureBank, tex_id: TextureId) {
        if spr.size <= 0 {
            return;
        }
        let tex = bank.texture_or_missing(tex_id);
        let x_start = spr.screen_x.saturating_sub(spr.size / 2);
        let y_start = self.half_h as i32 - spr.size / 2;

        let x0 = x_start.max(0);
        let x1 = x_start.saturating_add(spr.size).min(self.width as i32);
        let y0 = y_start.max(0);
        let y1 = y_start.saturating_add(spr.size).min(self.height as i32);

        for x in x0..x1 {
            let u = (((x - x_start) as usize * tex.size) / spr.size as usize).min(tex.size - 1);
            for y in y0..y1 {
                let v = (((y - y_start) as usize * tex.size) / spr.size as usize).min(tex.size - 1);
                let c = tex.texel(u, v);
                if c == TRANSPARENT {
                    continue;
                }
                let c = if spr.flash { tint(c) } else { c };
                self.scratch[y as usize * self.width + x as usize] = c;
            }
        }
    }
}

/// Halfway toward white.
#[inline]
fn tint(c: Rgba) -> Rgba {
    ((c >> 1) & 0x00_7F7F7F) + 0x00_808080
}
