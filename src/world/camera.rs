use glam::{Vec2, vec2};

use crate::world::grid::WorldGrid;

/// Player view-point on the grid.
///
/// * `pos` is in cell units (1.0 = one cell), always inside an empty cell.
/// * `dir` is unit length; `plane` is perpendicular to it and its length is
///   `tan(fov / 2)`, so a ray at screen edge is `dir ± plane`.
/// * Grid rows grow downwards, so `dir.perp()` points to the viewer's right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2,
    dir: Vec2,
    plane: Vec2,
}

impl Camera {
    /// Camera at `pos`, facing `yaw` (0 = +X, positive turns towards +Y),
    /// with horizontal field of view `fov` in radians.
    pub fn new(pos: Vec2, yaw: f32, fov: f32) -> Self {
        let dir = Vec2::from_angle(yaw);
        Self {
            pos,
            dir,
            plane: dir.perp() * (fov * 0.5).tan(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    /// Ray direction through normalised screen column `camera_x` (-1 … +1).
    #[inline]
    pub fn ray_dir(&self, camera_x: f32) -> Vec2 {
        self.dir + self.plane * camera_x
    }

    /// World point → camera space through the inverse `[plane | dir]` basis.
    ///
    ///  .x = lateral offset in plane units (+ right)
    ///  .y = depth along `dir`
    ///
    /// Returns `None` when the basis is degenerate.
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Option<Vec2> {
        let rel = p - self.pos;
        let det = self.plane.x * self.dir.y - self.dir.x * self.plane.y;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(vec2(
            inv_det * (self.dir.y * rel.x - self.dir.x * rel.y),
            inv_det * (-self.plane.y * rel.x + self.plane.x * rel.y),
        ))
    }

    /*──────────────────────── movement ──────────────────────────────*/

    /// Step `delta` cells along `dir`, sliding along walls.
    pub fn try_move_forward(&mut self, grid: &WorldGrid, delta: f32) {
        self.try_move(grid, self.dir * delta);
    }

    /// Step `delta` cells against `dir`, sliding along walls.
    pub fn try_move_backward(&mut self, grid: &WorldGrid, delta: f32) {
        self.try_move(grid, -self.dir * delta);
    }

    /// Rotate `dir` and `plane` together by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        let rot = Vec2::from_angle(angle);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }

    /// Axis-separated collision: X commits if its target cell is empty, then
    /// Y is tested from the (possibly updated) X. A blocked axis is zeroed,
    /// the other still moves.
    fn try_move(&mut self, grid: &WorldGrid, step: Vec2) {
        let x = self.pos.x + step.x;
        if grid.is_empty_at(vec2(x, self.pos.y)) {
            self.pos.x = x;
        }
        let y = self.pos.y + step.y;
        if grid.is_empty_at(vec2(self.pos.x, y)) {
            self.pos.y = y;
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
