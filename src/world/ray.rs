//! Grid traversal (DDA) for one ray.
//!
//! The ray walks one grid line at a time: whichever axis reaches its next
//! integer boundary first is stepped, until a non-empty cell is entered.

use glam::{IVec2, Vec2};

use crate::world::grid::{EMPTY, WorldGrid, cell_of};

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Vertical line (x = const); face points along ±X.
    X,
    /// Horizontal line (y = const); face points along ±Y.
    Y,
}

/// Result of casting one ray; lives for one column only.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub ray_dir: Vec2,
    pub cell: IVec2,
    pub material: u8,
    pub side: Side,
    /// Distance along the camera's forward axis, not the ray length.
    pub perp_dist: f32,
    /// Hit position along the wall face, `0.0 .. 1.0`.
    pub wall_x: f32,
}

impl RayHit {
    /// World-space point where the ray meets the wall face.
    #[inline]
    pub fn point(&self, origin: Vec2) -> Vec2 {
        origin + self.ray_dir * self.perp_dist
    }
}

/// Cast from `origin` along `ray_dir` (not necessarily unit length).
///
/// `None` when the direction is zero, the ray leaves the map (origin outside
/// or border breached) or `max_steps` is exhausted.
pub fn cast(grid: &WorldGrid, origin: Vec2, ray_dir: Vec2, max_steps: usize) -> Option<RayHit> {
    if ray_dir == Vec2::ZERO || !ray_dir.is_finite() {
        return None;
    }

    let mut cell = cell_of(origin);

    // parallel axis → never stepped
    let delta = Vec2::new(inv_abs(ray_dir.x), inv_abs(ray_dir.y));

    let (step_x, mut side_x) = if ray_dir.x < 0.0 {
        (-1, (origin.x - cell.x as f32) * delta.x)
    } else {
        (1, (cell.x as f32 + 1.0 - origin.x) * delta.x)
    };
    let (step_y, mut side_y) = if ray_dir.y < 0.0 {
        (-1, (origin.y - cell.y as f32) * delta.y)
    } else {
        (1, (cell.y as f32 + 1.0 - origin.y) * delta.y)
    };

    for _ in 0..max_steps {
        let side = if side_x < side_y {
            side_x += delta.x;
            cell.x += step_x;
            Side::X
        } else {
            side_y += delta.y;
            cell.y += step_y;
            Side::Y
        };

        let material = grid.get(cell)?;
        if material == EMPTY {
            continue;
        }

        // undo the step that overshot the face
        let perp_dist = match side {
            Side::X => side_x - delta.x,
            Side::Y => side_y - delta.y,
        };
        if !perp_dist.is_finite() {
            return None;
        }

        let along = match side {
            Side::X => origin.y + perp_dist * ray_dir.y,
            Side::Y => origin.x + perp_dist * ray_dir.x,
        };

        return Some(RayHit {
            ray_dir,
            cell,
            material,
            side,
            perp_dist,
            wall_x: along - along.floor(),
        });
    }
    None
}

#[inline]
fn inv_abs(v: f32) -> f32 {
    if v == 0.0 { f32::INFINITY } else { (1.0 / v).abs() }
}
