mod camera;
mod grid;
pub mod ray;
mod texture;

pub use camera::Camera;

pub use grid::{EMPTY, MapError, MapLoad, SPAWN_MARKER, WorldGrid, cell_of};

pub use ray::{RayHit, Side};

pub use texture::{
    ENEMY_SPRITE, NO_TEXTURE, TRANSPARENT, Texture, TextureBank, TextureError, TextureId,
    WALL_MATERIALS,
};
