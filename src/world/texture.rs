// Repository of procedurally generated bitmaps.
// Walls address textures by material id; the renderer only sees `TextureId`.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Runtime handle for a texture in this bank. For walls it equals the
/// grid cell code.
pub type TextureId = u8;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first; 0 is also the
/// empty cell code, so no wall ever asks for it on purpose.
pub const NO_TEXTURE: TextureId = 0;

/// Colour key for sprite bitmaps: texels equal to this are not drawn.
pub const TRANSPARENT: u32 = 0;

/// Name under which the enemy billboard is stored.
pub const ENEMY_SPRITE: &str = "ENEMY";

/// Wall materials in id order (id 1 = first entry).
pub const WALL_MATERIALS: [&str; 9] = [
    "BRICK", "STONE", "WOOD", "METAL", "MOSS", "TILE", "CRATE", "PANEL", "BLUE",
];

/// Square bitmap, 0x00RRGGBB texels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub size: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Texel at `(u, v)`; both must be `< size`.
    #[inline]
    pub fn texel(&self, u: usize, v: usize) -> u32 {
        self.pixels[v * self.size + u]
    }
}

/// Convenience checkerboard 8×8 (magenta/black).
impl Default for Texture {
    fn default() -> Self {
        let mut pixels = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pixels[y * 8 + x] = if (x ^ y) & 1 == 0 {
                    0x00_FF00FF
                } else {
                    0x00_101010
                };
            }
        }
        Texture { size: 8, pixels }
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// The bank already holds `TextureId::MAX + 1` entries.
    #[error("texture bank is full")]
    Full,
}

/// Name-addressable cache of immutable textures.
///
/// * ID **0** is always the “missing” checkerboard.
/// * Built once at startup; shared read-only by every column of every frame.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create a bank holding only `missing_tex`, under the name `"MISSING"`
    /// with handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Every wall material (ids `1..=9`) plus the enemy sprite, generated
    /// from `seed` at `size × size` texels.
    pub fn procedural(size: usize, seed: u64) -> Result<Self, TextureError> {
        let size = size.max(8);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut bank = Self::default_with_checker();
        for (i, name) in WALL_MATERIALS.iter().enumerate() {
            let tex = generate_wall(i, size, &mut rng);
            bank.insert(*name, tex)?;
        }
        bank.insert(ENEMY_SPRITE, generate_enemy(size))?;
        Ok(bank)
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a loaded texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Texture for `id`, or the checkerboard if `id` is unknown.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name` and return its new id.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = TextureId::try_from(self.data.len()).map_err(|_| TextureError::Full)?;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*──────────────────────── generators ───────────────────────────────*/

#[inline]
fn rgb(r: u32, g: u32, b: u32) -> u32 {
    (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

/// Scale each channel of `c` by `k` (0 … 1).
#[inline]
fn scaled(c: u32, k: f32) -> u32 {
    let k = k.clamp(0.0, 1.0);
    let ch = |shift: u32| (((c >> shift) & 0xFF) as f32 * k) as u32;
    rgb(ch(16), ch(8), ch(0))
}

fn generate_wall(kind: usize, size: usize, rng: &mut Pcg32) -> Texture {
    let mut pixels = vec![0u32; size * size];
    let cell = (size / 8).max(1);
    for y in 0..size {
        for x in 0..size {
            let grain: f32 = rng.gen_range(0.80..1.0);
            let c = match kind {
                // brick: staggered courses with mortar lines
                0 => {
                    let course = y / (cell * 2);
                    let shift = if course % 2 == 0 { 0 } else { cell * 2 };
                    let mortar = y % (cell * 2) == 0 || (x + shift) % (cell * 4) == 0;
                    if mortar {
                        rgb(150, 150, 140)
                    } else {
                        rgb(160, 60, 40)
                    }
                }
                // stone: large irregular blocks
                1 => {
                    let edge = x % (cell * 4) == 0 || y % (cell * 3) == 0;
                    if edge { rgb(60, 60, 60) } else { rgb(120, 120, 125) }
                }
                // wood: vertical planks with grain
                2 => {
                    let plank = x % (cell * 2) == 0;
                    let ring = ((y as f32 * 0.4 + (x / (cell * 2)) as f32 * 3.0).sin() * 12.0) as i32;
                    if plank {
                        rgb(60, 35, 15)
                    } else {
                        rgb((130 + ring) as u32, (85 + ring) as u32, 40)
                    }
                }
                // metal: riveted plates
                3 => {
                    let (px, py) = (x % (cell * 4), y % (cell * 4));
                    let rivet = (px == cell / 2 || px == cell * 4 - cell / 2 - 1)
                        && (py == cell / 2 || py == cell * 4 - cell / 2 - 1);
                    if rivet {
                        rgb(220, 220, 230)
                    } else if px == 0 || py == 0 {
                        rgb(70, 75, 85)
                    } else {
                        rgb(140, 145, 155)
                    }
                }
                // moss: stone with green blotches
                4 => {
                    if rng.gen_bool(0.35) {
                        rgb(50, 120, 40)
                    } else {
                        rgb(100, 105, 95)
                    }
                }
                // tile: small squares
                5 => {
                    if x % cell == 0 || y % cell == 0 {
                        rgb(200, 200, 200)
                    } else {
                        rgb(40, 110, 150)
                    }
                }
                // crate: frame and diagonal brace
                6 => {
                    let border = x < cell || y < cell || x >= size - cell || y >= size - cell;
                    let brace = x.abs_diff(y) < cell.max(2) / 2 + 1;
                    if border || brace {
                        rgb(110, 70, 25)
                    } else {
                        rgb(170, 120, 60)
                    }
                }
                // panel: horizontal bands
                7 => {
                    if (y / (cell * 2)) % 2 == 0 {
                        rgb(90, 90, 110)
                    } else {
                        rgb(120, 120, 140)
                    }
                }
                _ => rgb(40, 50, 170),
            };
            pixels[y * size + x] = scaled(c, grain);
        }
    }
    Texture { size, pixels }
}

/// Front-facing enemy silhouette on a transparent background.
fn generate_enemy(size: usize) -> Texture {
    let mut pixels = vec![TRANSPARENT; size * size];
    let s = size as f32;
    let head_c = (s * 0.5, s * 0.22);
    let head_r = s * 0.14;
    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let dx = fx - head_c.0;
            let dy = fy - head_c.1;
            let head = dx * dx + dy * dy <= head_r * head_r;
            let torso = fy > s * 0.36 && fy < s * 0.70 && (fx - s * 0.5).abs() < s * 0.22;
            let legs = fy >= s * 0.70
                && ((fx - s * 0.40).abs() < s * 0.07 || (fx - s * 0.60).abs() < s * 0.07);
            let eye = (fy - s * 0.21).abs() < s * 0.03
                && ((fx - s * 0.45).abs() < s * 0.03 || (fx - s * 0.55).abs() < s * 0.03);
            pixels[y * size + x] = if eye {
                rgb(255, 230, 40)
            } else if head {
                rgb(190, 60, 60)
            } else if torso {
                rgb(120, 30, 30)
            } else if legs {
                rgb(70, 20, 20)
            } else {
                TRANSPARENT
            };
        }
    }
    Texture { size, pixels }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
