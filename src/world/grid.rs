use glam::{IVec2, Vec2, ivec2, vec2};
use thiserror::Error;
use tracing::info;

/// Cell code of an empty (walkable, transparent) cell.
pub const EMPTY: u8 = 0;

/// Cell code consumed by [`WorldGrid::load`] as an enemy spawn point.
pub const SPAWN_MARKER: u8 = u8::MAX;

/// Problems detected while building a grid from map input.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    /// No rows, or rows without cells.
    #[error("map is empty")]
    Empty,

    /// Cell vector does not match the declared size.
    #[error("map declares {width}x{height} cells but holds {len}")]
    BadSize {
        width: usize,
        height: usize,
        len: usize,
    },

    /// A row differs in length from the first one.
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Border cell is walkable; rays could escape the map.
    #[error("border cell ({col}, {row}) is open")]
    OpenBorder { col: usize, row: usize },

    /// Character with no meaning in the text format.
    #[error("unknown tile `{ch}` at ({col}, {row})")]
    UnknownTile { ch: char, col: usize, row: usize },

    /// An explicit spawn coordinate lands in a wall or outside the map.
    #[error("spawn point ({x}, {y}) is not inside an empty cell")]
    BadSpawn { x: f32, y: f32 },

    /// Every cell is a wall; there is nowhere to stand.
    #[error("map has no empty cell")]
    NoFloor,
}

/// Static map: `width × height` cell codes in row-major order.
///
/// * `0` is empty, anything else is a wall whose code doubles as the
///   texture id.
/// * Every border cell is solid, so a ray cast from inside always stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

/// Output of a map load: the cleaned grid plus the markers it contained.
#[derive(Clone, Debug)]
pub struct MapLoad {
    pub grid: WorldGrid,
    /// Cell centres of consumed enemy markers.
    pub spawns: Vec<Vec2>,
    /// Cell centre of the `P` marker, if the map had one.
    pub player_start: Option<Vec2>,
}

impl WorldGrid {
    /// Build from a flat row-major cell vector.
    pub fn new(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(MapError::BadSize {
                width,
                height,
                len: cells.len(),
            });
        }
        let grid = Self {
            width,
            height,
            cells,
        };
        grid.check_border()?;
        Ok(grid)
    }

    /// Build from equally long rows.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MapError> {
        let (width, cells) = flatten(rows)?;
        Self::new(width, rows.len(), cells)
    }

    /// Numeric map input: `SPAWN_MARKER` cells become spawn points and are
    /// cleared; `extra_spawns` are appended after validation.
    pub fn load<R: AsRef<[u8]>>(rows: &[R], extra_spawns: &[Vec2]) -> Result<MapLoad, MapError> {
        let (width, mut cells) = flatten(rows)?;
        let mut spawns = Vec::new();
        for (i, c) in cells.iter_mut().enumerate() {
            if *c == SPAWN_MARKER {
                *c = EMPTY;
                spawns.push(cell_centre(i % width, i / width));
            }
        }
        let grid = Self::new(width, rows.len(), cells)?;
        for &p in extra_spawns {
            if !grid.is_empty_at(p) {
                return Err(MapError::BadSpawn { x: p.x, y: p.y });
            }
            spawns.push(p);
        }
        info!(
            width = grid.width,
            height = grid.height,
            spawns = spawns.len(),
            "map loaded"
        );
        Ok(MapLoad {
            grid,
            spawns,
            player_start: None,
        })
    }

    /// Parse the text map format.
    ///
    /// ```text
    /// 11111
    /// 1P.E1     P = player start, E = enemy, '.'/'0'/' ' = empty
    /// 11111     '1'..='9' = wall material
    /// ```
    pub fn parse(text: &str) -> Result<MapLoad, MapError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        let mut spawns = Vec::new();
        let mut player_start = None;

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let row = rows.len();
            let mut cells = Vec::with_capacity(line.len());
            for (col, ch) in line.trim_end().chars().enumerate() {
                let code = match ch {
                    '.' | '0' | ' ' => EMPTY,
                    '1'..='9' => ch as u8 - b'0',
                    'E' => {
                        spawns.push(cell_centre(col, row));
                        EMPTY
                    }
                    'P' => {
                        player_start = Some(cell_centre(col, row));
                        EMPTY
                    }
                    _ => return Err(MapError::UnknownTile { ch, col, row }),
                };
                cells.push(code);
            }
            rows.push(cells);
        }

        let grid = Self::from_rows(&rows)?;
        info!(
            width = grid.width,
            height = grid.height,
            spawns = spawns.len(),
            "map parsed"
        );
        Ok(MapLoad {
            grid,
            spawns,
            player_start,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Material at `(col, row)`. Callers stay in range; traversal code uses
    /// [`WorldGrid::get`].
    #[inline]
    pub fn cell_at(&self, col: usize, row: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    /// Bounds-checked lookup for signed cell coordinates.
    #[inline]
    pub fn get(&self, cell: IVec2) -> Option<u8> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (col, row) = (cell.x as usize, cell.y as usize);
        (col < self.width && row < self.height).then(|| self.cell_at(col, row))
    }

    /// `true` if the cell containing world point `p` is walkable.
    /// Anything outside the map counts as solid.
    #[inline]
    pub fn is_empty_at(&self, p: Vec2) -> bool {
        self.get(cell_of(p)) == Some(EMPTY)
    }

    /// Centre of the first empty cell in row-major order.
    pub fn first_empty(&self) -> Option<Vec2> {
        let i = self.cells.iter().position(|&c| c == EMPTY)?;
        Some(cell_centre(i % self.width, i / self.width))
    }

    fn check_border(&self) -> Result<(), MapError> {
        let (w, h) = (self.width, self.height);
        let border = (0..w)
            .flat_map(|col| [(col, 0), (col, h - 1)])
            .chain((0..h).flat_map(|row| [(0, row), (w - 1, row)]));
        for (col, row) in border {
            if self.cell_at(col, row) == EMPTY {
                return Err(MapError::OpenBorder { col, row });
            }
        }
        Ok(())
    }
}

/// Grid cell containing world point `p`.
#[inline]
pub fn cell_of(p: Vec2) -> IVec2 {
    ivec2(p.x.floor() as i32, p.y.floor() as i32)
}

#[inline]
fn cell_centre(col: usize, row: usize) -> Vec2 {
    vec2(col as f32 + 0.5, row as f32 + 0.5)
}

fn flatten<R: AsRef<[u8]>>(rows: &[R]) -> Result<(usize, Vec<u8>), MapError> {
    let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    if width == 0 {
        return Err(MapError::Empty);
    }
    let mut cells = Vec::with_capacity(width * rows.len());
    for (row, r) in rows.iter().enumerate() {
        let r = r.as_ref();
        if r.len() != width {
            return Err(MapError::Ragged {
                row,
                len: r.len(),
                expected: width,
            });
        }
        cells.extend_from_slice(r);
    }
    Ok((width, cells))
}
