//! Level Geometry
//!
//! Static tiles, level bounds and the grid index the collision oracle
//! queries. Levels come from ASCII layouts supplied by a [`LevelSource`].
//!
//! ## Layout glyphs
//!
//! ```text
//! #  block tile (solid)          P  player spawn (exactly one)
//! =  platform tile (one-way)     E  enemy spawn
//! |  wall tile (solid, blocks    S  speed boost item
//!    horizontal movement)        J  jump boost item
//! .  empty (space also works)    H  health pack
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::game::error::LevelError;
use crate::game::item::ItemKind;

/// Largest level width or height in level units.
///
/// Positions are Q16.16, so whole units stop at `i16::MAX`.
pub const MAX_LEVEL_EXTENT: i32 = i16::MAX as i32;

// =============================================================================
// TILES
// =============================================================================

/// Tile classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    /// One-way geometry, landable from above only
    Platform = 0,
    /// Solid on all sides
    Block = 1,
    /// Solid on all sides and stops horizontal movement
    Wall = 2,
}

impl TileKind {
    /// Platforms are the only non-solid kind.
    #[inline]
    pub fn is_platform(self) -> bool {
        matches!(self, TileKind::Platform)
    }

    /// Layout glyph for this kind.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Platform => '=',
            TileKind::Block => '#',
            TileKind::Wall => '|',
        }
    }
}

/// A single static tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub rect: Rect,
}

/// Overall level extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub width: i32,
    pub height: i32,
}

// =============================================================================
// SPATIAL INDEX
// =============================================================================

/// Uniform grid over the level bounds.
///
/// Each cell lists the tiles touching it. A tile spanning several cells is
/// listed in each, so queries may yield the same tile more than once.
#[derive(Clone, Debug)]
pub struct TileIndex {
    cell_size: i32,
    cols: i32,
    rows: i32,
    cells: Vec<Vec<usize>>,
}

impl TileIndex {
    /// Bucket every tile into the grid cells it overlaps.
    pub fn build(tiles: &[Tile], bounds: LevelBounds, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let cols = ((bounds.width + cell_size - 1) / cell_size).max(1);
        let rows = ((bounds.height + cell_size - 1) / cell_size).max(1);
        let mut index = Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); (cols * rows) as usize],
        };

        for (i, tile) in tiles.iter().enumerate() {
            if let Some((x0, y0, x1, y1)) = index.cell_span(tile.rect) {
                for cy in y0..=y1 {
                    for cx in x0..=x1 {
                        index.cells[(cy * cols + cx) as usize].push(i);
                    }
                }
            }
        }

        index
    }

    /// Inclusive cell span of a rectangle, clamped to the grid.
    fn cell_span(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        let x0 = rect.left().div_euclid(self.cell_size);
        let x1 = (rect.right() - 1).div_euclid(self.cell_size);
        let y0 = rect.top().div_euclid(self.cell_size);
        let y1 = (rect.bottom() - 1).div_euclid(self.cell_size);

        if x1 < 0 || y1 < 0 || x0 >= self.cols || y0 >= self.rows {
            return None;
        }

        Some((
            x0.max(0),
            y0.max(0),
            x1.min(self.cols - 1),
            y1.min(self.rows - 1),
        ))
    }

    /// Tile indices that may overlap `rect`.
    pub fn candidates(&self, rect: Rect) -> impl Iterator<Item = usize> + '_ {
        let span = self.cell_span(rect);
        let cols = self.cols;
        span.into_iter()
            .flat_map(move |(x0, y0, x1, y1)| {
                (y0..=y1).flat_map(move |cy| (x0..=x1).map(move |cx| (cy * cols + cx) as usize))
            })
            .flat_map(move |cell| self.cells[cell].iter().copied())
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// Static level geometry with its spatial index.
#[derive(Clone, Debug)]
pub struct Level {
    name: String,
    bounds: LevelBounds,
    tiles: Vec<Tile>,
    index: TileIndex,
}

impl Level {
    /// Build a level and index its tiles.
    pub fn new(name: impl Into<String>, bounds: LevelBounds, tiles: Vec<Tile>, cell_size: i32) -> Self {
        let index = TileIndex::build(&tiles, bounds, cell_size);
        Self {
            name: name.into(),
            bounds,
            tiles,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    /// Tiles in layout order (row-major).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// True if any tile accepted by `filter` overlaps `rect`.
    #[inline]
    pub fn any_tile<F>(&self, rect: Rect, filter: F) -> bool
    where
        F: Fn(TileKind) -> bool,
    {
        self.index.candidates(rect).any(|i| {
            let tile = &self.tiles[i];
            filter(tile.kind) && tile.rect.intersects(&rect)
        })
    }
}

// =============================================================================
// LAYOUTS
// =============================================================================

/// Level description as stored by a level source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Level name
    pub name: String,
    /// Side of one glyph cell in level units
    pub tile_size: i32,
    /// Glyph rows, top to bottom
    pub rows: Vec<String>,
}

/// Spawn cells found in a layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawns {
    /// Cell holding the `P` glyph
    pub player: Rect,
    /// Cells holding `E` glyphs, in layout order
    pub enemies: Vec<Rect>,
    /// Item kinds and their cells, in layout order
    pub items: Vec<(ItemKind, Rect)>,
}

/// A parsed layout: geometry plus spawn points.
#[derive(Clone, Debug)]
pub struct LoadedLevel {
    pub level: Level,
    pub spawns: Spawns,
}

impl LevelLayout {
    /// Parse the glyph rows into geometry and spawn cells.
    pub fn parse(&self, cell_size: i32) -> Result<LoadedLevel, LevelError> {
        if self.tile_size <= 0 {
            return Err(LevelError::InvalidTileSize(self.tile_size));
        }
        let expected = match self.rows.first() {
            Some(row) => row.chars().count(),
            None => return Err(LevelError::Empty(self.name.clone())),
        };

        let ts = self.tile_size;
        let too_large = || LevelError::TooLarge {
            name: self.name.clone(),
            width_cells: expected,
            height_cells: self.rows.len(),
            tile_size: ts,
        };
        let bounds = LevelBounds {
            width: level_extent(expected, ts).ok_or_else(too_large)?,
            height: level_extent(self.rows.len(), ts).ok_or_else(too_large)?,
        };

        let mut tiles = Vec::new();
        let mut player = None;
        let mut enemies = Vec::new();
        let mut items = Vec::new();

        for (row, line) in self.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(LevelError::RaggedRow { row, expected, found });
            }

            for (column, glyph) in line.chars().enumerate() {
                let cell = Rect::new(column as i32 * ts, row as i32 * ts, ts, ts);
                match glyph {
                    '.' | ' ' => {}
                    '#' => tiles.push(Tile { kind: TileKind::Block, rect: cell }),
                    '=' => tiles.push(Tile { kind: TileKind::Platform, rect: cell }),
                    '|' => tiles.push(Tile { kind: TileKind::Wall, rect: cell }),
                    'P' => {
                        if player.replace(cell).is_some() {
                            return Err(LevelError::DuplicatePlayerSpawn(self.name.clone()));
                        }
                    }
                    'E' => enemies.push(cell),
                    'S' => items.push((ItemKind::SpeedBoost, cell)),
                    'J' => items.push((ItemKind::JumpBoost, cell)),
                    'H' => items.push((ItemKind::HealthPack, cell)),
                    _ => return Err(LevelError::UnknownGlyph { glyph, row, column }),
                }
            }
        }

        let player = player.ok_or_else(|| LevelError::MissingPlayerSpawn(self.name.clone()))?;

        Ok(LoadedLevel {
            level: Level::new(self.name.clone(), bounds, tiles, cell_size),
            spawns: Spawns { player, enemies, items },
        })
    }
}

/// `cells * tile_size`, or `None` past [`MAX_LEVEL_EXTENT`].
fn level_extent(cells: usize, tile_size: i32) -> Option<i32> {
    i32::try_from(cells)
        .ok()
        .and_then(|n| n.checked_mul(tile_size))
        .filter(|&extent| extent <= MAX_LEVEL_EXTENT)
}

// =============================================================================
// LEVEL SOURCES
// =============================================================================

/// Supplies level layouts by name.
pub trait LevelSource {
    fn load(&self, name: &str) -> Result<LevelLayout, LevelError>;
}

/// Layouts compiled into the crate.
#[derive(Clone, Debug)]
pub struct BuiltinLevels {
    layouts: HashMap<String, LevelLayout>,
}

impl Default for BuiltinLevels {
    fn default() -> Self {
        let mut layouts = HashMap::new();
        let demo = demo_layout();
        layouts.insert(demo.name.clone(), demo);
        Self { layouts }
    }
}

impl BuiltinLevels {
    /// Register an extra layout under its own name.
    pub fn with_layout(mut self, layout: LevelLayout) -> Self {
        self.layouts.insert(layout.name.clone(), layout);
        self
    }
}

impl LevelSource for BuiltinLevels {
    fn load(&self, name: &str) -> Result<LevelLayout, LevelError> {
        self.layouts
            .get(name)
            .cloned()
            .ok_or_else(|| LevelError::NotFound(name.to_string()))
    }
}

/// Reads `<root>/<name>.json` layout documents.
#[derive(Clone, Debug)]
pub struct DirectoryLevelSource {
    root: PathBuf,
}

impl DirectoryLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelSource for DirectoryLevelSource {
    fn load(&self, name: &str) -> Result<LevelLayout, LevelError> {
        // Names are plain identifiers, never paths
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(LevelError::NotFound(name.to_string()));
        }

        let path = self.root.join(format!("{name}.json"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LevelError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&text)?)
    }
}

/// The built-in `demo` level.
pub fn demo_layout() -> LevelLayout {
    let rows = [
        "|......................|",
        "|......................|",
        "|.............E........|",
        "|..........=======.....|",
        "|..S...................|",
        "|=====.........J....E..|",
        "|..........########....|",
        "|..P.............H.....|",
        "|......==..............|",
        "|.........E............|",
        "########################",
    ];

    LevelLayout {
        name: "demo".to_string(),
        tile_size: 40,
        rows: rows.iter().map(|r| r.to_string()).collect(),
    }
}
