/// The tile grid plus the player position.
///
/// Row-major `tiles[y][x]`, fixed size after construction. Every read and
/// write is bounds-checked: outside the grid reads as `None`, writes are
/// dropped. `move_player_to` is the only way the player moves, so the
/// single `Tile::Player` cell and `player` never disagree.

use crate::error::LevelError;

use super::entity::Player;
use super::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
    player: Player,
}

// ── Construction ──

impl Grid {
    /// Build from raw level codes.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid, LevelError> {
        let mut tiles = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let decoded = row
                .as_ref()
                .iter()
                .enumerate()
                .map(|(x, &code)| Tile::from_code(code).ok_or(LevelError::UnknownTileCode { code, x, y }))
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(decoded);
        }
        Grid::from_tiles(tiles)
    }

    /// Build from text glyph rows (see `Tile::from_glyph`).
    pub fn from_glyphs<S: AsRef<str>>(rows: &[S]) -> Result<Grid, LevelError> {
        let mut tiles = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let decoded = row
                .as_ref()
                .chars()
                .enumerate()
                .map(|(x, glyph)| Tile::from_glyph(glyph).ok_or(LevelError::UnknownGlyph { glyph, x, y }))
                .collect::<Result<Vec<_>, _>>()?;
            tiles.push(decoded);
        }
        Grid::from_tiles(tiles)
    }

    /// Validate shape and locate the player.
    pub fn from_tiles(tiles: Vec<Vec<Tile>>) -> Result<Grid, LevelError> {
        let height = tiles.len();
        let width = tiles.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut player: Option<(usize, usize)> = None;
        for (y, row) in tiles.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RaggedRow { row: y, expected: width, actual: row.len() });
            }
            for (x, &tile) in row.iter().enumerate() {
                if tile != Tile::Player {
                    continue;
                }
                if let Some(first) = player {
                    return Err(LevelError::MultiplePlayers { first, second: (x, y) });
                }
                player = Some((x, y));
            }
        }

        let (px, py) = player.ok_or(LevelError::MissingPlayer)?;
        Ok(Grid { tiles, width, height, player: Player::new(px, py) })
    }
}

// ── Queries ──

impl Grid {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    /// Tile at (x, y), `None` outside the grid.
    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Option<Tile> {
        self.tiles.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Is (x, y) an in-bounds Air cell? Outside the grid is never Air.
    #[inline]
    pub fn is_air_at(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).map_or(false, Tile::is_air)
    }

    /// In-bounds neighbor of (x, y) at offset (dx, dy).
    pub fn offset(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// Rows, top to bottom, for renderers.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }

    /// Snapshot as raw level codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.tiles.iter().map(|row| row.iter().map(|t| t.code()).collect()).collect()
    }

    /// Snapshot as glyph rows; handy for logs and assertions.
    pub fn to_glyphs(&self) -> Vec<String> {
        self.tiles.iter().map(|row| row.iter().map(|t| t.glyph()).collect()).collect()
    }
}

// ── Mutation ──

impl Grid {
    /// Replace a tile. Out-of-bounds writes are ignored.
    ///
    /// Callers must not write `Tile::Player` or overwrite the player cell;
    /// use `move_player_to` for that.
    #[inline]
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        if let Some(cell) = self.tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = tile;
        }
    }

    /// Vacate the player cell to Air, place the player at (x, y).
    /// Returns false (and changes nothing) when (x, y) is outside the grid.
    pub fn move_player_to(&mut self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let Player { x: old_x, y: old_y } = self.player;
        self.tiles[old_y][old_x] = Tile::Air;
        self.tiles[y][x] = Tile::Player;
        self.player = Player::new(x, y);
        true
    }
}
