/// Keys and locks.
///
/// Each key color is bound to one process-wide `KeyConfiguration`:
/// its display color, its lock family and the predicate that picks out
/// the locks it opens. Collecting a key clears every matching lock in the
/// grid in one sweep.

use super::grid::Grid;
use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum KeyColor {
    Yellow,
    Blue,
}

impl KeyColor {
    pub fn config(self) -> &'static KeyConfiguration {
        match self {
            KeyColor::Yellow => &YELLOW_KEY,
            KeyColor::Blue => &BLUE_KEY,
        }
    }
}

/// Lock family 1 or 2. Reported in events and logs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LockFamily {
    One,
    Two,
}

/// Which locks a key removes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RemoveStrategy {
    RemoveLock1,
    RemoveLock2,
}

impl RemoveStrategy {
    pub fn check(self, tile: Tile) -> bool {
        match self {
            RemoveStrategy::RemoveLock1 => tile.is_lock1(),
            RemoveStrategy::RemoveLock2 => tile.is_lock2(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct KeyConfiguration {
    rgb: (u8, u8, u8),
    family1: bool,
    remove_strategy: RemoveStrategy,
}

pub static YELLOW_KEY: KeyConfiguration = KeyConfiguration {
    rgb: (0xff, 0xcc, 0x00),
    family1: true,
    remove_strategy: RemoveStrategy::RemoveLock1,
};

pub static BLUE_KEY: KeyConfiguration = KeyConfiguration {
    rgb: (0x00, 0xcc, 0xff),
    family1: false,
    remove_strategy: RemoveStrategy::RemoveLock2,
};

impl KeyConfiguration {
    /// Display color as RGB.
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    pub fn is_family1(&self) -> bool {
        self.family1
    }

    pub fn family(&self) -> LockFamily {
        if self.family1 { LockFamily::One } else { LockFamily::Two }
    }

    /// Replace every matching lock in the grid with Air.
    /// Returns how many locks were removed.
    pub fn remove_locks(&self, grid: &mut Grid) -> usize {
        remove(grid, self.remove_strategy)
    }
}

/// Full-grid sweep: every tile the strategy accepts becomes Air.
fn remove(grid: &mut Grid, strategy: RemoveStrategy) -> usize {
    let mut removed = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.tile_at(x, y).map_or(false, |t| strategy.check(t)) {
                grid.set_tile(x, y, Tile::Air);
                removed += 1;
            }
        }
    }
    removed
}
