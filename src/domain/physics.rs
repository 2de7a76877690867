/// Gravity and pushing for loose tiles (stones and boxes).
///
/// ## Falling state machine
///
/// A loose tile carries a `FallingState`. Once per tick it looks at the
/// cell directly below and asks that tile for its `support_state()`:
///
/// ┌───────────────────────────────┬──────────────┬─────────────────────┐
/// │ Cell below                     │ New state    │ Effect              │
/// ├───────────────────────────────┼──────────────┼─────────────────────┤
/// │ Air                            │ Falling      │ drop one row        │
/// │ Stone/Box that is Falling      │ Falling      │ wait (cell occupied)│
/// │ Anything else / bottom edge    │ Resting      │ none                │
/// └───────────────────────────────┴──────────────┴─────────────────────┘
///
/// The sweep runs bottom row first, so a tile that drops lands in a row
/// that has already been visited and is not updated twice.
///
/// ## Push rule
///
/// Only a Resting tile can be pushed, and only sideways. With the player at
/// `(px, py)` pushing by `dx`, the tile moves from `px + dx` to `px + 2dx`
/// iff the landing cell is Air and the cell under the landing cell is not
/// Air. The grid edge counts as support.

use super::grid::Grid;
use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallingState {
    Resting,
    Falling,
}

impl FallingState {
    pub fn is_falling(self) -> bool {
        matches!(self, FallingState::Falling)
    }
}

/// What a gravity update did to one loose tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallOutcome {
    /// Nothing moved and the state did not go from Falling to Resting.
    Still,
    /// Dropped from (x, y) to (x, y + 1).
    Fell,
    /// Was Falling, is now Resting.
    Landed,
}

/// Support seen from (x, y): the `support_state` of the tile below,
/// Resting at the bottom edge.
#[inline]
pub fn support_below(grid: &Grid, x: usize, y: usize) -> FallingState {
    grid.offset(x, y, 0, 1)
        .and_then(|(bx, by)| grid.tile_at(bx, by))
        .map_or(FallingState::Resting, Tile::support_state)
}

/// Advance the loose tile at (x, y) by one tick. Non-loose tiles are
/// left alone.
pub fn update(grid: &mut Grid, x: usize, y: usize) -> FallOutcome {
    let tile = match grid.tile_at(x, y) {
        Some(t) => t,
        None => return FallOutcome::Still,
    };
    let previous = match tile.falling_state() {
        Some(s) => s,
        None => return FallOutcome::Still,
    };

    match support_below(grid, x, y) {
        FallingState::Falling => {
            let falling = tile.with_falling_state(FallingState::Falling);
            if grid.is_air_at(x, y + 1) {
                grid.set_tile(x, y + 1, falling);
                grid.set_tile(x, y, Tile::Air);
                FallOutcome::Fell
            } else {
                // Falling tile below that has not cleared the cell yet.
                grid.set_tile(x, y, falling);
                FallOutcome::Still
            }
        }
        FallingState::Resting => {
            grid.set_tile(x, y, tile.with_falling_state(FallingState::Resting));
            if previous.is_falling() { FallOutcome::Landed } else { FallOutcome::Still }
        }
    }
}

/// Try to push `tile`, which sits next to the player at `px + dx`.
/// On success the tile lands at `px + 2dx` and the player steps into the
/// vacated cell. Returns whether the push happened.
pub fn push_horizontal(grid: &mut Grid, tile: Tile, dx: i32) -> bool {
    if tile.falling_state() != Some(FallingState::Resting) {
        return false;
    }

    let player = grid.player();
    let (pushed_x, row) = match grid.offset(player.x, player.y, dx, 0) {
        Some(p) => p,
        None => return false,
    };
    let (landing_x, _) = match grid.offset(player.x, player.y, 2 * dx, 0) {
        Some(p) => p,
        None => return false,
    };

    if !grid.is_air_at(landing_x, row) || grid.is_air_at(landing_x, row + 1) {
        return false;
    }

    grid.set_tile(landing_x, row, tile);
    grid.move_player_to(pushed_x, row)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
