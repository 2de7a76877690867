/// Movement resolution: what happens when the player tries to enter a cell.
///
/// The command picks the neighbor cell; the tile in that cell decides.
///
/// ┌──────────────────┬─────────────────────┬──────────────────────────┐
/// │ Target tile       │ Horizontal          │ Vertical                 │
/// ├──────────────────┼─────────────────────┼──────────────────────────┤
/// │ Air, Flux         │ walk in             │ walk in                  │
/// │ Stone, Box        │ push (physics)      │ blocked                  │
/// │ Key               │ unlock, walk in     │ unlock, walk in          │
/// │ Lock, Unbreakable │ blocked             │ blocked                  │
/// │ Player            │ blocked             │ blocked                  │
/// │ Outside the grid  │ blocked             │ blocked                  │
/// └──────────────────┴─────────────────────┴──────────────────────────┘
///
/// Blocked moves are ordinary gameplay and leave the grid untouched.

use super::entity::MoveDir;
use super::grid::Grid;
use super::key::{KeyColor, LockFamily};
use super::physics;
use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Blocked,
    Walked { x: usize, y: usize },
    Pushed { from_x: usize, to_x: usize, y: usize },
    Unlocked { family: LockFamily, removed: usize, x: usize, y: usize },
}

/// Resolve one command against the current grid.
pub fn resolve(grid: &mut Grid, dir: MoveDir) -> MoveOutcome {
    let (dx, dy) = dir.delta();
    let player = grid.player();
    let (tx, ty) = match grid.offset(player.x, player.y, dx, dy) {
        Some(p) => p,
        None => return MoveOutcome::Blocked,
    };
    let tile = match grid.tile_at(tx, ty) {
        Some(t) => t,
        None => return MoveOutcome::Blocked,
    };

    if dir.is_horizontal() {
        move_horizontal(grid, tile, tx, ty, dx)
    } else {
        move_vertical(grid, tile, tx, ty)
    }
}

fn move_horizontal(grid: &mut Grid, tile: Tile, tx: usize, ty: usize, dx: i32) -> MoveOutcome {
    match tile {
        Tile::Air | Tile::Flux => walk(grid, tx, ty),
        Tile::Stone(_) | Tile::Box(_) => {
            let landing = grid.offset(tx, ty, dx, 0);
            match landing {
                Some((to_x, _)) if physics::push_horizontal(grid, tile, dx) => {
                    MoveOutcome::Pushed { from_x: tx, to_x, y: ty }
                }
                _ => MoveOutcome::Blocked,
            }
        }
        Tile::Key(color) => collect_key(grid, color, tx, ty),
        Tile::Unbreakable | Tile::Player | Tile::Lock(_) => MoveOutcome::Blocked,
    }
}

fn move_vertical(grid: &mut Grid, tile: Tile, tx: usize, ty: usize) -> MoveOutcome {
    match tile {
        Tile::Air | Tile::Flux => walk(grid, tx, ty),
        Tile::Key(color) => collect_key(grid, color, tx, ty),
        Tile::Stone(_) | Tile::Box(_) | Tile::Unbreakable | Tile::Player | Tile::Lock(_) => {
            MoveOutcome::Blocked
        }
    }
}

fn walk(grid: &mut Grid, x: usize, y: usize) -> MoveOutcome {
    if grid.move_player_to(x, y) {
        MoveOutcome::Walked { x, y }
    } else {
        MoveOutcome::Blocked
    }
}

/// Step onto the key, then clear every lock of its family.
/// Locks never share the key's cell, so the order does not change the result.
fn collect_key(grid: &mut Grid, color: KeyColor, x: usize, y: usize) -> MoveOutcome {
    if !grid.move_player_to(x, y) {
        return MoveOutcome::Blocked;
    }
    let config = color.config();
    let removed = config.remove_locks(grid);
    MoveOutcome::Unlocked { family: config.family(), removed, x, y }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
