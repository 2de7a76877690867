/// WorldState: the running level.
///
/// ## Grid layers
///
///   - `base`: the level as loaded. **Never mutated** after load.
///   - `grid`: the live grid, mutated by commands and gravity.
///
/// `restart()` resets `grid = base.clone()`.
///
/// ## Commands
///
/// Input collaborators push `MoveDir`s into `commands` between ticks.
/// The step driver pops them last-in first-out, so the most recent press
/// of a tick resolves first.

use crate::domain::entity::{MoveDir, Player};
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use crate::error::LevelError;

use super::event::GameEvent;
use super::step;

/// Pending movement commands. Single producer, single consumer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandQueue {
    pending: Vec<MoveDir>,
}

impl CommandQueue {
    pub fn new() -> Self {
        CommandQueue { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, dir: MoveDir) {
        self.pending.push(dir);
    }

    /// Most recently pushed command first.
    pub fn pop(&mut self) -> Option<MoveDir> {
        self.pending.pop()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

pub struct WorldState {
    /// Level as loaded. Never mutated after construction.
    pub base: Grid,
    /// Live grid.
    pub grid: Grid,
    pub commands: CommandQueue,
    pub level_name: String,
    pub ticks: u64,
}

// ── Construction ──

impl WorldState {
    pub fn new(level_name: &str, grid: Grid) -> Self {
        WorldState {
            base: grid.clone(),
            grid,
            commands: CommandQueue::new(),
            level_name: level_name.to_string(),
            ticks: 0,
        }
    }

    pub fn from_codes<R: AsRef<[u8]>>(level_name: &str, rows: &[R]) -> Result<Self, LevelError> {
        Ok(WorldState::new(level_name, Grid::from_codes(rows)?))
    }

    /// Back to the level as loaded; pending commands are dropped.
    pub fn restart(&mut self) {
        self.grid = self.base.clone();
        self.commands.clear();
        self.ticks = 0;
    }
}

// ── Scheduler / input API ──

impl WorldState {
    /// Queue a command for the next tick.
    pub fn enqueue(&mut self, dir: MoveDir) {
        self.commands.push(dir);
    }

    /// Advance one tick: drain commands, then apply gravity.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        step::step(self)
    }
}

// ── Read-only snapshot for renderers ──

impl WorldState {
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Option<Tile> {
        self.grid.tile_at(x, y)
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.grid.player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::tests::grid_from;

    #[test]
    fn queue_is_lifo() {
        let mut q = CommandQueue::new();
        q.push(MoveDir::Left);
        q.push(MoveDir::Up);
        q.push(MoveDir::Right);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(MoveDir::Right));
        assert_eq!(q.pop(), Some(MoveDir::Up));
        assert_eq!(q.pop(), Some(MoveDir::Left));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn restart_restores_base_and_drops_commands() {
        let mut world = WorldState::new("t", grid_from(&["####", "#P #", "####"]));
        world.enqueue(MoveDir::Right);
        world.tick();
        assert_eq!(world.player(), Player::new(2, 1));
        world.enqueue(MoveDir::Left);
        world.restart();
        assert!(world.commands.is_empty());
        assert_eq!(world.grid, world.base);
        assert_eq!(world.player(), Player::new(1, 1));
        assert_eq!(world.ticks, 0);
    }

    #[test]
    fn snapshot_accessors_follow_grid() {
        let world = WorldState::from_codes("t", &[vec![2u8, 3, 0]]).unwrap();
        assert_eq!((world.width(), world.height()), (3, 1));
        assert_eq!(world.tile_at(1, 0), Some(Tile::Player));
        assert_eq!(world.tile_at(3, 0), None);
        assert_eq!(world.level_name, "t");
    }
}
