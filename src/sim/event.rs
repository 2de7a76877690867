/// Events emitted during a simulation step.
/// The presentation layer consumes these for logging/animation.

use crate::domain::key::LockFamily;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { x: usize, y: usize },
    BlockPushed { from_x: usize, to_x: usize, y: usize },
    LocksRemoved { family: LockFamily, count: usize },
    /// A loose tile dropped into (x, y).
    BlockFell { x: usize, y: usize },
    BlockLanded { x: usize, y: usize },
}
