/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Command phase: pop queued commands last-in first-out, resolving
///      each against the grid left by the previous one
///   2. Gravity phase: sweep rows bottom to top, left to right within a
///      row, updating every loose tile once
///
/// The bottom-up row order matters: a tile that drops moves into a row
/// that has already been swept, so nothing falls twice in one tick.

use tracing::{debug, trace};

use crate::domain::grid::Grid;
use crate::domain::physics::{self, FallOutcome};
use crate::domain::rules::{self, MoveOutcome};
use super::event::GameEvent;
use super::world::WorldState;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.ticks += 1;

    resolve_commands(world, &mut events);
    resolve_gravity(&mut world.grid, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════

fn resolve_commands(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    while let Some(dir) = world.commands.pop() {
        let outcome = rules::resolve(&mut world.grid, dir);
        debug!(tick = world.ticks, ?dir, ?outcome, "command resolved");

        match outcome {
            MoveOutcome::Blocked => {}
            MoveOutcome::Walked { x, y } => {
                events.push(GameEvent::PlayerMoved { x, y });
            }
            MoveOutcome::Pushed { from_x, to_x, y } => {
                events.push(GameEvent::BlockPushed { from_x, to_x, y });
                events.push(GameEvent::PlayerMoved { x: from_x, y });
            }
            MoveOutcome::Unlocked { family, removed, x, y } => {
                debug!(?family, removed, "locks removed");
                events.push(GameEvent::LocksRemoved { family, count: removed });
                events.push(GameEvent::PlayerMoved { x, y });
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Gravity
// ══════════════════════════════════════════════════════════════

fn resolve_gravity(grid: &mut Grid, events: &mut Vec<GameEvent>) {
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            match physics::update(grid, x, y) {
                FallOutcome::Still => {}
                FallOutcome::Fell => {
                    trace!(x, from = y, to = y + 1, "block fell");
                    events.push(GameEvent::BlockFell { x, y: y + 1 });
                }
                FallOutcome::Landed => {
                    trace!(x, y, "block landed");
                    events.push(GameEvent::BlockLanded { x, y });
                }
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{MoveDir, Player};
    use crate::domain::grid::tests::grid_from;
    use crate::domain::key::LockFamily;
    use crate::domain::physics::FallingState;
    use crate::domain::tile::Tile;

    fn world_from(rows: &[&str]) -> WorldState {
        WorldState::new("test", grid_from(rows))
    }

    fn glyphs(world: &WorldState) -> Vec<String> {
        world.grid.to_glyphs()
    }

    fn rows(rows: &[&str]) -> Vec<String> {
        rows.iter().map(|r| r.to_string()).collect()
    }

    // ── Command phase ──

    #[test]
    fn commands_resolve_most_recent_first() {
        // Right then Down: LIFO resolves Down first (into the wall), then Right.
        let mut world = world_from(&["#####", "#P  #", "#####"]);
        world.enqueue(MoveDir::Right);
        world.enqueue(MoveDir::Down);
        let events = world.tick();
        assert_eq!(events, vec![GameEvent::PlayerMoved { x: 2, y: 1 }]);
        assert!(world.commands.is_empty());
    }

    #[test]
    fn lifo_order_changes_outcome() {
        // Enqueue Up then Right. Right resolves first (player to (2,2)),
        // then Up from there into the open cell (2,1).
        let mut world = world_from(&["####", "## #", "#P #", "####"]);
        world.enqueue(MoveDir::Up);
        world.enqueue(MoveDir::Right);
        world.tick();
        assert_eq!(world.player(), Player::new(2, 1));

        // FIFO would have tried Up first into the wall at (1,1), then Right.
        let mut fifo = world_from(&["####", "## #", "#P #", "####"]);
        fifo.enqueue(MoveDir::Right);
        fifo.enqueue(MoveDir::Up);
        fifo.tick();
        assert_eq!(fifo.player(), Player::new(2, 2));
    }

    #[test]
    fn each_command_sees_previous_result() {
        let mut world = world_from(&["######", "#P   #", "######"]);
        world.enqueue(MoveDir::Right);
        world.enqueue(MoveDir::Right);
        world.enqueue(MoveDir::Right);
        world.tick();
        assert_eq!(world.player(), Player::new(4, 1));
    }

    #[test]
    fn push_emits_push_and_move() {
        let mut world = world_from(&["#####", "#Pb #", "#####"]);
        world.enqueue(MoveDir::Right);
        let events = world.tick();
        assert_eq!(
            events,
            vec![
                GameEvent::BlockPushed { from_x: 2, to_x: 3, y: 1 },
                GameEvent::PlayerMoved { x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn key_emits_lock_removal() {
        let mut world = world_from(&["######", "#Pc C#", "######"]);
        world.enqueue(MoveDir::Right);
        let events = world.tick();
        assert_eq!(events[0], GameEvent::LocksRemoved { family: LockFamily::Two, count: 1 });
        assert_eq!(glyphs(&world), rows(&["######", "# P  #", "######"]));
    }

    // ── Gravity phase ──

    #[test]
    fn column_of_stones_falls_together() {
        let mut world = world_from(&["#o#", "#o#", "# #", "# #", "#P#"]);
        let events = world.tick();
        assert_eq!(
            events,
            vec![
                GameEvent::BlockFell { x: 1, y: 2 },
                GameEvent::BlockFell { x: 1, y: 1 },
            ]
        );
        assert_eq!(glyphs(&world), rows(&["# #", "#O#", "#O#", "# #", "#P#"]));

        world.tick();
        assert_eq!(glyphs(&world), rows(&["# #", "# #", "#O#", "#O#", "#P#"]));

        let events = world.tick();
        assert_eq!(
            events,
            vec![
                GameEvent::BlockLanded { x: 1, y: 3 },
                GameEvent::BlockLanded { x: 1, y: 2 },
            ]
        );
        assert_eq!(glyphs(&world), rows(&["# #", "# #", "#o#", "#o#", "#P#"]));
    }

    #[test]
    fn stone_falls_one_row_per_tick() {
        let mut world = world_from(&["#o#", "# #", "# #", "#P#"]);
        world.tick();
        assert_eq!(world.tile_at(1, 1), Some(Tile::Stone(FallingState::Falling)));
        assert_eq!(world.tile_at(1, 2), Some(Tile::Air));
    }

    #[test]
    fn gravity_runs_after_commands() {
        // Stepping out from under a stone lets it fall in the same tick.
        let mut world = world_from(&["####", "#o #", "#P #", "####"]);
        world.enqueue(MoveDir::Right);
        world.tick();
        assert_eq!(world.player(), Player::new(2, 2));
        assert_eq!(world.tile_at(1, 2), Some(Tile::Stone(FallingState::Falling)));
        assert_eq!(world.tile_at(1, 1), Some(Tile::Air));
    }

    #[test]
    fn pushed_box_over_gap_does_not_happen() {
        let mut world = world_from(&["#####", "#Pb #", "### #", "#####"]);
        world.enqueue(MoveDir::Right);
        let events = world.tick();
        assert!(events.is_empty());
        assert_eq!(world.player(), Player::new(1, 1));
    }

    #[test]
    fn ticks_are_counted() {
        let mut world = world_from(&["P"]);
        world.tick();
        world.tick();
        assert_eq!(world.ticks, 2);
    }
}
