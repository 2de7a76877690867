/// Entities: the player and the movement commands it receives.

/// Movement command. One per key press; queued until the next tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDir {
    /// Unit offset `(dx, dy)`; y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
            MoveDir::Up => (0, -1),
            MoveDir::Down => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, MoveDir::Left | MoveDir::Right)
    }
}

/// Player position. The grid keeps exactly one `Tile::Player` at `(x, y)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y }
    }
}
