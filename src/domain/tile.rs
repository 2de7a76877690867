/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here. Behavior that mutates the
/// grid (entering, pushing, falling) lives in `rules` and `physics`.

use super::key::KeyColor;
use super::physics::FallingState;

/// Level data codes, in file order.
pub mod code {
    pub const AIR: u8 = 0;
    pub const FLUX: u8 = 1;
    pub const UNBREAKABLE: u8 = 2;
    pub const PLAYER: u8 = 3;
    pub const STONE: u8 = 4;
    pub const FALLING_STONE: u8 = 5;
    pub const BOX: u8 = 6;
    pub const FALLING_BOX: u8 = 7;
    pub const KEY1: u8 = 8;
    pub const LOCK1: u8 = 9;
    pub const KEY2: u8 = 10;
    pub const LOCK2: u8 = 11;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Air,
    Flux,        // Soft, walkable, holds things up
    Unbreakable, // Wall
    Player,      // Marker for the single live player cell
    Stone(FallingState),
    Box(FallingState),
    Key(KeyColor),
    Lock(KeyColor),
}

impl Tile {
    /// Decode a raw level code. `None` for codes outside the legend.
    pub fn from_code(raw: u8) -> Option<Tile> {
        let tile = match raw {
            code::AIR => Tile::Air,
            code::FLUX => Tile::Flux,
            code::UNBREAKABLE => Tile::Unbreakable,
            code::PLAYER => Tile::Player,
            code::STONE => Tile::Stone(FallingState::Resting),
            code::FALLING_STONE => Tile::Stone(FallingState::Falling),
            code::BOX => Tile::Box(FallingState::Resting),
            code::FALLING_BOX => Tile::Box(FallingState::Falling),
            code::KEY1 => Tile::Key(KeyColor::Yellow),
            code::LOCK1 => Tile::Lock(KeyColor::Yellow),
            code::KEY2 => Tile::Key(KeyColor::Blue),
            code::LOCK2 => Tile::Lock(KeyColor::Blue),
            _ => return None,
        };
        Some(tile)
    }

    /// Encode back to the level code (inverse of `from_code`).
    pub fn code(self) -> u8 {
        match self {
            Tile::Air => code::AIR,
            Tile::Flux => code::FLUX,
            Tile::Unbreakable => code::UNBREAKABLE,
            Tile::Player => code::PLAYER,
            Tile::Stone(FallingState::Resting) => code::STONE,
            Tile::Stone(FallingState::Falling) => code::FALLING_STONE,
            Tile::Box(FallingState::Resting) => code::BOX,
            Tile::Box(FallingState::Falling) => code::FALLING_BOX,
            Tile::Key(KeyColor::Yellow) => code::KEY1,
            Tile::Lock(KeyColor::Yellow) => code::LOCK1,
            Tile::Key(KeyColor::Blue) => code::KEY2,
            Tile::Lock(KeyColor::Blue) => code::LOCK2,
        }
    }

    /// Decode a text-level glyph.
    pub fn from_glyph(ch: char) -> Option<Tile> {
        let tile = match ch {
            ' ' => Tile::Air,
            ':' => Tile::Flux,
            '#' => Tile::Unbreakable,
            'P' => Tile::Player,
            'o' => Tile::Stone(FallingState::Resting),
            'O' => Tile::Stone(FallingState::Falling),
            'b' => Tile::Box(FallingState::Resting),
            'B' => Tile::Box(FallingState::Falling),
            'y' => Tile::Key(KeyColor::Yellow),
            'Y' => Tile::Lock(KeyColor::Yellow),
            'c' => Tile::Key(KeyColor::Blue),
            'C' => Tile::Lock(KeyColor::Blue),
            _ => return None,
        };
        Some(tile)
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Air => ' ',
            Tile::Flux => ':',
            Tile::Unbreakable => '#',
            Tile::Player => 'P',
            Tile::Stone(FallingState::Resting) => 'o',
            Tile::Stone(FallingState::Falling) => 'O',
            Tile::Box(FallingState::Resting) => 'b',
            Tile::Box(FallingState::Falling) => 'B',
            Tile::Key(KeyColor::Yellow) => 'y',
            Tile::Lock(KeyColor::Yellow) => 'Y',
            Tile::Key(KeyColor::Blue) => 'c',
            Tile::Lock(KeyColor::Blue) => 'C',
        }
    }

    /// Is this the empty tile?
    pub fn is_air(self) -> bool {
        matches!(self, Tile::Air)
    }

    /// Is this a lock opened by the family-1 key?
    pub fn is_lock1(self) -> bool {
        match self {
            Tile::Lock(color) => color.config().is_family1(),
            _ => false,
        }
    }

    /// Is this a lock opened by the family-2 key?
    pub fn is_lock2(self) -> bool {
        match self {
            Tile::Lock(color) => !color.config().is_family1(),
            _ => false,
        }
    }

    /// Gravity state of a loose tile, `None` for everything else.
    pub fn falling_state(self) -> Option<FallingState> {
        match self {
            Tile::Stone(state) | Tile::Box(state) => Some(state),
            _ => None,
        }
    }

    /// Same loose tile with a different gravity state.
    /// Non-loose tiles are returned unchanged.
    pub fn with_falling_state(self, state: FallingState) -> Tile {
        match self {
            Tile::Stone(_) => Tile::Stone(state),
            Tile::Box(_) => Tile::Box(state),
            other => other,
        }
    }

    /// What a loose tile sitting on top of this one should become.
    /// Air, and loose tiles that are themselves falling, give no support.
    pub fn support_state(self) -> FallingState {
        match self {
            Tile::Air => FallingState::Falling,
            Tile::Stone(state) | Tile::Box(state) => state,
            Tile::Flux | Tile::Unbreakable | Tile::Player | Tile::Key(_) | Tile::Lock(_) => {
                FallingState::Resting
            }
        }
    }
}
