//! Flux Runner simulation core.
//!
//! `domain` holds tiles, gravity and movement rules; `sim` owns the running
//! world, the per-tick step driver and level loading. Terminal I/O lives in
//! the binary only.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;

pub use domain::entity::MoveDir;
pub use domain::grid::Grid;
pub use domain::tile::Tile;
pub use error::LevelError;
pub use sim::world::WorldState;
