pub mod entity;
pub mod grid;
pub mod key;
pub mod physics;
pub mod rules;
pub mod tile;
