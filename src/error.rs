/// Level construction errors.
///
/// A level that fails any of these checks cannot be simulated; the error is
/// returned before the first tick. Nothing at simulation time is an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unknown tile code {code} at ({x}, {y})")]
    UnknownTileCode { code: u8, x: usize, y: usize },
    #[error("invalid tile code '{token}' in row {row}")]
    InvalidCode { token: String, row: usize },
    #[error("unknown tile glyph '{glyph}' at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
    #[error("level has no rows")]
    Empty,
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
    #[error("level has no player")]
    MissingPlayer,
    #[error("level has more than one player: {first:?} and {second:?}")]
    MultiplePlayers { first: (usize, usize), second: (usize, usize) },
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
