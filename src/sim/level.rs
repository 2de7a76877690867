/// Level loader.
///
/// ## Sources (priority order):
///   1. `levels/` directory (individual `.txt` files, sorted by file name)
///   2. Built-in embedded levels
///
/// ## Level format (`.txt`):
///   Line 1 (optional): `# Level Name`. A `#` followed by a space always
///   starts a name, so a top map row must not begin with `# `.
///   Lines: map rows, all the same width
///
/// A row is either glyphs or, when its first non-blank character is a
/// digit, comma/space separated level codes (0-11).
///
/// ## Glyph legend:
///   ' ' = Air            ':' = Flux           '#' = Unbreakable
///   'P' = Player         'o' = Stone          'O' = Falling stone
///   'b' = Box            'B' = Falling box
///   'y' = Yellow key     'Y' = Yellow lock
///   'c' = Blue key       'C' = Blue lock

use std::path::Path;

use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use crate::error::LevelError;

/// A parsed, validated level.
#[derive(Clone, Debug)]
pub struct LevelDef {
    pub name: String,
    /// File name it came from; `None` for embedded levels.
    pub file: Option<String>,
    pub grid: Grid,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// All playable levels: the levels directory if it has any valid `.txt`
/// files, otherwise the embedded set.
pub fn load_levels(config: &GameConfig) -> Vec<LevelDef> {
    let dir = &config.levels_dir;
    if dir.is_dir() {
        let levels = load_from_directory(dir);
        if !levels.is_empty() {
            info!(dir = %dir.display(), count = levels.len(), "loaded levels from directory");
            return levels;
        }
    }
    info!("using embedded levels");
    embedded_levels()
}

/// Index of the configured start level, 0 if unset or not found.
pub fn start_index(levels: &[LevelDef], config: &GameConfig) -> usize {
    if config.start_level.is_empty() {
        return 0;
    }
    match levels.iter().position(|l| l.file.as_deref() == Some(config.start_level.as_str())) {
        Some(i) => i,
        None => {
            warn!(level = %config.start_level, "configured start level not found");
            0
        }
    }
}

/// Read and parse one level file.
pub fn load_level_file(path: &Path) -> Result<LevelDef, LevelError> {
    let content = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut def = parse_level(&content)?;
    def.file = path.file_name().map(|f| f.to_string_lossy().to_string());
    Ok(def)
}

/// Parse a single level from text content.
pub fn parse_level(content: &str) -> Result<LevelDef, LevelError> {
    let mut name = String::new();
    let mut rows: Vec<&str> = vec![];

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if rows.is_empty() && name.is_empty() && line.starts_with('#') && is_name_line(line) {
            name = line[1..].trim().to_string();
        } else if rows.is_empty() && line.is_empty() {
            continue;
        } else {
            rows.push(line);
        }
    }

    while rows.last().map_or(false, |r| r.is_empty()) {
        rows.pop();
    }

    let tiles = rows
        .iter()
        .enumerate()
        .map(|(y, row)| parse_row(row, y))
        .collect::<Result<Vec<_>, _>>()?;
    let grid = Grid::from_tiles(tiles)?;

    if name.is_empty() {
        name = "Unnamed Mine".to_string();
    }

    Ok(LevelDef { name, file: None, grid })
}

// ══════════════════════════════════════════════════════════════
// Row parsing
// ══════════════════════════════════════════════════════════════

fn parse_row(row: &str, y: usize) -> Result<Vec<Tile>, LevelError> {
    let numeric = row.trim_start().starts_with(|c: char| c.is_ascii_digit());
    if numeric {
        parse_code_row(row, y)
    } else {
        row.chars()
            .enumerate()
            .map(|(x, glyph)| Tile::from_glyph(glyph).ok_or(LevelError::UnknownGlyph { glyph, x, y }))
            .collect()
    }
}

fn parse_code_row(row: &str, y: usize) -> Result<Vec<Tile>, LevelError> {
    row.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .enumerate()
        .map(|(x, tok)| {
            let code = tok
                .parse::<u8>()
                .map_err(|_| LevelError::InvalidCode { token: tok.to_string(), row: y })?;
            Tile::from_code(code).ok_or(LevelError::UnknownTileCode { code, x, y })
        })
        .collect()
}

/// Distinguish `# Level Name` from `#########` (a wall row).
/// A name line is `#` then a space, or holds a character no row can.
fn is_name_line(line: &str) -> bool {
    let rest = &line[1..];
    rest.starts_with(' ') || rest.chars().any(|c| Tile::from_glyph(c).is_none())
}

// ══════════════════════════════════════════════════════════════
// Directory loading (individual .txt files)
// ══════════════════════════════════════════════════════════════

fn load_from_directory(dir: &Path) -> Vec<LevelDef> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read levels directory");
            return vec![];
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |e| e == "txt"))
        .collect();
    paths.sort();

    let mut levels = vec![];
    for path in paths {
        match load_level_file(&path) {
            Ok(def) => levels.push(def),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping level"),
        }
    }
    levels
}

// ══════════════════════════════════════════════════════════════
// Embedded fallback levels
// ══════════════════════════════════════════════════════════════

const FLUX_MINE: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 4, 2, 2],
    [2, 4, 2, 6, 1, 4, 2, 2],
    [2, 8, 4, 1, 1, 11, 2, 2],
    [2, 4, 1, 1, 1, 9, 10, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

const TWO_KEYS: &str = "\
# Two Keys
############
#P :: o :: #
#:b:#::#:o:#
#::y#Y: ::c#
#:  ##C##: #
#o:  :  :: #
############
";

pub fn embedded_levels() -> Vec<LevelDef> {
    let mut levels = vec![];

    match Grid::from_codes(&FLUX_MINE) {
        Ok(grid) => levels.push(LevelDef { name: "Flux Mine".to_string(), file: None, grid }),
        Err(e) => warn!(error = %e, "embedded level Flux Mine is invalid"),
    }
    match parse_level(TWO_KEYS) {
        Ok(def) => levels.push(def),
        Err(e) => warn!(error = %e, "embedded level Two Keys is invalid"),
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crate::domain::key::KeyColor;
    use crate::domain::physics::FallingState;

    #[test]
    fn glyph_level_with_name() {
        let def = parse_level("# Tiny\n####\n#Po#\n####\n").unwrap();
        assert_eq!(def.name, "Tiny");
        assert_eq!(def.grid.player(), Player::new(1, 1));
        assert_eq!(def.grid.tile_at(2, 1), Some(Tile::Stone(FallingState::Resting)));
    }

    #[test]
    fn name_made_of_glyph_letters() {
        for (text, name) in [("# Cob\n###\n#P#\n###\n", "Cob"), ("# PC\n###\n#P#\n###\n", "PC")] {
            let def = parse_level(text).unwrap();
            assert_eq!(def.name, name);
            assert_eq!((def.grid.width(), def.grid.height()), (3, 3));
        }
    }

    #[test]
    fn wall_row_is_not_a_name() {
        let def = parse_level("####\n#P #\n####").unwrap();
        assert_eq!(def.name, "Unnamed Mine");
        assert_eq!(def.grid.height(), 3);
    }

    #[test]
    fn numeric_rows() {
        let def = parse_level("# Codes\n2,2,2\n2, 3, 9\n2 2 2\n").unwrap();
        assert_eq!(def.grid.tile_at(2, 1), Some(Tile::Lock(KeyColor::Yellow)));
        assert_eq!(def.grid.width(), 3);
    }

    #[test]
    fn trailing_blank_lines_and_crlf_are_ignored() {
        let def = parse_level("# Win\r\n###\r\n#P#\r\n###\r\n\r\n\r\n").unwrap();
        assert_eq!((def.grid.width(), def.grid.height()), (3, 3));
    }

    #[test]
    fn ragged_level_is_rejected() {
        let err = parse_level("####\n#P#\n####").unwrap_err();
        assert!(matches!(err, LevelError::RaggedRow { row: 1, expected: 4, actual: 3 }));
    }

    #[test]
    fn bad_tokens_are_rejected() {
        assert!(matches!(parse_level("3,x"), Err(LevelError::InvalidCode { .. })));
        assert!(matches!(parse_level("3,42"), Err(LevelError::UnknownTileCode { code: 42, .. })));
        assert!(matches!(parse_level("P%"), Err(LevelError::UnknownGlyph { glyph: '%', .. })));
    }

    #[test]
    fn name_only_is_empty() {
        assert!(matches!(parse_level("# Nothing here\n\n"), Err(LevelError::Empty)));
    }

    #[test]
    fn embedded_levels_are_valid() {
        let levels = embedded_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].grid.player(), Player::new(1, 1));
        assert_eq!(levels[1].name, "Two Keys");
    }

    #[test]
    fn directory_levels_sorted_and_bad_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("02.txt"), "# Second\n###\n#P#\n###\n").unwrap();
        std::fs::write(dir.path().join("01.txt"), "# First\n####\n#P #\n####\n").unwrap();
        std::fs::write(dir.path().join("03.txt"), "# Broken\n###\n#  #\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let config = GameConfig {
            levels_dir: dir.path().to_path_buf(),
            start_level: "02.txt".to_string(),
            ..GameConfig::default()
        };
        let levels = load_levels(&config);
        let names: Vec<_> = levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(levels[1].file.as_deref(), Some("02.txt"));
        assert_eq!(start_index(&levels, &config), 1);
    }

    #[test]
    fn empty_directory_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig { levels_dir: dir.path().to_path_buf(), ..GameConfig::default() };
        assert_eq!(load_levels(&config).len(), embedded_levels().len());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_level_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn unknown_start_level_falls_back_to_first() {
        let levels = embedded_levels();
        let config = GameConfig { start_level: "missing.txt".to_string(), ..GameConfig::default() };
        assert_eq!(start_index(&levels, &config), 0);
    }
}
