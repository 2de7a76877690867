/// Presentation layer: terminal renderer.
///
/// Each grid cell is two terminal columns wide. The frame is rebuilt from
/// the world snapshot, compared with the previous frame, and only redrawn
/// when something changed. All commands are batched with `queue!` and
/// flushed once.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use fluxrunner::domain::key::KeyColor;
use fluxrunner::domain::physics::FallingState;
use fluxrunner::{Tile, WorldState};

const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };
/// Rows above the map: status line plus a gap.
const MAP_TOP: u16 = 2;

/// One drawn cell: two characters plus colors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellStyle {
    pub text: &'static str,
    pub fg: Color,
    pub bg: Color,
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

fn key_color(color: KeyColor) -> Color {
    rgb(color.config().rgb())
}

pub fn cell_style(tile: Tile) -> CellStyle {
    let black = Color::Rgb { r: 0, g: 0, b: 0 };
    match tile {
        Tile::Air => CellStyle { text: "  ", fg: Color::White, bg: BASE_BG },
        Tile::Flux => CellStyle { text: "::", fg: rgb((0x55, 0x99, 0x55)), bg: rgb((0xcc, 0xff, 0xcc)) },
        Tile::Unbreakable => CellStyle { text: "  ", fg: Color::White, bg: rgb((0x99, 0x99, 0x99)) },
        Tile::Player => CellStyle { text: "@@", fg: Color::White, bg: rgb((0xff, 0x00, 0x00)) },
        Tile::Stone(FallingState::Resting) => CellStyle { text: "()", fg: Color::White, bg: rgb((0x00, 0x00, 0xcc)) },
        Tile::Stone(FallingState::Falling) => CellStyle { text: "\\/", fg: Color::White, bg: rgb((0x00, 0x00, 0xcc)) },
        Tile::Box(FallingState::Resting) => CellStyle { text: "[]", fg: Color::White, bg: rgb((0x8b, 0x45, 0x13)) },
        Tile::Box(FallingState::Falling) => CellStyle { text: "\\/", fg: Color::White, bg: rgb((0x8b, 0x45, 0x13)) },
        Tile::Key(color) => CellStyle { text: "o-", fg: black, bg: key_color(color) },
        Tile::Lock(color) => CellStyle { text: "<>", fg: black, bg: key_color(color) },
    }
}

/// Terminal row for map row `y`. Rows past the terminal's range clamp.
fn screen_row(y: usize) -> u16 {
    u16::try_from(y).unwrap_or(u16::MAX).saturating_add(MAP_TOP)
}

/// Everything that decides what is on screen.
#[derive(Clone, PartialEq, Eq)]
struct Frame {
    tiles: Vec<Vec<Tile>>,
    status: String,
}

pub struct Renderer {
    out: BufWriter<Stdout>,
    last: Option<Frame>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { out: BufWriter::new(io::stdout()), last: None }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(BASE_BG),
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Draw the world with a one-line status header. No-op if nothing changed.
    pub fn render(&mut self, world: &WorldState, level_idx: usize, level_count: usize) -> io::Result<()> {
        let frame = Frame {
            tiles: world.grid.rows().map(<[Tile]>::to_vec).collect(),
            status: format!(
                " {} ({}/{})  tick {}   arrows/WASD move  r restart  n/p level  q quit ",
                world.level_name,
                level_idx + 1,
                level_count,
                world.ticks,
            ),
        };
        if self.last.as_ref() == Some(&frame) {
            return Ok(());
        }

        // A different-sized level leaves old cells behind; wipe first.
        let resized = self.last.as_ref().map_or(true, |last| {
            last.tiles.len() != frame.tiles.len()
                || last.tiles.first().map(Vec::len) != frame.tiles.first().map(Vec::len)
        });
        if resized {
            queue!(self.out, SetBackgroundColor(BASE_BG), Clear(ClearType::All))?;
        }

        queue!(
            self.out,
            MoveTo(0, 0),
            SetForegroundColor(Color::Rgb { r: 255, g: 200, b: 50 }),
            SetBackgroundColor(BASE_BG),
            Print(&frame.status),
            Clear(ClearType::UntilNewLine)
        )?;

        for (y, row) in frame.tiles.iter().enumerate() {
            queue!(self.out, MoveTo(0, screen_row(y)))?;
            for &tile in row {
                let style = cell_style(tile);
                queue!(
                    self.out,
                    SetForegroundColor(style.fg),
                    SetBackgroundColor(style.bg),
                    Print(style.text)
                )?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        self.last = Some(frame);
        Ok(())
    }
}
