/// Entry point and game loop.

mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fluxrunner::config::GameConfig;
use fluxrunner::sim::level::{self, LevelDef};
use fluxrunner::WorldState;
use ui::input::{self, Action};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();
    init_logging(&config);

    let levels = level::load_levels(&config);
    if levels.is_empty() {
        eprintln!("No playable levels found.");
        return;
    }
    let start = level::start_index(&levels, &config);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&levels, start, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }
}

/// Log to the configured file; the terminal belongs to the renderer.
fn init_logging(config: &GameConfig) {
    let path = match &config.log_file {
        Some(p) => p,
        None => return,
    };
    let file = match File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fluxrunner=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
}

fn start_level(levels: &[LevelDef], idx: usize) -> WorldState {
    let def = &levels[idx];
    info!(level = %def.name, idx, "level start");
    WorldState::new(&def.name, def.grid.clone())
}

fn game_loop(
    levels: &[LevelDef],
    start: usize,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);
    let mut level_idx = start;
    let mut world = start_level(levels, level_idx);
    let mut last_tick = Instant::now();

    loop {
        for action in input::drain_actions()? {
            match action {
                Action::Move(dir) => world.enqueue(dir),
                Action::Restart => {
                    info!(level = %world.level_name, "restart");
                    world.restart();
                }
                Action::NextLevel => {
                    level_idx = (level_idx + 1) % levels.len();
                    world = start_level(levels, level_idx);
                }
                Action::PrevLevel => {
                    level_idx = (level_idx + levels.len() - 1) % levels.len();
                    world = start_level(levels, level_idx);
                }
                Action::Quit => return Ok(()),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            for event in world.tick() {
                debug!(?event, "event");
            }
            last_tick = Instant::now();
        }

        renderer.render(&world, level_idx, levels.len())?;
        std::thread::sleep(FRAME_SLEEP);
    }
}
