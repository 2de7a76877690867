/// Keyboard input: terminal key events to game actions.
///
/// Every press is one action; movement presses become queued commands, so
/// several presses between two ticks all resolve on the next tick.
/// Release events are ignored.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use fluxrunner::MoveDir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Move(MoveDir),
    Restart,
    NextLevel,
    PrevLevel,
    Quit,
}

/// Read all pending terminal events without blocking.
pub fn drain_actions() -> io::Result<Vec<Action>> {
    let mut actions = Vec::with_capacity(4);
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if let Some(action) = map_key(key) {
                actions.push(action);
            }
        }
    }
    Ok(actions)
}

/// Arrows / WASD move, `r` restarts, `n`/`p` switch level, `q`/Esc/Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('a') => Action::Move(MoveDir::Left),
        KeyCode::Right | KeyCode::Char('d') => Action::Move(MoveDir::Right),
        KeyCode::Up | KeyCode::Char('w') => Action::Move(MoveDir::Up),
        KeyCode::Down | KeyCode::Char('s') => Action::Move(MoveDir::Down),
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('n') => Action::NextLevel,
        KeyCode::Char('p') => Action::PrevLevel,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
