//! Keyboard-to-intent mapping.
//!
//! Each game reads the same [`GameIntent`] vocabulary; this module is the
//! only place that knows which crossterm key codes feed it. Bindings differ
//! slightly per game (the block game spends W/Q on rotation, the runners on
//! movement).

use crate::games::{GameIntent, GameKind};
use crossterm::event::{KeyCode, KeyEvent};

/// Map a key event to an intent for the given game. `None` for keys the
/// game does not bind (Esc and menu keys are handled by the caller).
pub fn map_key(kind: GameKind, key: KeyEvent) -> Option<GameIntent> {
    match kind {
        GameKind::Runner => map_runner_key(key.code),
        GameKind::Flappy => map_flappy_key(key.code),
        GameKind::Space => map_space_key(key.code),
        GameKind::Blocks => map_blocks_key(key.code),
    }
}

fn map_runner_key(code: KeyCode) -> Option<GameIntent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameIntent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameIntent::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(' ') => {
            Some(GameIntent::Jump)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameIntent::Slide),
        KeyCode::Enter => Some(GameIntent::ConfirmStart),
        _ => None,
    }
}

fn map_flappy_key(code: KeyCode) -> Option<GameIntent> {
    match code {
        KeyCode::Up | KeyCode::Char(' ') => Some(GameIntent::Jump),
        KeyCode::Enter => Some(GameIntent::ConfirmStart),
        _ => None,
    }
}

fn map_space_key(code: KeyCode) -> Option<GameIntent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameIntent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameIntent::MoveRight),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameIntent::Jump)
        }
        KeyCode::Enter => Some(GameIntent::ConfirmStart),
        _ => None,
    }
}

fn map_blocks_key(code: KeyCode) -> Option<GameIntent> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameIntent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameIntent::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameIntent::Drop),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameIntent::RotateCcw),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameIntent::RotateCw),
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameIntent::ConfirmStart),
        _ => None,
    }
}
