//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that stay "held" and need a matching release action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Left,
    Right,
    Down,
}

impl HeldKey {
    pub const ALL: [HeldKey; 3] = [HeldKey::Left, HeldKey::Right, HeldKey::Down];

    pub fn press_action(self) -> GameAction {
        match self {
            HeldKey::Left => GameAction::MoveLeft,
            HeldKey::Right => GameAction::MoveRight,
            HeldKey::Down => GameAction::SoftDropOn,
        }
    }

    pub fn release_action(self) -> GameAction {
        match self {
            HeldKey::Left => GameAction::ReleaseLeft,
            HeldKey::Right => GameAction::ReleaseRight,
            HeldKey::Down => GameAction::SoftDropOff,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            HeldKey::Left => 0,
            HeldKey::Right => 1,
            HeldKey::Down => 2,
        }
    }
}

/// Which held key a code belongs to, if any.
pub fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(HeldKey::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(HeldKey::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(HeldKey::Down)
        }
        _ => None,
    }
}

/// Map a key press to a game action.
pub fn handle_key_press(key: KeyEvent) -> Option<GameAction> {
    if let Some(held) = held_key(key.code) {
        return Some(held.press_action());
    }
    match key.code {
        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameAction::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameAction::Pause),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map a key release to a game action (only held keys produce one).
pub fn handle_key_release(key: KeyEvent) -> Option<GameAction> {
    held_key(key.code).map(HeldKey::release_action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
