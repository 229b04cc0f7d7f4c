//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Left,
    Right,
    Down,
}

impl HeldKey {
    pub fn action(self) -> GameAction {
        match self {
            HeldKey::Left => GameAction::MoveLeft,
            HeldKey::Right => GameAction::MoveRight,
            HeldKey::Down => GameAction::SoftDrop,
        }
    }
}

/// Classify a movement key (arrows, WASD-style and vi-style letters).
pub fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left => Some(HeldKey::Left),
        KeyCode::Right => Some(HeldKey::Right),
        KeyCode::Down => Some(HeldKey::Down),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'h' => Some(HeldKey::Left),
            'd' | 'l' => Some(HeldKey::Right),
            's' | 'j' => Some(HeldKey::Down),
            _ => None,
        },
        _ => None,
    }
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if let Some(held) = held_key(key.code) {
        return Some(held.action());
    }

    match key.code {
        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::RotateCw)
        }

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
