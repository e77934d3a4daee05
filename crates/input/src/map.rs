//! Key and mouse mapping from terminal events to input actions.

use crate::types::{GameAction, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveCursor(Direction),
    /// Click the cell under the cursor.
    Activate,
    Game(GameAction),
}

/// Map keyboard input to input actions.
pub fn handle_key_event(key: KeyEvent) -> Option<InputAction> {
    use InputAction::{Activate, Game, MoveCursor};

    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(MoveCursor(Direction::Down))
        }

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(Activate),

        // Lifecycle
        KeyCode::Char('1') | KeyCode::Char('c') | KeyCode::Char('C') => Some(Game(GameAction::Start(Mode::Classic))),
        KeyCode::Char('2') | KeyCode::Char('t') | KeyCode::Char('T') => Some(Game(GameAction::Start(Mode::Time))),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Game(GameAction::TogglePause)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Game(GameAction::Restart)),
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => Some(Game(GameAction::BackToStart)),

        _ => None,
    }
}

/// Terminal coordinates (column, row) of a left-button press.
pub fn handle_mouse_event(ev: MouseEvent) -> Option<(u16, u16)> {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((ev.column, ev.row)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
