//! Keyboard cursor over the grid.

use crate::map::Direction;
use crate::types::{Position, COLS, ROWS};

/// Grid cursor. Starts on the bottom-left cell and stops at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            pos: Position::new((ROWS - 1) as u8, 0),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn move_by(&mut self, dir: Direction) {
        let Position { row, col } = self.pos;
        self.pos = match dir {
            Direction::Up => Position::new(row.saturating_sub(1), col),
            Direction::Down => Position::new((row + 1).min((ROWS - 1) as u8), col),
            Direction::Left => Position::new(row, col.saturating_sub(1)),
            Direction::Right => Position::new(row, (col + 1).min((COLS - 1) as u8)),
        };
    }

    /// Jump to a cell (e.g. after a mouse click). Out-of-bounds is ignored.
    pub fn set(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.pos = pos;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_bottom_left() {
        assert_eq!(Cursor::new().position(), Position::new(9, 0));
    }

    #[test]
    fn clamps_at_edges() {
        let mut c = Cursor::new();
        c.move_by(Direction::Left);
        c.move_by(Direction::Down);
        assert_eq!(c.position(), Position::new(9, 0));

        for _ in 0..20 {
            c.move_by(Direction::Up);
            c.move_by(Direction::Right);
        }
        assert_eq!(c.position(), Position::new(0, (COLS - 1) as u8));
    }

    #[test]
    fn set_ignores_out_of_bounds() {
        let mut c = Cursor::new();
        c.set(Position::new(3, 2));
        c.set(Position::new(ROWS as u8, 0));
        assert_eq!(c.position(), Position::new(3, 2));
    }
}
