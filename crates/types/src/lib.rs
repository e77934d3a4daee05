//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tip fetching).
//!
//! # Grid Dimensions
//!
//! - **Rows**: 10 (indexed 0-9, row 0 is the top "danger" row)
//! - **Columns**: 6 (indexed 0-5)
//! - **Initial fill**: the bottom 4 rows hold blocks when a game starts
//!
//! # Rules Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_BLOCK_VALUE` / `MAX_BLOCK_VALUE` | 1 / 9 | Block value range |
//! | `TARGET_MIN` / `TARGET_MAX` | 10 / 30 | Target sum range (inclusive) |
//! | `TIME_LIMIT_SECS` | 15 | Countdown length in time mode |
//! | `COUNTDOWN_TICK_MS` | 1000 | Countdown tick period |
//! | `TIP_REFRESH_PERCENT` | 30 | Chance of a new tip after a clear |
//!
//! # Examples
//!
//! ```
//! use sumblocks_types::{Mode, Position, COLS, ROWS};
//!
//! assert_eq!(Mode::from_str("TIME"), Some(Mode::Time));
//! assert_eq!(Mode::Classic.as_str(), "classic");
//!
//! let pos = Position::new(9, 0);
//! assert!(pos.in_bounds());
//! assert!(!Position::new(ROWS as u8, 0).in_bounds());
//! assert_eq!(ROWS * COLS, 60);
//! ```

/// Grid height in cells.
pub const ROWS: usize = 10;

/// Grid width in cells.
pub const COLS: usize = 6;

/// Total number of cells on the grid.
pub const GRID_CELLS: usize = ROWS * COLS;

/// Number of bottom rows filled when a game starts.
pub const INITIAL_ROWS: usize = 4;

/// Smallest value a block can carry.
pub const MIN_BLOCK_VALUE: u8 = 1;

/// Largest value a block can carry.
pub const MAX_BLOCK_VALUE: u8 = 9;

/// Lower bound of the target sum (inclusive).
pub const TARGET_MIN: u32 = 10;

/// Upper bound of the target sum (inclusive).
pub const TARGET_MAX: u32 = 30;

/// Countdown length in time mode, in seconds.
pub const TIME_LIMIT_SECS: u32 = 15;

/// Countdown tick period in milliseconds.
pub const COUNTDOWN_TICK_MS: u32 = 1000;

/// Percent chance that a successful clear refreshes the tip.
pub const TIP_REFRESH_PERCENT: u32 = 30;

/// Tip text shown before any generated tip arrives.
pub const DEFAULT_TIP: &str = "Pick blocks that add up to the target.";


/// Game mode.
///
/// - **Classic**: a new row is added after every successful clear
/// - **Time**: a new row is added whenever the countdown expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Classic,
    Time,
}

impl Mode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sumblocks_types::Mode;
    ///
    /// assert_eq!(Mode::from_str("classic"), Some(Mode::Classic));
    /// assert_eq!(Mode::from_str("Time"), Some(Mode::Time));
    /// assert_eq!(Mode::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "time" => Some(Mode::Time),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Time => "time",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Classic => "CLASSIC",
            Mode::Time => "TIME",
        }
    }
}

/// Top-level lifecycle phase.
///
/// `GameOver` is only reachable from `Playing`, and only `Start` enters `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Start,
    Playing,
    GameOver,
}

/// Reference to a grid cell. Never owns a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < ROWS && (self.col as usize) < COLS
    }

    /// Row-major flat index, or None when out of bounds.
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        Some(self.row as usize * COLS + self.col as usize)
    }
}

/// Opaque unique block token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// A numbered tile occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub value: u8,
}

/// Actions the front end can apply to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Toggle selection of a cell.
    Click { row: u8, col: u8 },
    /// Start a new game in the given mode.
    Start(Mode),
    TogglePause,
    /// Start a new game in the current mode.
    Restart,
    /// Leave the current game and return to the start screen.
    BackToStart,
}

impl GameAction {
    pub fn click(pos: Position) -> Self {
        GameAction::Click {
            row: pos.row,
            col: pos.col,
        }
    }
}

/// A request for a fresh tip, issued by the game and served by the tip fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TipRequest {
    /// Monotonic id; only the reply to the latest id is applied.
    pub id: u64,
    pub score: u32,
    pub mode: Mode,
}

/// Tip text produced for a request (possibly the fallback string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipReply {
    pub request_id: u64,
    pub text: String,
}
