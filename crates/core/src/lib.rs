//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and scoring.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical grids and targets
//! - **Testable**: Every rule is a plain method call on [`GameState`]
//! - **Portable**: Can run in any environment (terminal, headless, benches)
//! - **Fast**: Clicks, row insertion and snapshots do not allocate
//!
//! # Module Structure
//!
//! - [`grid`]: 10x6 grid with row insertion and column gravity
//! - [`game_state`]: selection, scoring, targets, countdown and lifecycle
//! - [`rng`]: seeded LCG for block values, targets and tip rolls
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - The bottom 4 rows start filled with blocks valued 1-9
//! - Clicking a block toggles it in the selection
//! - A selection summing exactly to the target clears those blocks, scores
//!   the target, and lets the blocks above fall
//! - Overshooting the target drops the selection (no penalty)
//! - **Classic** mode inserts a new bottom row after every clear
//! - **Time** mode inserts a new bottom row whenever the 15 second countdown
//!   expires; a clear resets the countdown
//! - Inserting a row while the top row is occupied ends the game
//!
//! # Example
//!
//! ```
//! use sumblocks_core::GameState;
//! use sumblocks_types::{GameAction, Mode, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Start(Mode::Classic));
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! // Bottom row is always filled at the start.
//! game.apply_action(GameAction::Click { row: 9, col: 0 });
//! assert!(game.selection().len() <= 1);
//! ```

pub mod game_state;
pub mod grid;
pub mod rng;
pub mod snapshot;

pub use sumblocks_types as types;

// Re-export commonly used types for convenience
pub use game_state::{CountdownKey, GameEvent, GameState, Selection, MAX_PENDING_EVENTS};
pub use grid::{Cell, Grid};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
