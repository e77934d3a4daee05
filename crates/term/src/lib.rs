//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Map mouse clicks back to grid cells with the same layout used to draw
//! - Allow precise control over tile shape (4 chars wide, 2 rows tall per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use sumblocks_core as core;
pub use sumblocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
