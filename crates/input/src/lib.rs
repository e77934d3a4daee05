//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`InputAction`]s and keeps the
//! keyboard cursor used to pick cells without a mouse.

pub mod cursor;
pub mod map;

pub use sumblocks_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, should_quit, Direction, InputAction};
