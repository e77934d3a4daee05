//! Sum Blocks (workspace facade crate).
//!
//! Re-exports the game crates under `tui_sumblocks::{core,engine,input,term,tips,types}`
//! and holds the application plumbing shared by the binary and the
//! integration tests: configuration, logging and argument parsing.

pub use sumblocks_core as core;
pub use sumblocks_engine as engine;
pub use sumblocks_input as input;
pub use sumblocks_term as term;
pub use sumblocks_tips as tips;
pub use sumblocks_types as types;

pub mod cli;
pub mod config;
pub mod logging;
