//! Tip service - flavor text fetched in the background
//!
//! The game asks for a tip when an episode starts and, with some probability,
//! after each clear. Fetching is fire-and-forget: the game loop never waits,
//! and every failure (bad endpoint, HTTP error, malformed body, timeout)
//! degrades to a fixed fallback string.
//!
//! - [`TipFetcher`]: owns a small tokio runtime, runs requests, queues replies
//! - [`TipSource`]: where tip text comes from ([`HttpTipSource`], [`CannedTipSource`])
//! - [`TipConfig`]: endpoint, model, timeout, fallback

pub mod config;
pub mod error;
pub mod http;
pub mod runtime;
pub mod source;

pub use config::{TipConfig, TipProvider, FALLBACK_TIP};
pub use error::TipError;
pub use http::{parse_generate_response, HttpTipSource};
pub use runtime::TipFetcher;
pub use source::{build_prompt, clean_tip, CannedTipSource, TipFuture, TipSource};
