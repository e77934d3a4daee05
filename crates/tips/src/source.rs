//! Tip sources.
//!
//! A [`TipSource`] turns one [`TipRequest`] into tip text or a [`TipError`].
//! Sources never see the timeout or the fallback; the fetcher owns both.

use std::future::Future;
use std::pin::Pin;

use sumblocks_types::{Mode, TipRequest};

use crate::error::TipError;

/// Boxed future returned by [`TipSource::fetch_tip`].
pub type TipFuture<'a> = Pin<Box<dyn Future<Output = Result<String, TipError>> + Send + 'a>>;

pub trait TipSource: Send + Sync {
    fn fetch_tip<'a>(&'a self, request: &'a TipRequest) -> TipFuture<'a>;

    /// Short label used in log lines.
    fn name(&self) -> &str;
}

/// Prompt sent to a text generation service for `request`.
pub fn build_prompt(request: &TipRequest) -> String {
    let mode_hint = match request.mode {
        Mode::Classic => "a new row of blocks appears after every clear",
        Mode::Time => "a new row of blocks appears whenever the 15 second timer runs out",
    };
    format!(
        "You are a friendly coach for a number puzzle. The player selects blocks \
         on a 10x6 grid whose values add up exactly to a target between 10 and 30; \
         {mode_hint}. The player's current score is {score}. \
         Reply with one short, encouraging strategy tip (at most 20 words) and nothing else.",
        score = request.score,
    )
}

/// Normalize raw tip text: collapse whitespace, drop wrapping quotes, and cut
/// to at most `max_chars` characters (ellipsis included).
pub fn clean_tip(raw: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(raw.len().min(max_chars.saturating_mul(4)));
    for word in raw.split_whitespace() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }
    let trimmed = text.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();
    let count = trimmed.chars().count();
    if count <= max_chars {
        return trimmed.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = trimmed.chars().take(max_chars - 1).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

const CANNED_TIPS: &[&str] = &[
    "Clear blocks near the top first; that row ends the game.",
    "Big numbers pair well with small ones. Keep some 1s and 2s handy.",
    "Look for three-block combos before reaching for two big ones.",
    "Clearing a tall column lets everything above it drop into reach.",
    "Overshot the target? No penalty, just start a fresh pick.",
    "In time mode every clear resets the clock. Quick small clears buy time.",
    "Scan the bottom rows first; they change least between turns.",
];

/// Offline source cycling through built-in tips.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedTipSource;

impl CannedTipSource {
    pub fn pick(request: &TipRequest) -> &'static str {
        let idx = (request.id as usize).wrapping_add(request.score as usize) % CANNED_TIPS.len();
        CANNED_TIPS[idx]
    }
}

impl TipSource for CannedTipSource {
    fn fetch_tip<'a>(&'a self, request: &'a TipRequest) -> TipFuture<'a> {
        let tip = Self::pick(request);
        Box::pin(async move { Ok(tip.to_string()) })
    }

    fn name(&self) -> &str {
        "offline"
    }
}
