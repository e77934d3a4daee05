//! Tip service configuration.
//!
//! Defaults target a local generate endpoint; [`TipConfig::apply_env`]
//! overrides whatever the caller loaded from its config file.
//!
//! - `SUMBLOCKS_TIPS_DISABLED`: "1" or "true" turns tips off
//! - `SUMBLOCKS_TIPS_PROVIDER`: "http" or "offline"
//! - `SUMBLOCKS_TIPS_ENDPOINT`: generate endpoint URL
//! - `SUMBLOCKS_TIPS_MODEL`: model name sent with each request
//! - `SUMBLOCKS_TIPS_TIMEOUT_MS`: per-request timeout

use std::env;

/// Fixed text shown whenever a tip cannot be fetched.
pub const FALLBACK_TIP: &str = "Small numbers are easy to combine. Keep a few around!";

/// Where tips come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipProvider {
    /// Text generation service over HTTP.
    #[default]
    Http,
    /// Built-in canned tips, no network.
    Offline,
}

impl TipProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Some(TipProvider::Http),
            "offline" => Some(TipProvider::Offline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipConfig {
    pub enabled: bool,
    pub provider: TipProvider,
    pub endpoint: String,
    pub model: String,
    pub timeout_ms: u64,
    /// Longer tips are truncated to this many characters.
    pub max_chars: usize,
    pub fallback: String,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: TipProvider::Http,
            endpoint: "http://127.0.0.1:11434/api/generate".to_string(),
            model: "llama3.2".to_string(),
            timeout_ms: 8000,
            max_chars: 140,
            fallback: FALLBACK_TIP.to_string(),
        }
    }
}

impl TipConfig {
    /// Apply `SUMBLOCKS_TIPS_*` environment overrides in place.
    pub fn apply_env(&mut self) {
        if let Ok(v) = env::var("SUMBLOCKS_TIPS_DISABLED") {
            let v = v.trim().to_lowercase();
            if v == "1" || v == "true" {
                self.enabled = false;
            }
        }
        if let Some(provider) = env::var("SUMBLOCKS_TIPS_PROVIDER")
            .ok()
            .and_then(|s| TipProvider::from_str(&s))
        {
            self.provider = provider;
        }
        if let Some(endpoint) = non_empty_var("SUMBLOCKS_TIPS_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_empty_var("SUMBLOCKS_TIPS_MODEL") {
            self.model = model;
        }
        if let Some(ms) = env::var("SUMBLOCKS_TIPS_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            self.timeout_ms = ms;
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
