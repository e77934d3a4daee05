//! Application configuration.
//!
//! Reads an optional `sumblocks.toml` (explicit `--config PATH`, else next to
//! the executable, else the current directory). Missing file or missing keys
//! fall back to defaults; a file that exists but does not parse is an error.
//! Environment variables override the file, CLI flags override both.
//!
//! ```toml
//! [game]
//! seed = 42
//! mode = "time"
//!
//! [tips]
//! enabled = true
//! endpoint = "http://127.0.0.1:11434/api/generate"
//! model = "llama3.2"
//! timeout_ms = 8000
//!
//! [log]
//! path = "sumblocks.log"
//! level = "debug"
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::Deserialize;

use crate::tips::{TipConfig, TipProvider};
use crate::types::Mode;

pub const CONFIG_FILE_NAME: &str = "sumblocks.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub game: GameSettings,
    pub tips: TipConfig,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSettings {
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Skip the start screen and begin in this mode.
    pub mode: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Log file; `None` disables logging.
    pub path: Option<PathBuf>,
    pub level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            path: None,
            level: LevelFilter::Info,
        }
    }
}

// ── TOML schema ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    tips: TomlTips,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlGame {
    seed: Option<u32>,
    mode: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlTips {
    enabled: Option<bool>,
    provider: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
    timeout_ms: Option<u64>,
    max_chars: Option<usize>,
    fallback: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlLog {
    path: Option<PathBuf>,
    level: Option<String>,
}

impl AppConfig {
    /// Load configuration from disk and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match find_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: TomlConfig = toml::from_str(text)?;
        let mut config = Self::default();

        config.game.seed = raw.game.seed;
        if let Some(mode) = raw.game.mode {
            config.game.mode = Some(parse_mode(&mode)?);
        }

        let tips = &mut config.tips;
        if let Some(v) = raw.tips.enabled {
            tips.enabled = v;
        }
        if let Some(v) = raw.tips.provider {
            tips.provider = TipProvider::from_str(&v)
                .ok_or_else(|| anyhow!("unknown tips.provider {:?} (expected http or offline)", v))?;
        }
        if let Some(v) = raw.tips.endpoint {
            tips.endpoint = v;
        }
        if let Some(v) = raw.tips.model {
            tips.model = v;
        }
        if let Some(v) = raw.tips.timeout_ms {
            tips.timeout_ms = v;
        }
        if let Some(v) = raw.tips.max_chars {
            tips.max_chars = v;
        }
        if let Some(v) = raw.tips.fallback {
            tips.fallback = v;
        }

        config.log.path = raw.log.path;
        if let Some(level) = raw.log.level {
            config.log.level = parse_level(&level)?;
        }

        Ok(config)
    }

    /// Apply `SUMBLOCKS_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(seed) = env::var("SUMBLOCKS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            self.game.seed = Some(seed);
        }
        self.tips.apply_env();
        if let Ok(path) = env::var("SUMBLOCKS_LOG_PATH") {
            let path = path.trim();
            if !path.is_empty() {
                self.log.path = Some(PathBuf::from(path));
            }
        }
        if let Some(level) = env::var("SUMBLOCKS_LOG_LEVEL")
            .ok()
            .and_then(|s| parse_level(&s).ok())
        {
            self.log.level = level;
        }
    }
}

pub fn parse_mode(s: &str) -> Result<Mode> {
    Mode::from_str(s).ok_or_else(|| anyhow!("unknown mode {:?} (expected classic or time)", s))
}

fn parse_level(s: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(s.trim()).map_err(|_| anyhow!("unknown log level {:?}", s))
}

/// First `sumblocks.toml` found next to the executable or in the CWD.
fn find_config_file() -> Option<PathBuf> {
    let mut dirs = Vec::with_capacity(2);
    if let Ok(exe) = env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = env::current_dir() {
        if !dirs.contains(&cwd) {
            dirs.push(cwd);
        }
    }
    dirs.into_iter()
        .map(|d| d.join(CONFIG_FILE_NAME))
        .find(|p| p.is_file())
}
