//! File logging for the `log` facade, backed by `simplelog::WriteLogger`.
//!
//! The terminal belongs to the game UI, so log records never go to
//! stdout/stderr. Nothing is installed unless a log path is configured.

use std::fs::{File, OpenOptions};

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::LogSettings;

/// Build the file logger without installing it. `None` when no path is set.
pub fn build_logger(settings: &LogSettings) -> Result<Option<Box<WriteLogger<File>>>> {
    let Some(path) = settings.path.as_ref() else {
        return Ok(None);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();
    Ok(Some(WriteLogger::new(settings.level, config, file)))
}

/// Install the file logger. Returns false when logging is not configured.
pub fn init(settings: &LogSettings) -> Result<bool> {
    let Some(logger) = build_logger(settings)? else {
        return Ok(false);
    };
    log::set_boxed_logger(logger).context("logger already installed")?;
    log::set_max_level(settings.level);
    Ok(true)
}
