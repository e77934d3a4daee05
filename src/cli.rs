use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::config::{parse_mode, AppConfig};
use crate::types::Mode;

pub const USAGE: &str = "\
usage: tui-sumblocks [--mode classic|time] [--seed N] [--config PATH] [--no-tips]

  --mode MODE     start a game right away instead of showing the menu
  --seed N        fixed seed for block values and targets
  --config PATH   read settings from PATH instead of sumblocks.toml
  --no-tips       never contact the tip service
  -h, --help      show this message";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub mode: Option<Mode>,
    pub seed: Option<u32>,
    pub config: Option<PathBuf>,
    pub no_tips: bool,
    pub help: bool,
}

impl CliArgs {
    /// Layer flags on top of file and environment settings.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.game.mode = Some(mode);
        }
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if self.no_tips {
            config.tips.enabled = false;
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --mode"))?;
                out.mode = Some(parse_mode(v)?);
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = Some(PathBuf::from(v));
            }
            "--no-tips" => out.no_tips = true,
            "-h" | "--help" => out.help = true,
            other => {
                return Err(anyhow!("unknown argument: {}\n\n{}", other, USAGE));
            }
        }
        i += 1;
    }
    Ok(out)
}
