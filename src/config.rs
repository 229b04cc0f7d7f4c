//! Driver configuration (environment variables) and logging setup.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | piece RNG seed | clock |
//! | `BLOCKFALL_RANDOMIZER` | `uniform` or `bag` | `uniform` |
//! | `BLOCKFALL_TICK_MS` | driver timestep (>= 1) | 16 |
//! | `BLOCKFALL_LOG_FILE` | write logs to this file | off |
//!
//! Unparseable values fall back to the defaults.

use std::env;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::core::rng::time_seed;
use crate::core::{GameState, Randomizer};
use crate::types::TICK_MS;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const RANDOMIZER_VAR: &str = "BLOCKFALL_RANDOMIZER";
pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";
pub const LOG_FILE_VAR: &str = "BLOCKFALL_LOG_FILE";

/// Settings for the terminal driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub seed: Option<u32>,
    pub randomizer: Randomizer,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: None,
            randomizer: Randomizer::Uniform,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl DriverConfig {
    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup(SEED_VAR).and_then(|s| s.trim().parse().ok());

        let randomizer = lookup(RANDOMIZER_VAR)
            .and_then(|s| Randomizer::from_str(&s))
            .unwrap_or(defaults.randomizer);

        let tick_ms = lookup(TICK_MS_VAR)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|ms| ms.max(1))
            .unwrap_or(defaults.tick_ms);

        let log_path = lookup(LOG_FILE_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            seed,
            randomizer,
            tick_ms,
            log_path,
        }
    }

    /// A fresh, unstarted game using the configured seed and randomizer
    pub fn new_game(&self) -> GameState {
        let seed = self.seed.unwrap_or_else(time_seed);
        GameState::with_randomizer(seed, self.randomizer)
    }
}

/// Initialise `env_logger` when a log file is configured.
///
/// The terminal owns stdout and stderr while the game runs, so without a log
/// file nothing is installed and log macros are no-ops. The filter comes from
/// `RUST_LOG` (default `info`). Returns whether a logger was installed.
pub fn init_logging(config: &DriverConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> DriverConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DriverConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), DriverConfig::default());
        assert_eq!(DriverConfig::default().tick_ms, 16);
    }

    #[test]
    fn test_reads_all_variables() {
        let c = config(&[
            (SEED_VAR, " 42 "),
            (RANDOMIZER_VAR, "bag"),
            (TICK_MS_VAR, "10"),
            (LOG_FILE_VAR, "/tmp/blockfall.log"),
        ]);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.randomizer, Randomizer::SevenBag);
        assert_eq!(c.tick_ms, 10);
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let c = config(&[
            (SEED_VAR, "-3"),
            (RANDOMIZER_VAR, "fair"),
            (TICK_MS_VAR, "fast"),
            (LOG_FILE_VAR, "   "),
        ]);
        assert_eq!(c, DriverConfig::default());
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        assert_eq!(config(&[(TICK_MS_VAR, "0")]).tick_ms, 1);
    }

    #[test]
    fn test_seeded_games_repeat() {
        let c = config(&[(SEED_VAR, "99")]);
        let mut a = c.new_game();
        let mut b = c.new_game();
        a.start();
        b.start();
        assert_eq!(a.current().map(|p| p.kind), b.current().map(|p| p.kind));
        assert_eq!(a.next().map(|p| p.kind), b.next().map(|p| p.kind));
    }

    #[test]
    fn test_no_log_file_installs_nothing() {
        assert!(!init_logging(&DriverConfig::default()).unwrap());
    }
}
