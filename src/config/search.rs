//! Search engine configuration.

use super::{parse_env_bool, parse_env_var, Config, ValidationError};
use crate::error::{Result, SkipMatchError};
use crate::search::{Engine, BLOCK, WORD_BITS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`Searcher`](crate::search::Searcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Engine to compile patterns with
    pub engine: Engine,
    /// Shortest pattern for which `Engine::Auto` picks the weak factor
    /// recognizer; must be at least the factor block size
    pub factor_engine_min_len: usize,
    /// Time every scan and log its statistics
    pub collect_stats: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Auto,
            factor_engine_min_len: 16,
            collect_stats: false,
        }
    }
}

impl SearchConfig {
    /// Configuration that always compiles `engine`
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }
}

impl Config for SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.factor_engine_min_len < BLOCK {
            let err = ValidationError::new(
                "factor_engine_min_len",
                &self.factor_engine_min_len.to_string(),
                "below the weak factor block size",
            )
            .with_suggestion(&format!(">= {}", BLOCK));
            return Err(SkipMatchError::configuration(err.to_string()));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.engine = parse_env_var(&format!("{}SEARCH_ENGINE", prefix), config.engine);
        config.factor_engine_min_len = parse_env_var(
            &format!("{}SEARCH_FACTOR_MIN_LEN", prefix),
            config.factor_engine_min_len,
        );
        config.collect_stats =
            parse_env_bool(&format!("{}SEARCH_COLLECT_STATS", prefix), config.collect_stats);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        // Shift vector covers every pattern its word holds directly; the
        // weak factor recognizer takes over where the prefix filter would
        // start verifying tails.
        Self {
            engine: Engine::Auto,
            factor_engine_min_len: WORD_BITS + 1,
            collect_stats: false,
        }
    }

    fn memory_preset() -> Self {
        // The shift vector table is 1 KiB against 8 KiB for the factor table.
        Self {
            engine: Engine::ShiftVector,
            factor_engine_min_len: 16,
            collect_stats: false,
        }
    }

    fn realtime_preset() -> Self {
        // One engine for every length and no per-scan timing.
        Self {
            engine: Engine::ShiftVector,
            factor_engine_min_len: 16,
            collect_stats: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            SkipMatchError::configuration(format!("Failed to serialize search config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            SkipMatchError::configuration(format!("Failed to parse search config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
