//! Engine selection and the configured search front end

use super::naive::BruteForceMatcher;
use super::shift_vector::ShiftVectorMatcher;
use super::sink::MatchSink;
use super::weak_factor::{WeakFactorMatcher, BLOCK};
use super::{Matcher, ScanOutcome};
use crate::config::SearchConfig;
use crate::error::{Result, SkipMatchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Which matching kernel a [`Searcher`] compiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Weak factor recognizer for long enough patterns, shift vector otherwise
    #[default]
    Auto,
    /// Shift Vector Matching
    ShiftVector,
    /// Tuned Weak Factor Recognizer
    WeakFactor,
    /// Reference scan
    BruteForce,
}

impl Engine {
    /// Resolve `Auto` for a pattern of `pattern_len` bytes
    pub fn resolve(self, pattern_len: usize, config: &SearchConfig) -> Result<Engine> {
        match self {
            Engine::Auto => {
                let chosen = if pattern_len >= config.factor_engine_min_len {
                    Engine::WeakFactor
                } else {
                    Engine::ShiftVector
                };
                log::debug!("auto-selected {} for pattern of {} bytes", chosen, pattern_len);
                Ok(chosen)
            }
            Engine::WeakFactor if pattern_len < BLOCK => {
                Err(SkipMatchError::unsupported_pattern_length(pattern_len, BLOCK))
            }
            other => Ok(other),
        }
    }

    /// Name used in configuration files and environment variables
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Auto => "auto",
            Engine::ShiftVector => "shift_vector",
            Engine::WeakFactor => "weak_factor",
            Engine::BruteForce => "brute_force",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = SkipMatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Engine::Auto),
            "shift_vector" | "svm" => Ok(Engine::ShiftVector),
            "weak_factor" | "twfr" => Ok(Engine::WeakFactor),
            "brute_force" | "naive" => Ok(Engine::BruteForce),
            other => Err(SkipMatchError::configuration(format!("unknown engine '{}'", other))),
        }
    }
}

/// Statistics for one scan through a [`Searcher`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    /// Engine that ran
    pub engine: Engine,
    /// Pattern length in bytes
    pub pattern_len: usize,
    /// Text length in bytes
    pub text_len: usize,
    /// Occurrences reported
    pub occurrences: usize,
    /// Candidate windows compared byte by byte
    pub verifications: usize,
    /// Wall time of the searching phase in microseconds
    pub elapsed_us: u64,
}

impl SearchStats {
    /// Text bytes per second, or 0 when the scan was too fast to time
    pub fn bytes_per_second(&self) -> f64 {
        if self.elapsed_us == 0 {
            return 0.0;
        }
        self.text_len as f64 / (self.elapsed_us as f64 / 1_000_000.0)
    }
}

#[derive(Debug, Clone)]
enum Compiled {
    ShiftVector(ShiftVectorMatcher),
    WeakFactor(WeakFactorMatcher),
    BruteForce(BruteForceMatcher),
}

impl Compiled {
    fn as_matcher(&self) -> &dyn Matcher {
        match self {
            Compiled::ShiftVector(m) => m as &dyn Matcher,
            Compiled::WeakFactor(m) => m as &dyn Matcher,
            Compiled::BruteForce(m) => m as &dyn Matcher,
        }
    }
}

/// A pattern compiled with the engine chosen by a [`SearchConfig`]
#[derive(Debug, Clone)]
pub struct Searcher {
    compiled: Compiled,
    engine: Engine,
    collect_stats: bool,
}

impl Searcher {
    /// Validate `config`, pick the engine and run its preprocessing
    pub fn new(pattern: &[u8], config: &SearchConfig) -> Result<Self> {
        use crate::config::Config;
        config.validate()?;

        let engine = config.engine.resolve(pattern.len(), config)?;
        let compiled = match engine {
            Engine::WeakFactor => Compiled::WeakFactor(WeakFactorMatcher::new(pattern)?),
            Engine::BruteForce => Compiled::BruteForce(BruteForceMatcher::new(pattern)),
            Engine::ShiftVector | Engine::Auto => {
                Compiled::ShiftVector(ShiftVectorMatcher::new(pattern))
            }
        };
        Ok(Self {
            compiled,
            engine,
            collect_stats: config.collect_stats,
        })
    }

    /// The engine actually compiled (never `Auto`)
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Scan `text` and return timing and counts alongside the occurrences
    pub fn scan_with_stats(&self, text: &[u8], sink: &mut dyn MatchSink) -> SearchStats {
        let started = Instant::now();
        let outcome = self.compiled.as_matcher().scan(text, sink);
        let stats = SearchStats {
            engine: self.engine,
            pattern_len: self.pattern_len(),
            text_len: text.len(),
            occurrences: outcome.occurrences,
            verifications: outcome.verifications,
            elapsed_us: started.elapsed().as_micros() as u64,
        };
        log::debug!(
            "{}: m={} n={} occurrences={} verifications={} in {}us",
            stats.engine,
            stats.pattern_len,
            stats.text_len,
            stats.occurrences,
            stats.verifications,
            stats.elapsed_us
        );
        stats
    }
}

impl Matcher for Searcher {
    fn scan(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        if self.collect_stats {
            let stats = self.scan_with_stats(text, sink);
            return ScanOutcome {
                occurrences: stats.occurrences,
                verifications: stats.verifications,
            };
        }
        let outcome = self.compiled.as_matcher().scan(text, sink);
        log::trace!(
            "{}: {} occurrences in {} bytes",
            self.engine,
            outcome.occurrences,
            text.len()
        );
        outcome
    }

    fn pattern_len(&self) -> usize {
        self.compiled.as_matcher().pattern_len()
    }

    fn name(&self) -> &'static str {
        self.compiled.as_matcher().name()
    }
}
