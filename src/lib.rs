//! # Skipmatch: exact single-pattern byte search
//!
//! Two sub-linear matching kernels with a shared two-phase contract: compile
//! the pattern once, then scan any number of texts.
//!
//! ## Key Features
//!
//! - **Shift Vector Matching**: bit-parallel suffix automaton in one machine
//!   word, jumping by the run of alignments already ruled out; patterns over
//!   32 bytes use a 32-byte prefix filter with direct remainder verification
//! - **Tuned Weak Factor Recognizer**: hashed membership table over every
//!   pattern factor up to 16 bytes, rejecting whole windows on one absent
//!   8-byte block
//! - **Exact results**: every filter candidate is verified, offsets are
//!   reported once each in increasing order
//! - **No global state**: lookup tables are owned by the compiled matcher
//!
//! ## Quick Start
//!
//! ```rust
//! use skipmatch::search::{Matcher, Searcher};
//! use skipmatch::config::SearchConfig;
//!
//! let searcher = Searcher::new(b"aaa", &SearchConfig::default()).unwrap();
//! assert_eq!(searcher.find_all(b"aaaaa"), vec![0, 1, 2]);
//!
//! let mut offsets: Vec<usize> = Vec::new();
//! let outcome = searcher.scan(b"xaaax", &mut offsets);
//! assert_eq!(outcome.occurrences, 1);
//! assert_eq!(offsets, vec![1]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod search;

// Re-export core types
pub use config::{Config, SearchConfig};
pub use error::{Result, SkipMatchError};
pub use search::{
    BruteForceMatcher, Engine, MatchSink, Matcher, ScanOutcome, SearchStats, Searcher,
    ShiftVectorMatcher, WeakFactorMatcher,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing skipmatch v{}", VERSION);
}
