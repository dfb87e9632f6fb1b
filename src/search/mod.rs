//! Exact single-pattern byte search
//!
//! Every engine separates preprocessing from searching: constructing a matcher
//! compiles the pattern into owned lookup tables, and [`Matcher::scan`] walks a
//! text with them. A compiled matcher holds no per-search state and can be
//! shared across threads.
//!
//! - [`ShiftVectorMatcher`]: bit-parallel suffix automaton in one `u32`, with a
//!   prefix filter for patterns longer than 32 bytes
//! - [`WeakFactorMatcher`]: hashed factor filter with block-wise window skips,
//!   for patterns of at least 8 bytes
//! - [`BruteForceMatcher`]: reference scan
//!
//! ```rust
//! use skipmatch::search::{Matcher, ShiftVectorMatcher, WeakFactorMatcher};
//!
//! let svm = ShiftVectorMatcher::new(b"ab");
//! assert_eq!(svm.find_all(b"cababab"), vec![1, 3, 5]);
//!
//! let twfr = WeakFactorMatcher::new(b"sentinel").unwrap();
//! assert_eq!(twfr.count(b"a sentinel, another sentinel"), 2);
//! ```

pub mod engine;
pub mod naive;
pub mod shift_vector;
pub mod sink;
pub mod weak_factor;

pub use engine::{Engine, SearchStats, Searcher};
pub use naive::BruteForceMatcher;
pub use shift_vector::{CharMaskTable, ShiftVectorMatcher, WORD_BITS};
pub use sink::{CountOnly, FirstMatch, FnSink, MatchSink};
pub use weak_factor::{FactorTable, WeakFactorMatcher, BLOCK, MAX_FACTOR};

use crate::config::SearchConfig;
use crate::error::Result;

/// Result of one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Occurrences reported to the sink
    pub occurrences: usize,
    /// Candidate windows compared byte by byte
    pub verifications: usize,
}

impl ScanOutcome {
    /// Add the counts of another partial scan
    pub fn merge(&mut self, other: ScanOutcome) {
        self.occurrences += other.occurrences;
        self.verifications += other.verifications;
    }
}

/// Searching phase shared by all compiled patterns
pub trait Matcher {
    /// Report every occurrence in `text` to `sink`, in increasing offset order
    fn scan(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome;

    /// Length of the compiled pattern
    fn pattern_len(&self) -> usize;

    /// Short engine name used in logs and stats
    fn name(&self) -> &'static str;

    /// Number of occurrences in `text`
    fn count(&self, text: &[u8]) -> usize {
        self.scan(text, &mut CountOnly).occurrences
    }

    /// All occurrence offsets in `text`
    fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let mut offsets: Vec<usize> = Vec::new();
        self.scan(text, &mut offsets);
        offsets
    }

    /// Offset of the first occurrence in `text`
    ///
    /// There is no early exit; the whole text is scanned.
    fn find_first(&self, text: &[u8]) -> Option<usize> {
        let mut first = FirstMatch::default();
        self.scan(text, &mut first);
        first.0
    }
}

/// Find all occurrences of `pattern` in `text` with the default configuration
pub fn find_all(pattern: &[u8], text: &[u8]) -> Result<Vec<usize>> {
    Ok(Searcher::new(pattern, &SearchConfig::default())?.find_all(text))
}

/// Count occurrences of `pattern` in `text` with the default configuration
pub fn count(pattern: &[u8], text: &[u8]) -> Result<usize> {
    Ok(Searcher::new(pattern, &SearchConfig::default())?.count(text))
}
