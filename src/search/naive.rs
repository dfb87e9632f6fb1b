//! Brute-force reference scan
//!
//! Compares the pattern at every alignment. It is the ground truth the
//! skipping engines are tested against, and the fallback for patterns the
//! factor engine cannot take.

use super::sink::MatchSink;
use super::{Matcher, ScanOutcome};

/// Reference matcher comparing the pattern at every text offset
#[derive(Debug, Clone)]
pub struct BruteForceMatcher {
    pattern: Box<[u8]>,
}

impl BruteForceMatcher {
    /// Compile a brute-force matcher (no preprocessing beyond a copy)
    pub fn new(pattern: &[u8]) -> Self {
        Self { pattern: pattern.into() }
    }
}

impl Matcher for BruteForceMatcher {
    fn scan(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        let m = self.pattern.len();
        let mut outcome = ScanOutcome::default();
        if m == 0 || text.len() < m {
            return outcome;
        }
        for (offset, window) in text.windows(m).enumerate() {
            outcome.verifications += 1;
            if window == &*self.pattern {
                sink.on_match(offset);
                outcome.occurrences += 1;
            }
        }
        outcome
    }

    fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    fn name(&self) -> &'static str {
        "brute_force"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping() {
        let matcher = BruteForceMatcher::new(b"aa");
        assert_eq!(matcher.find_all(b"aaaa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(BruteForceMatcher::new(b"").count(b"abc"), 0);
        assert_eq!(BruteForceMatcher::new(b"abcd").count(b"abc"), 0);
        assert_eq!(BruteForceMatcher::new(b"a").count(b""), 0);
    }
}
