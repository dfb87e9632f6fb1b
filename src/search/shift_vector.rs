//! Shift Vector Matching
//!
//! A bit-parallel automaton over a single `u32`. Bit `i` of the running state
//! is set once the alignment whose last text byte sits `i` positions before the
//! pattern end is known to mismatch. Each window folds in the mask of its
//! rightmost byte, extends leftward while the full-length alignment survives,
//! and then jumps past the run of low alignments already ruled out.
//!
//! Patterns longer than the word width are searched through their first
//! [`WORD_BITS`] bytes and the remainder is compared directly.

use super::sink::MatchSink;
use super::{Matcher, ScanOutcome};

/// Width of the bit-vector state in bits
pub const WORD_BITS: usize = 32;

/// Per-byte mismatch masks over at most [`WORD_BITS`] pattern bytes.
///
/// Bit `i` of `mask(c)` is clear iff `pattern[m - 1 - i] == c`; every other
/// bit below `m` is set and bits at or above `m` are clear. Longer patterns
/// contribute only their first [`WORD_BITS`] bytes.
#[derive(Clone)]
pub struct CharMaskTable {
    masks: [u32; 256],
}

impl CharMaskTable {
    /// Build the table for the first [`WORD_BITS`] bytes of `pattern`
    pub fn new(pattern: &[u8]) -> Self {
        let prefix = &pattern[..pattern.len().min(WORD_BITS)];
        let all = u32::MAX
            .checked_shr((WORD_BITS - prefix.len()) as u32)
            .unwrap_or(0);
        let mut masks = [all; 256];
        let mut bit = 1u32;
        for &byte in prefix.iter().rev() {
            masks[byte as usize] &= !bit;
            bit <<= 1;
        }
        Self { masks }
    }

    /// Mismatch mask for `byte`
    #[inline(always)]
    pub fn mask(&self, byte: u8) -> u32 {
        self.masks[byte as usize]
    }
}

impl std::fmt::Debug for CharMaskTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let distinct = self.masks.iter().filter(|&&m| m != self.masks[0]).count();
        f.debug_struct("CharMaskTable")
            .field("non_default_entries", &distinct)
            .finish()
    }
}

/// Compiled Shift Vector matcher
#[derive(Debug, Clone)]
pub struct ShiftVectorMatcher {
    pattern: Box<[u8]>,
    table: CharMaskTable,
    /// Number of leading pattern bytes covered by the bit-parallel filter
    filter_len: usize,
}

impl ShiftVectorMatcher {
    /// Preprocess `pattern` into its mask table
    pub fn new(pattern: &[u8]) -> Self {
        let filter_len = pattern.len().min(WORD_BITS);
        let table = CharMaskTable::new(pattern);
        log::debug!(
            "shift_vector: compiled pattern of {} bytes ({})",
            pattern.len(),
            if pattern.len() > WORD_BITS { "prefix filter" } else { "direct" }
        );
        Self {
            pattern: pattern.into(),
            table,
            filter_len,
        }
    }

    /// The mask table built for the filtered prefix
    pub fn table(&self) -> &CharMaskTable {
        &self.table
    }

    /// Whether searches go through the prefix filter and remainder check
    pub fn uses_prefix_filter(&self) -> bool {
        self.pattern.len() > WORD_BITS
    }

    fn scan_direct(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        shift_scan(&self.table, self.filter_len, text, |start| {
            sink.on_match(start);
            outcome.occurrences += 1;
        });
        outcome
    }

    fn scan_prefix_filtered(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let m = self.pattern.len();
        let tail = &self.pattern[self.filter_len..];
        shift_scan(&self.table, self.filter_len, text, |start| {
            outcome.verifications += 1;
            if text.get(start + self.filter_len..start + m) == Some(tail) {
                sink.on_match(start);
                outcome.occurrences += 1;
            }
        });
        outcome
    }
}

impl Matcher for ShiftVectorMatcher {
    fn scan(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        let m = self.pattern.len();
        if m == 0 || text.len() < m {
            return ScanOutcome::default();
        }

        // The automaton starts on the window ending at offset m, so the
        // window at offset 0 is compared up front.
        let mut outcome = ScanOutcome {
            occurrences: 0,
            verifications: 1,
        };
        if text[..m] == *self.pattern {
            sink.on_match(0);
            outcome.occurrences += 1;
        }

        let rest = if self.uses_prefix_filter() {
            self.scan_prefix_filtered(text, sink)
        } else {
            self.scan_direct(text, sink)
        };
        outcome.merge(rest);
        outcome
    }

    fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    fn name(&self) -> &'static str {
        "shift_vector"
    }
}

/// Bit-parallel scan over every window ending at offsets `width..text.len()`.
///
/// Calls `on_candidate` with the start offset of each window whose last
/// `width` bytes match the bytes the table was built from. Start offsets are
/// strictly increasing.
fn shift_scan<F: FnMut(usize)>(table: &CharMaskTable, width: usize, text: &[u8], mut on_candidate: F) {
    let n = text.len();
    let mut sv: u32 = 0;
    let mut s = width;
    while s < n {
        sv |= table.mask(text[s]);
        let mut j = 1;
        while sv & 1 == 0 {
            if j >= width {
                on_candidate(s + 1 - width);
                break;
            }
            sv |= table.mask(text[s - j]) >> j;
            j += 1;
        }

        sv >>= 1;
        let skip = skip_len(sv);
        sv >>= skip;
        s += skip as usize + 1;
    }
}

/// Number of further alignments already ruled out: the run of set bits at
/// the bottom of `sv`. Bit 31 is clear after the caller's shift, so the
/// result stays below 32.
#[inline(always)]
fn skip_len(sv: u32) -> u32 {
    (!sv).trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_table_layout() {
        let table = CharMaskTable::new(b"abc");
        assert_eq!(table.mask(b'c'), 0b110);
        assert_eq!(table.mask(b'b'), 0b101);
        assert_eq!(table.mask(b'a'), 0b011);
        assert_eq!(table.mask(b'z'), 0b111);
    }

    #[test]
    fn test_mask_table_repeated_bytes() {
        let table = CharMaskTable::new(b"aba");
        assert_eq!(table.mask(b'a'), 0b010);
        assert_eq!(table.mask(b'b'), 0b101);
    }

    #[test]
    fn test_mask_table_full_width() {
        let pattern = [b'x'; WORD_BITS];
        let table = CharMaskTable::new(&pattern);
        assert_eq!(table.mask(b'x'), 0);
        assert_eq!(table.mask(b'y'), u32::MAX);
    }

    #[test]
    fn test_mask_table_uses_prefix_of_long_pattern() {
        let long = [b'a'; 40];
        let table = CharMaskTable::new(&long);
        assert_eq!(table.mask(b'b'), u32::MAX);
        assert_eq!(table.mask(b'a'), 0);

        let pattern: Vec<u8> = (0..45u8).map(|i| b'A' + i % 26).collect();
        let full = CharMaskTable::new(&pattern);
        let prefix = CharMaskTable::new(&pattern[..WORD_BITS]);
        for byte in 0..=255u8 {
            assert_eq!(full.mask(byte), prefix.mask(byte));
        }
    }

    /// Skip computed by isolating the lowest set bit of `!sv`, halving by 16
    /// and 8 bits, then looking up the remaining byte.
    fn byte_table_skip(sv: u32) -> u32 {
        let mut lowest_bit_in_byte = [0u32; 256];
        for (byte, slot) in lowest_bit_in_byte.iter_mut().enumerate().skip(1) {
            let mut b = byte;
            while b & 1 == 0 {
                b >>= 1;
                *slot += 1;
            }
        }

        let mut h = !sv;
        h &= h.wrapping_neg();
        let mut j = 0;
        if h << 16 == 0 {
            j += 16;
            h >>= 16;
        }
        if h << 24 == 0 {
            j += 8;
            h >>= 8;
        }
        j + lowest_bit_in_byte[(h & 0xff) as usize]
    }

    #[test]
    fn test_skip_len_matches_byte_table() {
        let mut samples: Vec<u32> = (0..=0xffffu32).collect();
        for run in 0..32 {
            let ones = (1u32 << run) - 1;
            samples.push(ones);
            samples.push(ones | 0x4000_0000);
            samples.push(ones | (0x5555_5555 << run));
        }
        let mut state = 0x2545_f491u32;
        for _ in 0..50_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            samples.push(state);
        }

        for sv in samples {
            // The scan only asks for skips after shifting right by one.
            let sv = sv >> 1;
            assert_eq!(skip_len(sv), byte_table_skip(sv), "sv = {:#010x}", sv);
        }
    }

    #[test]
    fn test_basic_occurrences() {
        let matcher = ShiftVectorMatcher::new(b"ab");
        assert_eq!(matcher.find_all(b"cababab"), vec![1, 3, 5]);
    }

    #[test]
    fn test_overlapping_occurrences() {
        assert_eq!(ShiftVectorMatcher::new(b"aaa").find_all(b"aaaaa"), vec![0, 1, 2]);
        assert_eq!(ShiftVectorMatcher::new(b"aa").find_all(b"aaaa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_byte_pattern() {
        let matcher = ShiftVectorMatcher::new(b"x");
        assert_eq!(matcher.find_all(b"xaxxbx"), vec![0, 2, 3, 5]);
    }

    #[test]
    fn test_pattern_equal_to_text() {
        let matcher = ShiftVectorMatcher::new(b"hello");
        assert_eq!(matcher.find_all(b"hello"), vec![0]);
        assert_eq!(matcher.count(b"hellp"), 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(ShiftVectorMatcher::new(b"").count(b"abc"), 0);
        assert_eq!(ShiftVectorMatcher::new(b"abcd").count(b"abc"), 0);
        assert_eq!(ShiftVectorMatcher::new(b"a").count(b""), 0);
    }

    #[test]
    fn test_word_width_boundary() {
        let pattern: Vec<u8> = (0..WORD_BITS as u8).map(|i| b'a' + i % 7).collect();
        let mut text = vec![b'z'; 200];
        text[50..50 + WORD_BITS].copy_from_slice(&pattern);
        let matcher = ShiftVectorMatcher::new(&pattern);
        assert!(!matcher.uses_prefix_filter());
        assert_eq!(matcher.find_all(&text), vec![50]);

        let longer: Vec<u8> = (0..=WORD_BITS as u8).map(|i| b'a' + i % 7).collect();
        let mut text = vec![b'z'; 200];
        text[60..60 + longer.len()].copy_from_slice(&longer);
        let matcher = ShiftVectorMatcher::new(&longer);
        assert!(matcher.uses_prefix_filter());
        assert_eq!(matcher.find_all(&text), vec![60]);
    }

    #[test]
    fn test_prefix_filter_rejects_tail_mismatch() {
        let pattern: Vec<u8> = (0..40u8).map(|i| b'a' + i % 26).collect();
        let mut text = vec![b'.'; 300];
        // Prefix matches at 20 but the tail differs; a full copy sits at 150.
        text[20..20 + 32].copy_from_slice(&pattern[..32]);
        text[150..190].copy_from_slice(&pattern);

        let matcher = ShiftVectorMatcher::new(&pattern);
        let outcome = matcher.scan(&text, &mut Vec::<usize>::new());
        assert_eq!(matcher.find_all(&text), vec![150]);
        assert_eq!(outcome.occurrences, 1);
        assert!(outcome.verifications >= 3);
    }

    #[test]
    fn test_prefix_filter_candidate_past_end() {
        let pattern: Vec<u8> = (0..36u8).map(|i| b'A' + i % 20).collect();
        let mut text = vec![b'.'; 64];
        let at = text.len() - 32;
        text[at..].copy_from_slice(&pattern[..32]);
        assert_eq!(ShiftVectorMatcher::new(&pattern).count(&text), 0);
    }

    #[test]
    fn test_long_pattern_at_offset_zero() {
        let pattern: Vec<u8> = (0..50u8).collect();
        let mut text = pattern.clone();
        text.extend_from_slice(&[0xff; 30]);
        assert_eq!(ShiftVectorMatcher::new(&pattern).find_all(&text), vec![0]);
    }
}
