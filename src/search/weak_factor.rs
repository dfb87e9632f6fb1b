//! Tuned Weak Factor Recognizer
//!
//! Preprocessing hashes every factor of the pattern up to [`MAX_FACTOR`] bytes
//! into a 2^16-bit membership table. Searching reads each window right to
//! left in [`BLOCK`]-byte steps: a block whose hash is absent cannot lie
//! inside an occurrence, so the window jumps ahead by almost its whole length.
//! A window whose every block passes is compared byte by byte, since the table
//! admits collisions but never misses a real factor.
//!
//! The window length is the pattern length rounded down to a multiple of
//! [`BLOCK`]. Reads past the end of the text resolve to a copy of the rounded
//! pattern prefix, which guarantees the skip loop stops inside that copy.

use super::sink::MatchSink;
use super::{Matcher, ScanOutcome};
use crate::error::{check_range, Result, SkipMatchError};

/// Bytes hashed per step; also the shortest supported pattern
pub const BLOCK: usize = 8;

/// Longest factor recorded in the membership table
pub const MAX_FACTOR: usize = 16;

const TABLE_WORDS: usize = (1 << 16) / 64;

/// Hash of `bytes` as recorded in the membership table.
///
/// Byte `k` contributes `bytes[k] << 2k`, truncated to 16 bits, so only the
/// first eight bytes of a longer span affect the value.
#[inline]
pub fn factor_hash(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .rev()
        .fold(0u16, |h, &b| (h << 2).wrapping_add(u16::from(b)))
}

/// Bloom-style set of pattern factor hashes
#[derive(Clone)]
pub struct FactorTable {
    words: Box<[u64]>,
}

impl FactorTable {
    /// Record the hash of every factor of `pattern` no longer than
    /// `min(pattern.len(), MAX_FACTOR)`.
    pub fn new(pattern: &[u8]) -> Self {
        let mut table = Self {
            words: vec![0u64; TABLE_WORDS].into_boxed_slice(),
        };
        let bound = pattern.len().min(MAX_FACTOR);
        for end in 0..pattern.len() {
            let start = (end + 1).saturating_sub(bound);
            let mut h: u16 = 0;
            for &byte in pattern[start..=end].iter().rev() {
                h = (h << 2).wrapping_add(u16::from(byte));
                table.insert(h);
            }
        }
        table
    }

    #[inline]
    fn insert(&mut self, hash: u16) {
        let h = hash as usize;
        self.words[h >> 6] |= 1u64 << (h & 63);
    }

    /// Whether `hash` may belong to a factor of the pattern
    #[inline(always)]
    pub fn contains(&self, hash: u16) -> bool {
        let h = hash as usize;
        self.words[h >> 6] & (1u64 << (h & 63)) != 0
    }

    /// Number of distinct hashes recorded
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no hash is recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FactorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactorTable").field("entries", &self.len()).finish()
    }
}

/// Text as seen by the scan: the logical text followed by the sentinel.
trait Haystack {
    /// Block hash of the [`BLOCK`] bytes ending at `end` (inclusive)
    fn block_hash(&self, end: usize) -> u16;
}

/// Text plus a borrowed sentinel; nothing is written past the text.
struct SentinelView<'a> {
    text: &'a [u8],
    sentinel: &'a [u8],
}

impl Haystack for SentinelView<'_> {
    #[inline]
    fn block_hash(&self, end: usize) -> u16 {
        let start = end + 1 - BLOCK;
        if end < self.text.len() {
            return factor_hash(&self.text[start..=end]);
        }
        let n = self.text.len();
        let mut block = [0u8; BLOCK];
        for (k, slot) in block.iter_mut().enumerate() {
            let at = start + k;
            *slot = if at < n { self.text[at] } else { self.sentinel[at - n] };
        }
        factor_hash(&block)
    }
}

/// Caller buffer that already holds the sentinel after the text.
struct Contiguous<'a>(&'a [u8]);

impl Haystack for Contiguous<'_> {
    #[inline]
    fn block_hash(&self, end: usize) -> u16 {
        factor_hash(&self.0[end + 1 - BLOCK..=end])
    }
}

/// Compiled weak factor recognizer
#[derive(Debug, Clone)]
pub struct WeakFactorMatcher {
    pattern: Box<[u8]>,
    table: FactorTable,
    /// Pattern length rounded down to a multiple of [`BLOCK`]
    window: usize,
}

impl WeakFactorMatcher {
    /// Preprocess `pattern`; patterns shorter than [`BLOCK`] are rejected
    pub fn new(pattern: &[u8]) -> Result<Self> {
        if pattern.len() < BLOCK {
            return Err(SkipMatchError::unsupported_pattern_length(pattern.len(), BLOCK));
        }
        let window = pattern.len() - pattern.len() % BLOCK;
        let table = FactorTable::new(&pattern[..window]);
        log::debug!(
            "weak_factor: compiled pattern of {} bytes, window {}, {} factor hashes",
            pattern.len(),
            window,
            table.len()
        );
        Ok(Self {
            pattern: pattern.into(),
            table,
            window,
        })
    }

    /// Length of the block-aligned search window
    pub fn window_len(&self) -> usize {
        self.window
    }

    /// The factor membership table
    pub fn table(&self) -> &FactorTable {
        &self.table
    }

    /// Bytes of scratch a caller buffer needs past the text for
    /// [`scan_in_place`](Self::scan_in_place)
    pub fn scratch_len(&self) -> usize {
        self.window
    }

    /// Search `buf[..text_len]`, using `buf[text_len..text_len + scratch_len()]`
    /// as the sentinel area.
    ///
    /// The scratch bytes are overwritten during the scan and restored before
    /// returning. Fails without touching the buffer if the scratch area does
    /// not fit.
    pub fn scan_in_place(
        &self,
        buf: &mut [u8],
        text_len: usize,
        sink: &mut dyn MatchSink,
    ) -> Result<ScanOutcome> {
        let required = text_len
            .checked_add(self.window)
            .ok_or_else(|| SkipMatchError::invalid_data("text length overflows scratch bound"))?;
        check_range(text_len, required, buf.len())
            .map_err(|_| SkipMatchError::insufficient_scratch(required, buf.len()))?;

        let saved = buf[text_len..required].to_vec();
        buf[text_len..required].copy_from_slice(&self.pattern[..self.window]);
        let scratch = ScratchRestore {
            buf,
            at: text_len,
            saved,
        };
        let outcome = self.scan_with(
            &scratch.buf[..text_len],
            &Contiguous(&scratch.buf[..required]),
            sink,
        );
        drop(scratch);
        Ok(outcome)
    }

    fn scan_with<H: Haystack>(&self, text: &[u8], hay: &H, sink: &mut dyn MatchSink) -> ScanOutcome {
        let m = self.pattern.len();
        let n = text.len();
        let mut outcome = ScanOutcome::default();
        if n < m {
            return outcome;
        }

        outcome.verifications += 1;
        if text[..m] == *self.pattern {
            sink.on_match(0);
            outcome.occurrences += 1;
        }

        let window = self.window;
        let skip = window - BLOCK + 1;
        let mut j = window;
        while j < n {
            let mut h = hay.block_hash(j);
            while !self.table.contains(h) {
                j += skip;
                h = hay.block_hash(j);
            }

            // Shrink toward the window start while every suffix passes.
            let start = j + 1 - window;
            let mut chain = u32::from(h);
            let mut present = true;
            while j > start + BLOCK - 1 {
                j -= BLOCK;
                chain = (chain << 16).wrapping_add(u32::from(hay.block_hash(j)));
                present = self.table.contains(chain as u16);
                if !present {
                    break;
                }
            }

            if present && j == start + BLOCK - 1 {
                outcome.verifications += 1;
                if text.get(start..start + m) == Some(&*self.pattern) {
                    sink.on_match(start);
                    outcome.occurrences += 1;
                }
            }
            j += skip;
        }
        outcome
    }
}

/// Puts the saved scratch bytes back when dropped, including while a
/// panicking sink unwinds out of the scan.
struct ScratchRestore<'a> {
    buf: &'a mut [u8],
    at: usize,
    saved: Vec<u8>,
}

impl Drop for ScratchRestore<'_> {
    fn drop(&mut self) {
        let end = self.at + self.saved.len();
        self.buf[self.at..end].copy_from_slice(&self.saved);
    }
}

impl Matcher for WeakFactorMatcher {
    fn scan(&self, text: &[u8], sink: &mut dyn MatchSink) -> ScanOutcome {
        let view = SentinelView {
            text,
            sentinel: &self.pattern[..self.window],
        };
        self.scan_with(text, &view, sink)
    }

    fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    fn name(&self) -> &'static str {
        "weak_factor"
    }
}
