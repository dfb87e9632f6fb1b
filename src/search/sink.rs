//! Output collaborators for reported occurrences

/// Receives every verified occurrence of a pattern, in strictly increasing
/// offset order, exactly once each.
pub trait MatchSink {
    /// Called with the zero-based start offset of a verified occurrence
    fn on_match(&mut self, offset: usize);
}

/// Sink that discards offsets; used when only the count is wanted
#[derive(Debug, Default, Clone, Copy)]
pub struct CountOnly;

impl MatchSink for CountOnly {
    #[inline]
    fn on_match(&mut self, _offset: usize) {}
}

impl MatchSink for Vec<usize> {
    #[inline]
    fn on_match(&mut self, offset: usize) {
        self.push(offset);
    }
}

/// Stops remembering after the first offset
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMatch(pub Option<usize>);

impl MatchSink for FirstMatch {
    #[inline]
    fn on_match(&mut self, offset: usize) {
        if self.0.is_none() {
            self.0 = Some(offset);
        }
    }
}

/// Adapts any `FnMut(usize)` closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(usize)> MatchSink for FnSink<F> {
    #[inline]
    fn on_match(&mut self, offset: usize) {
        (self.0)(offset)
    }
}

impl<S: MatchSink + ?Sized> MatchSink for &mut S {
    #[inline]
    fn on_match(&mut self, offset: usize) {
        (**self).on_match(offset)
    }
}
