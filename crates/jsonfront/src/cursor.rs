/// Read position over the buffer of one parse call.
///
/// The end position is always the length of the slice; offsets are relative
/// to its first byte.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// A cursor at the start of `input`.
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current read offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// End offset, one past the last byte.
    #[must_use]
    pub fn end(&self) -> usize {
        self.input.len()
    }

    /// The whole buffer.
    #[must_use]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Whether every byte has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The next byte, without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Consume one byte.
    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Consume `n` bytes, stopping at the end of input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.input.len());
    }

    /// Move to `pos`, which must not be past the end.
    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(pos <= self.input.len());
        self.pos = pos.min(self.input.len());
    }

    /// Skip JSON whitespace (space, tab, line feed, carriage return).
    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.pos = crate::scan::skip_whitespace(self.input, self.pos);
    }
}
