//! Clamped ranges over offset units.
//!
//! Style and entity ranges arrive as `{offset, length}` pairs inside remote
//! payloads. Offsets can be negative, lengths can overflow, and either can run
//! past the end of the text, so every range is clamped before it touches a
//! per-unit attribute array.

/// Half-open range `[start, end)` into a block's offset units.
///
/// Uses `u32` offsets like the rest of the crate; block texts are far below
/// 4G units.
///
/// # Example
/// ```
/// use postrender::Range;
///
/// let r = Range::clamped(3, 100, 10);
/// assert_eq!((r.start, r.end), (3, 10));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

const _: () = assert!(std::mem::size_of::<Range>() == 8);

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create from byte positions, saturating at `u32::MAX`.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        let sat = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Self::new(sat(start), sat(end))
    }

    /// Clamp an `{offset, length}` pair to `[0, len]`.
    ///
    /// Never panics: negative offsets start at 0, negative lengths give an
    /// empty range, and `offset + length` saturates before clamping.
    pub fn clamped(offset: i64, length: i64, len: usize) -> Self {
        let len = i64::try_from(len).unwrap_or(i64::MAX).min(u32::MAX as i64);
        let start = offset.clamp(0, len);
        let end = offset.saturating_add(length.max(0)).clamp(start, len);
        Self::new(start as u32, end as u32)
    }

    /// Length of the range in units.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn start_usize(&self) -> usize {
        self.start as usize
    }

    #[inline]
    pub const fn end_usize(&self) -> usize {
        self.end as usize
    }
}

impl From<Range> for std::ops::Range<usize> {
    #[inline]
    fn from(r: Range) -> Self {
        r.start_usize()..r.end_usize()
    }
}
