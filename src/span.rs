//! Offset spans and scan direction.
//!
//! All coordinates in this crate are **0-indexed char offsets** into the
//! buffer. A [`TextRange`] is a half-open `[start, end)` span of such
//! offsets — the shape every text-object locator returns. [`Direction`]
//! carries the signed step that parameterizes every symmetric scan, so
//! forward/backward variants share one algorithm instead of being
//! duplicated.

use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Scan direction for boundary searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forwards,
    Backwards,
}

impl Direction {
    /// The signed step for this direction: `+1` forwards, `-1` backwards.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Forwards => 1,
            Self::Backwards => -1,
        }
    }

    /// Direction implied by a signed count. Zero and positive counts scan
    /// forwards, negative counts scan backwards.
    #[inline]
    #[must_use]
    pub const fn of_count(count: isize) -> Self {
        if count < 0 { Self::Backwards } else { Self::Forwards }
    }

    #[inline]
    #[must_use]
    pub const fn is_forwards(self) -> bool {
        matches!(self, Self::Forwards)
    }
}

// ---------------------------------------------------------------------------
// TextRange
// ---------------------------------------------------------------------------

/// A half-open char-offset range: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive, and `end` may equal the buffer
/// length. An empty range has `start == end`. Ranges are always normalized
/// so that `start <= end` — use [`TextRange::new`] which enforces this, or
/// [`TextRange::ordered`] on untrusted endpoint pairs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "TextRange::new requires start <= end");
        Self { start, end }
    }

    /// Create a range from two arbitrary offsets, swapping if needed so
    /// that `start <= end`.
    #[inline]
    #[must_use]
    pub const fn ordered(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range (caret position) at the given offset.
    #[inline]
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    /// Number of chars this range spans.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// True when the range spans zero chars.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when the offset falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextRange({}..{})", self.start, self.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
