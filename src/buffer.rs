//! Buffer and cursor abstractions the locators scan against.
//!
//! The engine never owns text. It reads through the [`TextBuffer`] trait —
//! random-access chars plus line structure — and reports or (for move
//! addresses) updates the caret through [`Cursor`]. The host editor
//! provides both; [`RopeBuffer`] and [`Caret`] are ready-made
//! implementations backed by [`ropey::Rope`], used by hosts without their
//! own text store and by every test in this crate.
//!
//! # Design choices
//!
//! - **Char offsets, not bytes.** All offsets count Unicode scalar values,
//!   matching how ropey indexes text. Byte offsets never appear in the
//!   public API.
//!
//! - **Snapshots only.** Every operation assumes the buffer is not mutated
//!   while a call is in flight. The engine holds no locks; serialization is
//!   the host's job.
//!
//! - **No editing here.** The engine computes offsets and ranges; applying
//!   them to text is the host's concern.

use ropey::Rope;

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// Read-only view of a document the locators scan.
///
/// Lines and offsets are 0-indexed. `line_start_offset(line_count())` is
/// never queried; `char_at` is only queried for offsets below `len()`.
pub trait TextBuffer {
    /// Total char length of the buffer. May be zero.
    fn len(&self) -> usize;

    /// True when the buffer holds no text.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The char at `offset`.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `offset >= len()`.
    fn char_at(&self, offset: usize) -> char;

    /// Number of lines. An empty buffer still has one (empty) line.
    fn line_count(&self) -> usize;

    /// Char offset of the first char of `line`.
    fn line_start_offset(&self, line: usize) -> usize;

    /// The line containing `offset`. Offsets at or past the end of the
    /// buffer map to the last line.
    fn offset_to_line(&self, offset: usize) -> usize;

    /// True when `line` is empty. With `allow_whitespace`, lines holding
    /// only whitespace also count as blank.
    fn is_line_blank(&self, line: usize, allow_whitespace: bool) -> bool;
}

/// Char length of `line` excluding its trailing line ending.
#[must_use]
pub fn line_char_length<B: TextBuffer + ?Sized>(buf: &B, line: usize) -> usize {
    let start = buf.line_start_offset(line);
    let end = if line + 1 < buf.line_count() {
        buf.line_start_offset(line + 1)
    } else {
        buf.len()
    };
    let mut len = end - start;
    while len > 0 && matches!(buf.char_at(start + len - 1), '\n' | '\r') {
        len -= 1;
    }
    len
}

/// The text of `line` excluding its trailing line ending.
#[must_use]
pub fn line_text<B: TextBuffer + ?Sized>(buf: &B, line: usize) -> String {
    let start = buf.line_start_offset(line);
    (start..start + line_char_length(buf, line))
        .map(|i| buf.char_at(i))
        .collect()
}

/// Char access for scan loops that index with signed offsets.
///
/// Callers guarantee `0 <= offset < len` — the signed type only exists so
/// that backward scans can step past zero and test the bound afterwards.
#[inline]
pub(crate) fn char_at<B: TextBuffer + ?Sized>(buf: &B, offset: isize) -> char {
    debug_assert!(offset >= 0, "scan read before buffer start");
    buf.char_at(usize::try_from(offset).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// The caret the engine resolves motions for.
///
/// `selection_start`/`selection_end` describe the active selection as char
/// offsets; with no selection both equal `offset()`. `move_to` is used only
/// by the range-resolution engine when a move address relocates the caret.
pub trait Cursor {
    /// Current caret offset.
    fn offset(&self) -> usize;

    /// Start offset of the active selection, or the caret offset when
    /// nothing is selected.
    fn selection_start(&self) -> usize {
        self.offset()
    }

    /// End offset of the active selection (exclusive), or the caret offset
    /// when nothing is selected.
    fn selection_end(&self) -> usize {
        self.offset()
    }

    /// Relocate the caret.
    fn move_to(&mut self, offset: usize);
}

/// Minimal [`Cursor`]: an offset plus an optional selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    offset: usize,
    selection: Option<(usize, usize)>,
}

impl Caret {
    /// Caret at `offset` with no selection.
    #[must_use]
    pub const fn new(offset: usize) -> Self {
        Self { offset, selection: None }
    }

    /// Caret at `offset` with an active `[start, end)` selection.
    #[must_use]
    pub const fn with_selection(offset: usize, start: usize, end: usize) -> Self {
        Self { offset, selection: Some((start, end)) }
    }
}

impl Cursor for Caret {
    fn offset(&self) -> usize {
        self.offset
    }

    fn selection_start(&self) -> usize {
        self.selection.map_or(self.offset, |(start, _)| start)
    }

    fn selection_end(&self) -> usize {
        self.selection.map_or(self.offset, |(_, end)| end)
    }

    fn move_to(&mut self, offset: usize) {
        self.offset = offset;
    }
}

// ---------------------------------------------------------------------------
// RopeBuffer
// ---------------------------------------------------------------------------

/// A [`TextBuffer`] backed by a rope.
///
/// ropey provides O(log n) char access, line indexing, and battle-tested
/// Unicode handling, so the locators stay free of text-storage concerns.
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer from existing text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self { rope: Rope::from_str(text) }
    }

    /// The underlying rope.
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for RopeBuffer {
    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> char {
        self.rope.char(offset)
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.rope.line_to_char(line)
    }

    fn offset_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn is_line_blank(&self, line: usize, allow_whitespace: bool) -> bool {
        if line >= self.rope.len_lines() {
            return false;
        }
        let slice = self.rope.line(line);
        for ch in slice.chars() {
            match ch {
                '\n' | '\r' => break,
                c if allow_whitespace && c.is_whitespace() => {}
                _ => return false,
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
