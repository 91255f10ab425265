//! Ex command line-range resolution (`:3,7d`, `:.,+2y`, `:/pat/,$`).
//!
//! A parsed ex range is a list of [`Address`] values. Resolution folds the
//! list left to right over a one-based `(start, end)` accumulator: each
//! address shifts the previous end into the start slot and resolves itself
//! into the end slot. A *move* address additionally relocates the caret to
//! its line (same column), so later addresses in the same range resolve
//! relative to where the earlier one landed. A single address always
//! yields a single-line range, and a fold ending below line 1 is an
//! invalid range the host must surface to the user.

use thiserror::Error;
use tracing::trace;

use crate::buffer::{line_char_length, line_text, Cursor, TextBuffer};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to resolve an ex range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The fold produced a final line below line 1.
    #[error("E16: Invalid range")]
    InvalidRange,
    /// A search address carried a pattern that does not compile.
    #[error("E383: Invalid search string: {0}")]
    InvalidPattern(String),
    /// A search address matched nothing, even after wrapping.
    #[error("E486: Pattern not found: {0}")]
    PatternNotFound(String),
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// One component of an ex range.
///
/// Every variant resolves to a one-based line. Mark lines are captured at
/// parse time, so an unset mark is rejected before resolution starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// An explicit line number (`:7`). One-based; `0` addresses the line
    /// above the first.
    Absolute { line1: isize, is_move: bool },
    /// The caret's line (`.`).
    Current { is_move: bool },
    /// An offset from the caret's line (`+2`, `-1`).
    Relative { offset: isize, is_move: bool },
    /// A mark's line (`'a`), resolved when the range was parsed.
    Mark { mark: char, line1: isize, is_move: bool },
    /// A pattern search (`/pat/`, `?pat?`) from the caret's line, wrapping
    /// at the buffer edge.
    Search { pattern: String, backwards: bool, is_move: bool },
}

impl Address {
    #[must_use]
    pub const fn absolute(line1: isize) -> Self {
        Self::Absolute { line1, is_move: false }
    }

    #[must_use]
    pub const fn current() -> Self {
        Self::Current { is_move: false }
    }

    #[must_use]
    pub const fn relative(offset: isize, is_move: bool) -> Self {
        Self::Relative { offset, is_move }
    }

    #[must_use]
    pub const fn mark(mark: char, line1: isize) -> Self {
        Self::Mark { mark, line1, is_move: false }
    }

    /// Search addresses move the caret by default, as in Vim.
    #[must_use]
    pub fn search(pattern: impl Into<String>, backwards: bool) -> Self {
        Self::Search { pattern: pattern.into(), backwards, is_move: true }
    }

    /// Whether resolving this address relocates the caret.
    #[must_use]
    pub const fn is_move(&self) -> bool {
        match self {
            Self::Absolute { is_move, .. }
            | Self::Current { is_move }
            | Self::Relative { is_move, .. }
            | Self::Mark { is_move, .. }
            | Self::Search { is_move, .. } => *is_move,
        }
    }

    /// The one-based line this address denotes, given the current caret.
    fn resolve<B: TextBuffer + ?Sized, C: Cursor>(
        &self,
        buf: &B,
        cursor: &C,
    ) -> Result<isize, RangeError> {
        let current_line1 = buf.offset_to_line(cursor.offset()) as isize + 1;
        match self {
            Self::Absolute { line1, .. } | Self::Mark { line1, .. } => Ok(*line1),
            Self::Current { .. } => Ok(current_line1),
            Self::Relative { offset, .. } => Ok(current_line1 + offset),
            Self::Search { pattern, backwards, .. } => {
                search_line(buf, current_line1 - 1, pattern, *backwards)
            }
        }
    }
}

/// Find the next line matching `pattern`, scanning from the line after
/// (or before) `start_line` and wrapping once around the buffer. The
/// starting line itself is searched last. Returns a one-based line.
fn search_line<B: TextBuffer + ?Sized>(
    buf: &B,
    start_line: isize,
    pattern: &str,
    backwards: bool,
) -> Result<isize, RangeError> {
    let re = regex::Regex::new(pattern)
        .map_err(|_| RangeError::InvalidPattern(pattern.to_owned()))?;
    let line_count = buf.line_count() as isize;
    for i in 1..=line_count {
        let line = if backwards {
            (start_line + line_count - i).rem_euclid(line_count)
        } else {
            (start_line + i).rem_euclid(line_count)
        };
        if re.is_match(&line_text(buf, line as usize)) {
            return Ok(line + 1);
        }
    }
    Err(RangeError::PatternNotFound(pattern.to_owned()))
}

// ---------------------------------------------------------------------------
// LineRange
// ---------------------------------------------------------------------------

/// A resolved, zero-based, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineRange {
    #[must_use]
    pub const fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// Clamp both lines into the buffer and order them. Resolution keeps
    /// the raw fold result; hosts normalize before applying the range.
    #[must_use]
    pub fn normalized<B: TextBuffer + ?Sized>(self, buf: &B) -> Self {
        let last = buf.line_count().saturating_sub(1);
        let start = self.start_line.min(last);
        let end = self.end_line.min(last);
        if start <= end {
            Self::new(start, end)
        } else {
            Self::new(end, start)
        }
    }
}

// ---------------------------------------------------------------------------
// ExRange
// ---------------------------------------------------------------------------

/// The address list of one ex command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExRange {
    addresses: Vec<Address>,
    default_line1: Option<isize>,
}

impl ExRange {
    #[must_use]
    pub const fn new() -> Self {
        Self { addresses: Vec::new(), default_line1: None }
    }

    pub fn push(&mut self, address: Address) {
        self.addresses.push(address);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// One-based line the range defaults to when no address was given.
    /// Unset means the caret's line.
    pub fn set_default_line1(&mut self, line1: isize) {
        self.default_line1 = Some(line1);
    }

    /// Resolve the address list to a line range.
    ///
    /// Move addresses relocate `cursor` as they resolve, and that
    /// relocation is visible to the addresses after them.
    pub fn line_range<B: TextBuffer + ?Sized, C: Cursor>(
        &self,
        buf: &B,
        cursor: &mut C,
    ) -> Result<LineRange, RangeError> {
        trace!(addresses = self.addresses.len(), "resolving ex range");

        let mut start_line1 = self
            .default_line1
            .unwrap_or_else(|| buf.offset_to_line(cursor.offset()) as isize + 1);
        let mut end_line1 = start_line1;

        let mut count = 0;
        for address in &self.addresses {
            start_line1 = end_line1;
            end_line1 = address.resolve(buf, cursor)?;
            if address.is_move() {
                move_to_line_same_column(buf, cursor, end_line1 - 1);
            }
            count += 1;
        }

        // A plain `:-10` near the top of the buffer folds below line 1.
        if end_line1 < 0 {
            return Err(RangeError::InvalidRange);
        }

        // A single address means a single-line range.
        if count == 1 {
            start_line1 = end_line1;
        }

        Ok(LineRange::new(
            (start_line1 - 1).max(0) as usize,
            (end_line1 - 1).max(0) as usize,
        ))
    }

    /// The line a command expecting one line should act on: the last line
    /// of the range, zero-based.
    pub fn line<B: TextBuffer + ?Sized, C: Cursor>(
        &self,
        buf: &B,
        cursor: &mut C,
    ) -> Result<usize, RangeError> {
        Ok(self.line_range(buf, cursor)?.end_line)
    }

    /// The count a command expecting one should use: the resolved last
    /// line, one-based, by ex convention.
    pub fn count<B: TextBuffer + ?Sized, C: Cursor>(
        &self,
        buf: &B,
        cursor: &mut C,
    ) -> Result<usize, RangeError> {
        Ok(self.line_range(buf, cursor)?.end_line + 1)
    }
}

/// Move the caret to `line` (zero-based), keeping its column where the
/// target line is long enough.
fn move_to_line_same_column<B: TextBuffer + ?Sized, C: Cursor>(
    buf: &B,
    cursor: &mut C,
    line: isize,
) {
    let line = line.clamp(0, buf.line_count() as isize - 1) as usize;
    let current_line = buf.offset_to_line(cursor.offset());
    let column = cursor.offset() - buf.line_start_offset(current_line);
    let target_len = line_char_length(buf, line);
    cursor.move_to(buf.line_start_offset(line) + column.min(target_len));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
