//! Camel-case sub-word boundary search.
//!
//! Identifier-aware motions that stop inside `camelCase`, `PascalCase`,
//! `SCREAMING_SNAKE` and digit-run tokens rather than at whitespace. A
//! sub-word starts at:
//!
//! - an uppercase char whose predecessor is not uppercase, or whose
//!   successor is lowercase (the `R` of `XMLHttpRequest`),
//! - a lowercase char whose predecessor is not a letter,
//! - a digit whose predecessor is not a digit.
//!
//! Sub-word ends mirror this: the last char before such a transition.
//! Unlike word motion these searches can fail — a scan that walks off the
//! buffer without meeting a boundary returns `None`, and callers decide
//! what a failed step means.

use crate::buffer::{char_at, TextBuffer};
use crate::span::Direction;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Offset of the `count`-th camel-case sub-word start at or after
/// `start_index`.
#[must_use]
pub fn find_next_camel_start<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: usize,
    count: usize,
) -> Option<usize> {
    counted_camel_start(buf, start_index as isize, count, Direction::Forwards)
}

/// Offset of the `count`-th camel-case sub-word start strictly before
/// `end_index`, scanning backwards.
#[must_use]
pub fn find_previous_camel_start<B: TextBuffer + ?Sized>(
    buf: &B,
    end_index: usize,
    count: usize,
) -> Option<usize> {
    counted_camel_start(buf, end_index as isize - 1, count, Direction::Backwards)
}

/// Offset of the `count`-th camel-case sub-word end at or after
/// `start_index`.
#[must_use]
pub fn find_next_camel_end<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: usize,
    count: usize,
) -> Option<usize> {
    counted_camel_end(buf, start_index as isize, count, Direction::Forwards)
}

/// Offset of the `count`-th camel-case sub-word end strictly before
/// `end_index`, scanning backwards.
#[must_use]
pub fn find_previous_camel_end<B: TextBuffer + ?Sized>(
    buf: &B,
    end_index: usize,
    count: usize,
) -> Option<usize> {
    counted_camel_end(buf, end_index as isize - 1, count, Direction::Backwards)
}

// ---------------------------------------------------------------------------
// Counted repetition
// ---------------------------------------------------------------------------

// The first step searches from the entry offset inclusively; every later
// step re-enters one char past the previous hit so a boundary is never
// matched twice. Any failed step fails the whole search.

fn counted_camel_start<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: isize,
    count: usize,
    direction: Direction,
) -> Option<usize> {
    debug_assert!(count >= 1, "camel search requires a positive count");
    let mut offset = start_index;
    for counter in 0..count {
        let search_from = if counter == 0 { offset } else { offset + direction.offset() };
        offset = camel_start_one(buf, search_from, direction)?;
    }
    Some(offset as usize)
}

fn counted_camel_end<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: isize,
    count: usize,
    direction: Direction,
) -> Option<usize> {
    debug_assert!(count >= 1, "camel search requires a positive count");
    let mut offset = start_index;
    for counter in 0..count {
        let search_from = if counter == 0 { offset } else { offset + direction.offset() };
        offset = camel_end_one(buf, search_from, direction)?;
    }
    Some(offset as usize)
}

// ---------------------------------------------------------------------------
// Single-step primitives
// ---------------------------------------------------------------------------

fn camel_start_one<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: isize,
    direction: Direction,
) -> Option<isize> {
    let size = buf.len() as isize;
    let mut pos = start_index;

    if pos < 0 || pos >= size {
        return None;
    }

    while pos >= 0 && pos < size {
        let c = char_at(buf, pos);
        if c.is_uppercase() {
            // An acronym's last upper char starts a new sub-word when a
            // lowercase char follows it.
            if (pos == 0 || !char_at(buf, pos - 1).is_uppercase())
                || (pos == size - 1 || char_at(buf, pos + 1).is_lowercase())
            {
                return Some(pos);
            }
        } else if c.is_lowercase() {
            if pos == 0 || !char_at(buf, pos - 1).is_alphabetic() {
                return Some(pos);
            }
        } else if c.is_ascii_digit() {
            if pos == 0 || !char_at(buf, pos - 1).is_ascii_digit() {
                return Some(pos);
            }
        }
        pos += direction.offset();
    }
    None
}

fn camel_end_one<B: TextBuffer + ?Sized>(
    buf: &B,
    start_index: isize,
    direction: Direction,
) -> Option<isize> {
    let size = buf.len() as isize;
    let mut pos = start_index;

    if pos < 0 || pos >= size {
        return None;
    }

    while pos >= 0 && pos < size {
        let c = char_at(buf, pos);
        if c.is_uppercase() {
            // An upper char ends a sub-word when the acronym it belongs to
            // is about to turn into a new capitalized word.
            if pos == size - 1
                || !char_at(buf, pos + 1).is_alphabetic()
                || (char_at(buf, pos + 1).is_uppercase()
                    && pos < size - 2
                    && char_at(buf, pos + 2).is_lowercase())
            {
                return Some(pos);
            }
        } else if c.is_lowercase() {
            if pos == size - 1 || !char_at(buf, pos + 1).is_lowercase() {
                return Some(pos);
            }
        } else if c.is_ascii_digit() {
            if pos == size - 1 || !char_at(buf, pos + 1).is_ascii_digit() {
                return Some(pos);
            }
        }
        pos += direction.offset();
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
