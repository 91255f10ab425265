//! Paragraph boundary search (`{`, `}`, `ip`, `ap`).
//!
//! A paragraph boundary is an empty line; with `allow_blanks` a line of
//! only whitespace also counts. Motions land on the `count`-th boundary
//! line from the caret and clamp to the first or last line when the
//! buffer runs out. Text-object ranges are line-based: an inner range
//! covers the paragraph's text lines (or one run of empty lines when the
//! caret sits on one), an outer range additionally swallows the run of
//! empty lines on exactly one side.

use tracing::{debug, error};

use crate::buffer::TextBuffer;
use crate::span::{Direction, TextRange};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Offset of the `count`-th paragraph boundary from the caret.
///
/// A negative `count` searches backwards. Landing on the final line maps
/// to the last char of the buffer (forwards) or offset 0 (backwards),
/// otherwise to the boundary line's first char.
#[must_use]
pub fn find_next_paragraph<B: TextBuffer + ?Sized>(
    buf: &B,
    caret_offset: usize,
    count: isize,
    allow_blanks: bool,
) -> Option<usize> {
    let start_line = buf.offset_to_line(caret_offset) as isize;
    let line = find_next_paragraph_line(buf, start_line, count, allow_blanks)?;
    let line_count = buf.line_count() as isize;
    if line == line_count - 1 {
        if count > 0 {
            Some(buf.len().saturating_sub(1))
        } else {
            Some(0)
        }
    } else {
        Some(buf.line_start_offset(line as usize))
    }
}

/// The paragraph range around the caret.
///
/// The range is line-anchored: it runs from the first char of the range's
/// first line to just past the first char of its last line. Callers
/// applying it as a linewise object expand both ends to full lines.
/// A buffer with no text line at all has no paragraph and yields `None`.
#[must_use]
pub fn find_paragraph_range<B: TextBuffer + ?Sized>(
    buf: &B,
    caret_offset: usize,
    count: isize,
    is_outer: bool,
) -> Option<TextRange> {
    let line = buf.offset_to_line(caret_offset) as isize;
    debug!(line, is_outer, "starting paragraph range search");

    let (start_line, end_line) = if is_outer {
        outer_paragraph_lines(buf, line, count)?
    } else {
        inner_paragraph_lines(buf, line, count)?
    };
    debug!(start_line, end_line, "paragraph range lines");

    // The blank-run case analysis walks below line 0 on an all-blank
    // single-line buffer.
    if start_line < 0 || end_line < 0 {
        return None;
    }
    let start = buf.line_start_offset(start_line as usize);
    let end = buf.line_start_offset(end_line as usize);
    Some(TextRange::new(start, (end + 1).min(buf.len())))
}

// ---------------------------------------------------------------------------
// Range construction
// ---------------------------------------------------------------------------

fn outer_paragraph_lines<B: TextBuffer + ?Sized>(
    buf: &B,
    line: isize,
    count: isize,
) -> Option<(isize, isize)> {
    let mut expand_start = false;
    let mut expand_end = false;

    let mut start_line = if blank(buf, line) {
        line
    } else {
        find_next_paragraph_line(buf, line, -1, true)?
    };
    let mut end_line = find_next_paragraph_line(buf, line, count, true)?;

    if blank(buf, start_line) && blank(buf, end_line) {
        if start_line == line {
            end_line -= 1;
            expand_start = true;
        } else {
            start_line += 1;
            expand_end = true;
        }
    } else if !blank(buf, end_line) && !blank(buf, start_line) && start_line > 0 {
        start_line -= 1;
        expand_start = true;
    } else {
        expand_start = blank(buf, start_line);
        expand_end = blank(buf, end_line);
    }
    if expand_start && blank(buf, start_line) {
        start_line = find_last_empty_line(buf, start_line, Direction::Backwards);
    }
    if expand_end && blank(buf, end_line) {
        end_line = find_last_empty_line(buf, end_line, Direction::Forwards);
    }
    Some((start_line, end_line))
}

fn inner_paragraph_lines<B: TextBuffer + ?Sized>(
    buf: &B,
    line: isize,
    count: isize,
) -> Option<(isize, isize)> {
    let line_count = buf.line_count() as isize;

    let mut start_line = line;
    let mut end_line;

    if blank(buf, start_line) {
        end_line = line - 1;
    } else {
        start_line = find_next_paragraph_line(buf, line, -1, true)?;
        if blank(buf, start_line) {
            start_line += 1;
        }
        end_line = line;
    }

    // Alternate between consuming a text block and an empty-line block so
    // that `count` spans whole paragraphs, whichever kind the caret is on.
    let mut which: isize = if blank(buf, start_line) { 0 } else { 1 };
    for i in 0..count.max(0) {
        if which % 2 == 1 {
            match next_paragraph_line_once(buf, end_line, Direction::Forwards, true) {
                None | Some(0) => {
                    if i == count - 1 {
                        end_line = line_count - 1;
                    } else {
                        return None;
                    }
                }
                Some(next) => end_line = next - 1,
            }
        } else {
            end_line += 1;
        }
        which += 1;
    }

    if blank(buf, start_line) {
        start_line = find_last_empty_line(buf, start_line, Direction::Backwards);
    }
    if blank(buf, end_line) {
        end_line = find_last_empty_line(buf, end_line, Direction::Forwards);
    }
    Some((start_line, end_line))
}

// ---------------------------------------------------------------------------
// Line scanning
// ---------------------------------------------------------------------------

/// Blank-line predicate tolerant of out-of-range lines, with
/// whitespace-only lines counting as blank.
fn blank<B: TextBuffer + ?Sized>(buf: &B, line: isize) -> bool {
    line_blank(buf, line, true)
}

/// First or last line of the group of empty lines containing `line`,
/// depending on `direction`.
fn find_last_empty_line<B: TextBuffer + ?Sized>(buf: &B, line: isize, direction: Direction) -> isize {
    if !blank(buf, line) {
        error!(line, "empty-line group search started on a non-empty line");
        return line;
    }
    if direction == Direction::Backwards {
        skip_empty_lines(buf, line, Direction::Backwards, true) + 1
    } else {
        skip_empty_lines(buf, line, Direction::Forwards, true) - 1
    }
}

/// The `count`-th paragraph boundary line from `start_line`. The sign of
/// `count` picks the direction. Runs that leave the buffer on the final
/// step clamp to the first or last line; earlier misses fail.
fn find_next_paragraph_line<B: TextBuffer + ?Sized>(
    buf: &B,
    start_line: isize,
    count: isize,
    allow_blanks: bool,
) -> Option<isize> {
    let line_count = buf.line_count() as isize;
    let direction = Direction::of_count(count);

    let mut line = Some(start_line);
    let mut i = count.abs();
    while i > 0 {
        let Some(current) = line else { break };
        line = next_paragraph_line_once(buf, current, direction, allow_blanks);
        i -= 1;
    }

    if count != 0 && i == 0 && line.is_none() {
        line = Some(if direction.is_forwards() { line_count - 1 } else { 0 });
    }
    line
}

/// The next empty line at or after `start_line` in `direction`, skipping
/// the run of empty lines the search starts on.
fn next_paragraph_line_once<B: TextBuffer + ?Sized>(
    buf: &B,
    start_line: isize,
    direction: Direction,
    allow_blanks: bool,
) -> Option<isize> {
    let line_count = buf.line_count() as isize;
    let mut line = skip_empty_lines(buf, start_line, direction, allow_blanks);
    while line >= 0 && line < line_count {
        if line_blank(buf, line, allow_blanks) {
            return Some(line);
        }
        line += direction.offset();
    }
    None
}

/// The next non-empty line at or after `start_line` in `direction`.
/// Returns `line_count` (forwards) or `-1` (backwards) when every
/// remaining line is empty.
fn skip_empty_lines<B: TextBuffer + ?Sized>(
    buf: &B,
    start_line: isize,
    direction: Direction,
    allow_blanks: bool,
) -> isize {
    let line_count = buf.line_count() as isize;
    let mut i = start_line;
    while i >= 0 && i < line_count {
        if !line_blank(buf, i, allow_blanks) {
            break;
        }
        i += direction.offset();
    }
    i
}

fn line_blank<B: TextBuffer + ?Sized>(buf: &B, line: isize, allow_blanks: bool) -> bool {
    line >= 0 && (line as usize) < buf.line_count() && buf.is_line_blank(line as usize, allow_blanks)
}

/// Offset of the next paragraph boundary from `start_line`, clamped to the
/// buffer edges when no boundary remains. Used by sentence motion to keep
/// sentence scans inside the current paragraph.
pub(crate) fn next_paragraph_offset<B: TextBuffer + ?Sized>(
    buf: &B,
    start_line: isize,
    direction: Direction,
    allow_blanks: bool,
) -> isize {
    match next_paragraph_line_once(buf, start_line, direction, allow_blanks) {
        Some(line) => buf.line_start_offset(line as usize) as isize,
        None => {
            if direction.is_forwards() {
                buf.len() as isize - 1
            } else {
                0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    fn buf(text: &str) -> RopeBuffer {
        RopeBuffer::from_text(text)
    }

    // -- Paragraph motion ---------------------------------------------------

    #[test]
    fn forward_to_empty_line() {
        let b = buf("one\ntwo\n\nthree");
        assert_eq!(find_next_paragraph(&b, 0, 1, false), Some(8));
    }

    #[test]
    fn forward_clamps_to_buffer_end() {
        let b = buf("one\ntwo\nthree");
        // No boundary ahead: lands on the last line, mapped to last char.
        assert_eq!(find_next_paragraph(&b, 0, 1, false), Some(12));
    }

    #[test]
    fn backward_to_empty_line() {
        let b = buf("one\n\ntwo\nthree");
        assert_eq!(find_next_paragraph(&b, 9, -1, false), Some(4));
    }

    #[test]
    fn backward_clamps_to_buffer_start() {
        let b = buf("one\ntwo");
        assert_eq!(find_next_paragraph(&b, 5, -1, false), Some(0));
    }

    #[test]
    fn counted_motion() {
        let b = buf("a\n\nb\n\nc");
        assert_eq!(find_next_paragraph(&b, 0, 2, false), Some(5));
    }

    #[test]
    fn starts_from_inside_empty_run() {
        // The run of empty lines the caret is on is skipped first.
        let b = buf("a\n\n\nb\n\nc");
        assert_eq!(find_next_paragraph(&b, 2, 1, false), Some(6));
    }

    #[test]
    fn blank_lines_only_count_when_allowed() {
        let b = buf("one\n   \ntwo\n\nthree");
        assert_eq!(find_next_paragraph(&b, 0, 1, false), Some(12));
        assert_eq!(find_next_paragraph(&b, 0, 1, true), Some(4));
    }

    // -- Inner paragraph ----------------------------------------------------

    #[test]
    fn inner_paragraph_lines_exclude_blank_run() {
        // Lines: "a", "", "", "b"
        let b = buf("a\n\n\nb");
        assert_eq!(inner_paragraph_lines(&b, 0, 1), Some((0, 0)));
    }

    #[test]
    fn inner_paragraph_on_text() {
        let b = buf("a\n\n\nb");
        assert_eq!(find_paragraph_range(&b, 0, 1, false), Some(TextRange::new(0, 1)));
    }

    #[test]
    fn inner_paragraph_spans_whole_block() {
        let b = buf("one\ntwo\n\nthree");
        assert_eq!(inner_paragraph_lines(&b, 1, 1), Some((0, 1)));
        assert_eq!(find_paragraph_range(&b, 5, 1, false), Some(TextRange::new(0, 5)));
    }

    #[test]
    fn inner_paragraph_on_empty_run_selects_the_run() {
        let b = buf("a\n\n\nb");
        assert_eq!(inner_paragraph_lines(&b, 1, 1), Some((1, 2)));
        assert_eq!(find_paragraph_range(&b, 2, 1, false), Some(TextRange::new(2, 4)));
    }

    #[test]
    fn inner_paragraph_of_last_block_reaches_last_line() {
        let b = buf("a\n\nlast\nblock");
        assert_eq!(inner_paragraph_lines(&b, 2, 1), Some((2, 3)));
        assert_eq!(find_paragraph_range(&b, 4, 1, false), Some(TextRange::new(3, 9)));
    }

    // -- Outer paragraph ----------------------------------------------------

    #[test]
    fn outer_paragraph_absorbs_following_blank_run() {
        // Lines: "a", "", "", "b"
        let b = buf("a\n\n\nb");
        assert_eq!(outer_paragraph_lines(&b, 0, 1), Some((0, 2)));
        assert_eq!(find_paragraph_range(&b, 0, 1, true), Some(TextRange::new(0, 4)));
    }

    #[test]
    fn outer_paragraph_from_empty_run_absorbs_following_block() {
        let b = buf("a\n\n\nb\n\nc");
        assert_eq!(outer_paragraph_lines(&b, 1, 1), Some((1, 3)));
        assert_eq!(find_paragraph_range(&b, 2, 1, true), Some(TextRange::new(2, 5)));
    }

    // -- Degenerate buffers -------------------------------------------------

    #[test]
    fn outer_paragraph_on_empty_buffer() {
        assert_eq!(find_paragraph_range(&buf(""), 0, 1, true), None);
    }

    #[test]
    fn outer_paragraph_on_blank_only_line() {
        assert_eq!(find_paragraph_range(&buf(" "), 0, 1, true), None);
    }

    #[test]
    fn outer_paragraph_on_blank_run_stays_in_bounds() {
        let b = buf("\n\n");
        assert_eq!(find_paragraph_range(&b, 0, 1, true), Some(TextRange::new(0, 2)));
    }
}
