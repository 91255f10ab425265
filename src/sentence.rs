//! Sentence boundary search (`(`, `)`, `is`, `as`).
//!
//! A sentence ends at a `.`, `!` or `?`, optionally followed by a run of
//! `)`, `]`, `"` or `'` closers, itself followed by whitespace or the end
//! of the buffer. A sentence starts at the first non-whitespace char after
//! an end. Paragraph boundaries always terminate a sentence too, so every
//! scan computes the nearest paragraph boundary as well and keeps
//! whichever of the two lies closer in the search direction. A form feed
//! is a section marker and ends a sentence on its own.
//!
//! The counted motions report a [`SentenceMotion`] rather than a bare
//! offset, because operators need to distinguish a motion that landed from
//! one that ran out of buffer, and from one whose full count could not be
//! satisfied when the caller demanded all of it.

use crate::buffer::{char_at, Cursor, TextBuffer};
use crate::paragraph::next_paragraph_offset;
use crate::span::{Direction, TextRange};

// ---------------------------------------------------------------------------
// SentenceMotion
// ---------------------------------------------------------------------------

/// Outcome of a counted sentence motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceMotion {
    /// The full count was consumed; the motion lands here.
    Reached(usize),
    /// The scan ran out of buffer; the offset is the clamped edge.
    Saturated(usize),
    /// The caller required the full count and this many steps remained
    /// unmet. No target offset exists.
    Insufficient(usize),
}

impl SentenceMotion {
    /// The landing offset, unless the count went unmet.
    #[must_use]
    pub const fn offset(self) -> Option<usize> {
        match self {
            Self::Reached(offset) | Self::Saturated(offset) => Some(offset),
            Self::Insufficient(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The `count`-th sentence start from the caret. Negative counts search
/// backwards.
///
/// `count_current` makes a caret already standing on a start count as the
/// first hit. With `require_all`, a count the buffer cannot satisfy
/// reports [`SentenceMotion::Insufficient`] instead of clamping.
#[must_use]
pub fn find_next_sentence_start<B: TextBuffer + ?Sized>(
    buf: &B,
    caret_offset: usize,
    count: isize,
    count_current: bool,
    require_all: bool,
) -> SentenceMotion {
    counted_scan(buf, caret_offset, count, require_all, |res, remaining| {
        sentence_start(buf, res, buf.len() as isize, remaining, count_current)
    })
}

/// The `count`-th sentence end from the caret. Negative counts search
/// backwards.
#[must_use]
pub fn find_next_sentence_end<B: TextBuffer + ?Sized>(
    buf: &B,
    caret_offset: usize,
    count: isize,
    count_current: bool,
    require_all: bool,
) -> SentenceMotion {
    let total = count.abs();
    counted_scan(buf, caret_offset, count, require_all, |res, remaining| {
        // Standing on an end only counts for the very first step.
        sentence_end(
            buf,
            res,
            buf.len() as isize,
            remaining,
            count_current && remaining.abs() == total,
        )
    })
}

/// Shared count-repetition loop for the two sentence motions.
///
/// `step` receives the current offset and the signed remaining count and
/// returns the next boundary or `-1`.
fn counted_scan<B, F>(
    buf: &B,
    caret_offset: usize,
    count: isize,
    require_all: bool,
    mut step: F,
) -> SentenceMotion
where
    B: TextBuffer + ?Sized,
    F: FnMut(isize, isize) -> isize,
{
    let dir: isize = if count > 0 { 1 } else { -1 };
    let mut count = count.abs();
    let total = count;
    let max = buf.len() as isize;

    let mut res = caret_offset as isize;
    while count > 0 && res >= 0 && res <= max - 1 {
        res = step(res, count * dir);
        if res == 0 || res == max - 1 {
            count -= 1;
            break;
        }
        count -= 1;
    }

    let edge = if dir > 0 { (max - 1).max(0) } else { 0 };
    if res < 0 && (!require_all || total == 1) {
        SentenceMotion::Saturated(edge as usize)
    } else if count > 0 && total > 1 && !require_all {
        SentenceMotion::Saturated(edge as usize)
    } else if (count > 0 || res < 0) && total > 1 && require_all {
        SentenceMotion::Insufficient(count.max(1) as usize)
    } else {
        SentenceMotion::Reached(res.max(0) as usize)
    }
}

/// The sentence range around the caret.
///
/// With an active multi-char selection the range extends the selection by
/// `count` sentences in the caret's direction; otherwise it is the
/// `count`-sentence object at the caret, where outer objects absorb the
/// trailing whitespace run and inner objects do not.
#[must_use]
pub fn find_sentence_range<B: TextBuffer + ?Sized, C: Cursor>(
    buf: &B,
    caret: &C,
    count: isize,
    is_outer: bool,
) -> TextRange {
    if buf.is_empty() {
        return TextRange::point(0);
    }
    let max = buf.len() as isize;
    let offset = caret.offset() as isize;
    let ssel = caret.selection_start() as isize;
    let esel = caret.selection_end() as isize;

    if (esel - ssel).abs() > 1 {
        if offset == esel - 1 {
            // Forward selection: extend past its end.
            let end = sentence_range_end(buf, offset, max, count, is_outer, true);
            TextRange::ordered(ssel as usize, (end + 1) as usize)
        } else {
            let start = sentence_range_end(buf, offset, max, -count, is_outer, true);
            TextRange::ordered((esel - 1) as usize, (start + 1) as usize)
        }
    } else {
        let end = sentence_range_end(buf, offset, max, count, is_outer, false);
        let space = is_outer && !is_space_char(char_at(buf, end));
        let start = sentence_range_end(buf, offset, max, -1, space, false);
        TextRange::ordered(start as usize, (end + 1) as usize)
    }
}

// ---------------------------------------------------------------------------
// Boundary scans
// ---------------------------------------------------------------------------

/// One sentence start from `start` in the direction of `dir`'s sign.
///
/// Works by locating the nearest sentence end behind the caret, skipping
/// the whitespace run after it, and falling forward/backward to the next
/// end when that did not pass the caret. The result is reconciled against
/// the paragraph boundary; whichever is closer wins. Returns `-1` when no
/// start exists in the direction.
fn sentence_start<B: TextBuffer + ?Sized>(
    buf: &B,
    start: isize,
    max: isize,
    dir: isize,
    count_current: bool,
) -> isize {
    let dir = if dir > 0 { 1 } else { -1 };
    let lline = buf.offset_to_line(start.max(0) as usize) as isize;
    let np = next_paragraph_offset(buf, lline, direction_of(dir), false);

    let mut end = if start < max && char_at(buf, start) == '\n' && !count_current {
        sentence_end(buf, start, max, -1, false)
    } else {
        sentence_end(buf, start, max, -1, true)
    };
    if end == start && count_current && char_at(buf, end) == '\n' {
        return end;
    }
    let pos = end - 1;
    if end >= 0 {
        let mut offset = end + 1;
        while offset < max {
            if !char_at(buf, offset).is_whitespace() {
                break;
            }
            offset += 1;
        }
        if dir > 0 {
            if offset == start && count_current {
                return offset;
            } else if offset > start {
                return offset;
            }
        } else if offset == start && count_current {
            return offset;
        } else if offset < start {
            return offset;
        }
    }

    end = if dir > 0 {
        sentence_end(buf, start, max, dir, true)
    } else {
        sentence_end(buf, pos, max, dir, count_current)
    };
    let mut res = end + 1;
    if end != -1 && (char_at(buf, end) != '\n' || !count_current) {
        while res < max {
            if !char_at(buf, res).is_whitespace() {
                break;
            }
            res += 1;
        }
    }

    reconcile_with_paragraph(res, np, start, dir, count_current, true)
}

/// One sentence end from `start` in the direction of `dir`'s sign.
///
/// Scans for `.!?` followed by an optional closer run and whitespace, for
/// newline runs (a paragraph boundary wins over a punctuation end), and
/// for form feeds. Returns `-1` when no end exists in the direction.
#[allow(clippy::too_many_lines)]
fn sentence_end<B: TextBuffer + ?Sized>(
    buf: &B,
    start: isize,
    max: isize,
    dir: isize,
    count_current: bool,
) -> isize {
    let dir = if dir > 0 { 1 } else { -1 };
    if dir > 0 && start >= max - 1 {
        return -1;
    } else if dir < 0 && start <= 0 {
        return -1;
    }

    let lline = buf.offset_to_line(start as usize) as isize;
    let mut np = next_paragraph_offset(buf, lline, direction_of(dir), false);

    let mut res = -1;
    let mut offset = start;
    let mut found = false;
    while offset >= 0 && offset < max && !found {
        let mut ch = char_at(buf, offset);
        if matches!(ch, '.' | '!' | '?') {
            let end = offset;
            offset += 1;
            while offset < max {
                ch = char_at(buf, offset);
                if !matches!(ch, ')' | ']' | '"' | '\'') {
                    break;
                }
                offset += 1;
            }

            if offset >= max || ch.is_whitespace() {
                if offset - 1 == start && !count_current {
                    // Started exactly on a sentence end; resume the scan
                    // from it to find the real next one.
                    offset = end;
                } else {
                    res = offset - 1;
                    found = true;
                }
            } else {
                // Not followed by whitespace, so not an end after all.
                offset = end;
            }
        } else if ch == '\n' {
            let end = offset;
            if dir > 0 {
                offset += 1;
                while offset < max {
                    ch = char_at(buf, offset);
                    if ch != '\n' {
                        offset -= 1;
                        break;
                    }
                    if offset == np && (end - 1 != start || count_current) {
                        break;
                    }
                    offset += 1;
                }
                if offset == np && (end - 1 != start || count_current) {
                    res = end - 1;
                    found = true;
                } else if offset > end {
                    // A newline run trailing the buffer exits the scan at
                    // `max`; the boundary is the run's last newline.
                    res = offset.min(max - 1);
                    np = res;
                    found = true;
                } else if offset == end
                    && offset > 0
                    && char_at(buf, offset - 1) == '\n'
                    && count_current
                {
                    res = end;
                    np = res;
                    found = true;
                }
            } else {
                if offset > 0 {
                    offset -= 1;
                    while offset > 0 {
                        ch = char_at(buf, offset);
                        if ch != '\n' {
                            offset += 1;
                            break;
                        }
                        offset -= 1;
                    }
                }
                if offset < end {
                    res = if end == start && count_current { end } else { offset - 1 };
                    found = true;
                }
            }
            offset = end;
        } else if ch == '\u{000C}' {
            res = offset;
            found = true;
        }
        offset += dir;
    }

    reconcile_with_paragraph(res, np, start, dir, count_current, false)
}

/// Pick the sentence boundary or the paragraph boundary, whichever lies
/// closer to `start` in the scan direction.
fn reconcile_with_paragraph(
    res: isize,
    np: isize,
    start: isize,
    dir: isize,
    count_current: bool,
    fall_back_to_paragraph: bool,
) -> isize {
    let mut res = res;
    if res >= 0 && np >= 0 {
        if dir > 0 {
            if np < res || res < start {
                res = np;
            }
        } else if np > res || (res >= start && !count_current) {
            res = np;
        }
    } else if fall_back_to_paragraph && res == -1 && np >= 0 {
        res = np;
    }
    res
}

/// One endpoint of a sentence object, walking `count` sentences from
/// `start`.
///
/// Classifies the caret position (blank line, sentence start, sentence
/// end, mid-sentence, between sentences) to decide whether the walk
/// alternates starts and ends (inner) or repeats one kind (outer), then
/// repeats and fixes up the endpoint for outer objects and line endings.
#[allow(clippy::too_many_lines)]
fn sentence_range_end<B: TextBuffer + ?Sized>(
    buf: &B,
    start: isize,
    max: isize,
    count: isize,
    is_outer: bool,
    oneway: bool,
) -> isize {
    let dir: isize = if count > 0 { 1 } else { -1 };
    let mut count = count.abs();
    let toggle = !is_outer;
    let mut findend = dir < 1;

    let eprev = sentence_end(buf, start, max, -1, true);
    let enext = sentence_end(buf, start, max, 1, true);
    let sprev = sentence_start(buf, start, max, -1, true);
    let snext = sentence_start(buf, start, max, 1, true);

    // Even steps land on starts, odd steps on ends.
    let mut which: isize;
    if snext == eprev {
        // On a blank line.
        if dir < 0 && !oneway {
            return start;
        }
        which = 0;
        if oneway {
            findend = dir > 0;
        } else if dir > 0 && start < max - 1 && !is_space_char(char_at(buf, start + 1)) {
            findend = true;
        }
    } else if start == snext {
        if dir < 0 && !oneway {
            return start;
        }
        which = if dir > 0 { 1 } else { 0 };
        if dir < 0 && oneway {
            findend = false;
        }
    } else if start == enext {
        if dir > 0 && !oneway {
            return start;
        }
        which = 0;
        if dir > 0 && oneway {
            findend = true;
        }
    } else if start >= sprev && start <= enext && enext < snext {
        // Mid-sentence.
        which = if dir > 0 { 1 } else { 0 };
    } else {
        // Between sentences.
        which = if dir > 0 { 0 } else { 1 };
        if dir > 0 {
            if oneway {
                if start < snext - 1 {
                    findend = true;
                } else if start == snext - 1 {
                    count += 1;
                }
            } else {
                findend = true;
            }
        } else if oneway {
            if start > eprev + 1 {
                findend = false;
            } else if start == eprev + 1 {
                count += 1;
            }
        } else {
            findend = true;
        }
    }

    let mut res = start;
    while count > 0 && res >= 0 && res <= max - 1 {
        res = if (toggle && which % 2 == 1) || (is_outer && findend) {
            sentence_end(buf, res, max, dir, false)
        } else {
            sentence_start(buf, res, max, dir, false)
        };
        if res == 0 || res == max - 1 {
            count -= 1;
            break;
        }
        if toggle {
            if which % 2 == 1 && dir < 0 {
                res += 1;
            } else if which % 2 == 0 && dir > 0 {
                res -= 1;
            }
        }
        which += 1;
        count -= 1;
    }

    if res < 0 || count > 0 {
        res = if dir > 0 { (max - 1).max(0) } else { 0 };
    } else if is_outer && ((dir < 0 && findend) || (dir > 0 && !findend)) {
        if res != 0 && res != max - 1 {
            res -= dir;
        }
    }
    // Never end on the line break itself unless the line is empty.
    if char_at(buf, res) == '\n' && res > 0 && char_at(buf, res - 1) != '\n' {
        res -= 1;
    }
    res
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const fn direction_of(dir: isize) -> Direction {
    if dir > 0 { Direction::Forwards } else { Direction::Backwards }
}

/// Space separators only. Unlike `char::is_whitespace` this excludes
/// `\n`, `\r` and `\t`, which the object classification must not treat
/// as plain spacing.
fn is_space_char(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
