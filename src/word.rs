//! Word and WORD boundary search.
//!
//! Finds the start or end of the next/previous word from an arbitrary
//! offset, the primitive behind the `w`/`b`/`e`/`ge` family of motions:
//!
//! | Operation | Count sign | Vim keys |
//! |-----------------------------|----------|----------|
//! | [`find_next_word_start`] | positive | `w` / `W` |
//! | [`find_next_word_start`] | negative | `b` / `B` |
//! | [`find_next_word_end`] | positive | `e` / `E` |
//! | [`find_next_word_end`] | negative | `ge` / `gE` |
//!
//! A word is a maximal run of one [`CharClass`]; with `big_word` only
//! whitespace separates words. Both searches repeat a single-step
//! primitive `count` times and saturate once a step is a no-op or reaches
//! either buffer edge, so over-large counts never oscillate. Searches that
//! walk off the buffer clamp to `0` backwards and `len - 1` / `len`
//! forwards — word motion never fails.

use crate::buffer::{char_at, TextBuffer};
use crate::charclass::{classify, CharClass};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Offset of the start of the `count`-th next word.
///
/// A negative `count` searches backwards. Backward motion always lands on
/// a word, never inside whitespace: starting inside a whitespace run first
/// walks back onto the end of the previous word. With `space_words`,
/// whitespace runs themselves count as words.
#[must_use]
pub fn find_next_word_start<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: usize,
    count: isize,
    big_word: bool,
    space_words: bool,
) -> usize {
    let size = buf.len() as isize;
    let step: isize = if count >= 0 { 1 } else { -1 };
    let count = count.unsigned_abs();
    let start = pos as isize;

    let mut res = start;
    for _ in 0..count {
        res = word_start_one(buf, res, size, step, big_word, space_words);
        if res == start || res == 0 || res == size - 1 {
            break;
        }
    }
    res.max(0) as usize
}

/// Offset of the last char of the `count`-th next word.
///
/// A negative `count` searches backwards. The forward search skips a
/// whitespace run found one char ahead before comparing classes, so the
/// result is always the final char of a token.
#[must_use]
pub fn find_next_word_end<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: usize,
    count: isize,
    big_word: bool,
    space_words: bool,
) -> usize {
    let size = buf.len() as isize;
    let step: isize = if count >= 0 { 1 } else { -1 };
    let count = count.unsigned_abs();
    let start = pos as isize;

    let mut res = start;
    for _ in 0..count {
        res = word_end_one(buf, res, size, step, big_word, space_words);
        if res == start || res == 0 || res == size - 1 {
            break;
        }
    }
    res.max(0) as usize
}

// ---------------------------------------------------------------------------
// Single-step primitives
// ---------------------------------------------------------------------------

/// One step to the start of the next/previous word.
///
/// Forward: skip the rest of the current class run, then any whitespace,
/// landing on the first char of the next run. Backward: first walk back
/// over whitespace onto the end of the previous word, then back to that
/// word's first char.
fn word_start_one<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: isize,
    size: isize,
    step: isize,
    big_word: bool,
    space_words: bool,
) -> isize {
    let mut pos = if pos < size { pos } else { size - 1 };

    // Backward searches must land on a word: skip trailing whitespace so
    // the class comparison below starts from the previous word's end.
    if step < 0 && pos > 0 {
        if classify(char_at(buf, pos - 1), big_word) == CharClass::Whitespace && !space_words {
            pos = skip_space(buf, pos - 1, step, size) + 1;
        }
        if pos > 0
            && classify(char_at(buf, pos), big_word)
                != classify(char_at(buf, pos - 1), big_word)
        {
            pos += step;
        }
    }

    let mut res = pos;
    if pos < 0 || pos >= size {
        return pos;
    }

    let mut class = classify(char_at(buf, pos), big_word);
    if class == CharClass::Whitespace && step < 0 && pos > 0 && !space_words {
        class = classify(char_at(buf, pos - 1), big_word);
    }

    pos += step;
    let mut found = false;
    while pos >= 0 && pos < size && !found {
        let new_class = classify(char_at(buf, pos), big_word);
        if new_class != class {
            if new_class == CharClass::Whitespace && step >= 0 && !space_words {
                pos = skip_space(buf, pos, step, size);
                res = pos;
            } else if step < 0 {
                res = pos + 1;
            } else {
                res = pos;
            }
            class = classify(char_at(buf, res), big_word);
            found = true;
        }
        pos += step;
    }

    if found {
        if res < 0 {
            res = 0;
        } else if res >= size {
            res = size - 1;
        }
    } else if pos <= 0 {
        res = 0;
    } else if pos >= size {
        res = size;
    }
    res
}

/// One step to the end of the current/next word. Structural mirror of
/// [`word_start_one`] with the whitespace skip looking one char ahead.
fn word_end_one<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: isize,
    size: isize,
    step: isize,
    big_word: bool,
    space_words: bool,
) -> isize {
    let mut pos = pos;

    // Forward searches skip leading whitespace one char ahead so we start
    // the class comparison from the start of the next word.
    if step > 0 && pos < size - 1 {
        if classify(char_at(buf, pos + 1), big_word) == CharClass::Whitespace && !space_words {
            pos = skip_space(buf, pos + 1, step, size) - 1;
        }
        if pos < size - 1
            && classify(char_at(buf, pos), big_word)
                != classify(char_at(buf, pos + 1), big_word)
        {
            pos += step;
        }
    }

    let mut res = pos;
    if pos < 0 || pos >= size {
        return pos;
    }

    let mut class = classify(char_at(buf, pos), big_word);
    if class == CharClass::Whitespace && step >= 0 && pos < size - 1 && !space_words {
        class = classify(char_at(buf, pos + 1), big_word);
    }

    pos += step;
    let mut found = false;
    while pos >= 0 && pos < size && !found {
        let new_class = classify(char_at(buf, pos), big_word);
        if new_class != class {
            if step >= 0 {
                res = pos - 1;
            } else if new_class == CharClass::Whitespace && step < 0 && !space_words {
                pos = skip_space(buf, pos, step, size);
                res = pos;
            } else {
                res = pos;
            }
            found = true;
        }
        pos += step;
    }

    if found {
        if res < 0 {
            res = 0;
        } else if res >= size {
            res = size - 1;
        }
    } else if pos == size {
        res = size - 1;
    }
    res
}

/// Skip whitespace starting at `offset` in the direction of `step`.
///
/// An empty line (two consecutive newlines) is a word boundary, so the
/// skip stops there. May return `-1` when a backward skip walks off the
/// buffer start.
fn skip_space<B: TextBuffer + ?Sized>(buf: &B, offset: isize, step: isize, size: isize) -> isize {
    let mut offset = offset;
    let mut prev = '\0';
    while offset >= 0 && offset < size {
        let c = char_at(buf, offset);
        if c == '\n' && c == prev {
            break;
        }
        if classify(c, false) != CharClass::Whitespace {
            break;
        }
        prev = c;
        offset += step;
    }
    if offset < size { offset } else { size - 1 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    fn start(text: &str, pos: usize, count: isize) -> usize {
        find_next_word_start(&RopeBuffer::from_text(text), pos, count, false, false)
    }

    fn start_big(text: &str, pos: usize, count: isize) -> usize {
        find_next_word_start(&RopeBuffer::from_text(text), pos, count, true, false)
    }

    fn end(text: &str, pos: usize, count: isize) -> usize {
        find_next_word_end(&RopeBuffer::from_text(text), pos, count, false, false)
    }

    fn end_big(text: &str, pos: usize, count: isize) -> usize {
        find_next_word_end(&RopeBuffer::from_text(text), pos, count, true, false)
    }

    // -- Forward word start (w) ---------------------------------------------

    #[test]
    fn w_simple_two_words() {
        assert_eq!(start("hello world", 0, 1), 6);
    }

    #[test]
    fn w_from_middle_of_word() {
        assert_eq!(start("hello world", 2, 1), 6);
    }

    #[test]
    fn w_multiple_spaces() {
        assert_eq!(start("hello   world", 0, 1), 8);
    }

    #[test]
    fn w_punctuation_is_its_own_word() {
        assert_eq!(start("hello.world", 0, 1), 5);
        assert_eq!(start("hello.world", 5, 1), 6);
    }

    #[test]
    fn w_mixed_operators() {
        assert_eq!(start("x=y+z", 0, 1), 1);
        assert_eq!(start("x=y+z", 1, 1), 2);
        assert_eq!(start("x=y+z", 2, 1), 3);
        assert_eq!(start("x=y+z", 3, 1), 4);
    }

    #[test]
    fn w_across_lines() {
        assert_eq!(start("hello\nworld", 0, 1), 6);
    }

    #[test]
    fn w_stops_at_empty_line() {
        // The empty line between the words is itself a word boundary.
        assert_eq!(start("hello\n\nworld", 0, 1), 6);
        assert_eq!(start("hello\n\nworld", 6, 1), 7);
    }

    #[test]
    fn w_count_repeats() {
        assert_eq!(start("one two three", 0, 2), 8);
    }

    #[test]
    fn w_count_saturates_at_buffer_end() {
        assert_eq!(start("one two", 0, 40), 7);
    }

    #[test]
    fn w_no_next_word_clamps_to_len() {
        assert_eq!(start("hello", 0, 1), 5);
    }

    #[test]
    fn w_from_whitespace() {
        assert_eq!(start("  hello", 0, 1), 2);
    }

    #[test]
    fn w_empty_buffer() {
        assert_eq!(start("", 0, 1), 0);
    }

    // -- Backward word start (b) --------------------------------------------

    #[test]
    fn b_simple_two_words() {
        assert_eq!(start("hello world", 6, -1), 0);
    }

    #[test]
    fn b_from_middle_of_word() {
        assert_eq!(start("hello world", 8, -1), 6);
    }

    #[test]
    fn b_lands_on_word_not_whitespace() {
        assert_eq!(start("hello   world", 8, -1), 0);
    }

    #[test]
    fn b_from_inside_whitespace() {
        // Starting inside the gap steps onto "hello", then to its start.
        assert_eq!(start("hello   world", 6, -1), 0);
    }

    #[test]
    fn b_punctuation_boundary() {
        assert_eq!(start("hello.world", 6, -1), 5);
        assert_eq!(start("hello.world", 5, -1), 0);
    }

    #[test]
    fn b_at_buffer_start_stays() {
        assert_eq!(start("hello", 0, -1), 0);
    }

    #[test]
    fn b_count_repeats() {
        assert_eq!(start("one two three", 8, -2), 0);
    }

    #[test]
    fn b_count_saturates_at_buffer_start() {
        assert_eq!(start("one two three", 8, -40), 0);
    }

    // -- Forward word end (e) -----------------------------------------------

    #[test]
    fn e_to_end_of_current_word() {
        assert_eq!(end("hello world", 0, 1), 4);
    }

    #[test]
    fn e_already_at_end_goes_to_next() {
        assert_eq!(end("hello world", 4, 1), 10);
    }

    #[test]
    fn e_punctuation_boundary() {
        assert_eq!(end("hello.world", 0, 1), 4);
        assert_eq!(end("hello.world", 4, 1), 5);
        assert_eq!(end("hello.world", 5, 1), 10);
    }

    #[test]
    fn e_at_buffer_end_stays() {
        assert_eq!(end("hello", 4, 1), 4);
    }

    #[test]
    fn e_count_repeats() {
        assert_eq!(end("a b c", 0, 2), 4);
    }

    #[test]
    fn e_result_is_a_class_transition() {
        let buf = RopeBuffer::from_text("foo bar::baz  qux");
        let size = buf.len();
        for pos in 0..size {
            let res = find_next_word_end(&buf, pos, 1, false, false);
            assert!(
                res == size - 1
                    || classify(buf.char_at(res), false)
                        != classify(buf.char_at(res + 1), false),
                "end at {res} from {pos} is not a transition"
            );
        }
    }

    // -- Backward word end (ge) ---------------------------------------------

    #[test]
    fn ge_simple() {
        assert_eq!(end("hello world", 10, -1), 4);
    }

    #[test]
    fn ge_from_word_start() {
        assert_eq!(end("hello world", 6, -1), 4);
    }

    #[test]
    fn ge_at_buffer_start_stays() {
        assert_eq!(end("hello", 0, -1), 0);
    }

    // -- WORD variants ------------------------------------------------------

    #[test]
    fn big_w_merges_punctuation() {
        assert_eq!(start_big("hello.world next", 0, 1), 12);
    }

    #[test]
    fn big_b_merges_punctuation() {
        assert_eq!(start_big("hello.world next", 12, -1), 0);
    }

    #[test]
    fn big_e_merges_punctuation() {
        assert_eq!(end_big("hello.world next", 0, 1), 10);
        assert_eq!(end_big("hello.world next", 10, 1), 15);
    }

    // -- space_words --------------------------------------------------------

    #[test]
    fn space_words_treats_whitespace_as_a_word() {
        // With space_words the run of spaces is a stop, not skipped.
        assert_eq!(
            find_next_word_start(&RopeBuffer::from_text("a   b"), 0, 1, false, true),
            1
        );
    }

    // -- Round trips --------------------------------------------------------

    #[test]
    fn w_then_b_returns_to_start() {
        let buf = RopeBuffer::from_text("hello world foo");
        let mid = find_next_word_start(&buf, 0, 1, false, false);
        assert_eq!(mid, 6);
        assert_eq!(find_next_word_start(&buf, mid, -1, false, false), 0);
    }
}
