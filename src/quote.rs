//! Quoted-span text objects (`i"`, `a'`, ...).
//!
//! Finds the quoted span around (or ahead of) the caret on the current
//! line. Pairing is positional: unescaped occurrences of the quote char on
//! the line alternate open, close, open, close. A quote preceded by an odd
//! number of backslashes is escaped and invisible to the search. The scan
//! never crosses a line ending.
//!
//! Caret placement decides the pairing. A caret between a pair selects it;
//! a caret before any quote (or sitting on an opening quote) selects the
//! next full pair ahead on the line. Outer spans include both delimiters,
//! inner spans cover strictly the content.

use crate::buffer::{char_at, TextBuffer};
use crate::span::{Direction, TextRange};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The quoted span around `caret_offset` on its line.
///
/// Returns `None` when no complete pair of unescaped `quote` chars exists
/// on the caret's line at or after the pairing position. An inner span of
/// an empty quoted string (`""`) is an empty range between the quotes.
#[must_use]
pub fn find_block_quote_in_line<B: TextBuffer + ?Sized>(
    buf: &B,
    caret_offset: usize,
    quote: char,
    is_outer: bool,
) -> Option<TextRange> {
    let quote_after_caret = index_of_next(buf, quote, caret_offset)?;
    let quote_before_caret = index_of_previous(buf, quote, caret_offset);
    let quotes_before_caret = occurrences_before_offset(buf, quote, caret_offset);

    // On an opening quote (even number of quotes behind) or with nothing
    // behind at all, the pair ahead of the caret is the target.
    let (left_quote, right_quote) = match quote_before_caret {
        Some(before)
            if !(caret_offset == quote_after_caret && quotes_before_caret % 2 == 0) =>
        {
            (before, quote_after_caret)
        }
        _ => {
            let left = quote_after_caret;
            let right = index_of_next(buf, quote, left + 1)?;
            (left, right)
        }
    };

    if is_outer {
        Some(TextRange::new(left_quote, right_quote + 1))
    } else {
        Some(TextRange::new(left_quote + 1, right_quote))
    }
}

// ---------------------------------------------------------------------------
// Line-local char search
// ---------------------------------------------------------------------------

/// Closest unescaped `char` at or after `start_index`, stopping at the
/// line ending.
fn index_of_next<B: TextBuffer + ?Sized>(buf: &B, ch: char, start_index: usize) -> Option<usize> {
    find_character_position(buf, ch, start_index as isize, Direction::Forwards)
}

/// Closest unescaped `char` strictly before `end_index`, stopping at the
/// line ending.
fn index_of_previous<B: TextBuffer + ?Sized>(buf: &B, ch: char, end_index: usize) -> Option<usize> {
    if end_index == 0 || end_index > buf.len() || buf.char_at(end_index - 1) == '\n' {
        return None;
    }
    find_character_position(buf, ch, end_index as isize - 1, Direction::Backwards)
}

/// Number of unescaped occurrences of `char` on the caret's line strictly
/// before `end_offset`.
fn occurrences_before_offset<B: TextBuffer + ?Sized>(
    buf: &B,
    ch: char,
    end_offset: usize,
) -> usize {
    let mut counter = 0;
    let mut i = end_offset;
    while i > 0 && buf.char_at(i - 1) != '\n' {
        match index_of_previous(buf, ch, i) {
            Some(pos) => {
                i = pos;
                counter += 1;
            }
            None => break,
        }
    }
    counter
}

fn find_character_position<B: TextBuffer + ?Sized>(
    buf: &B,
    ch: char,
    start_index: isize,
    direction: Direction,
) -> Option<usize> {
    let size = buf.len() as isize;
    let mut pos = start_index;
    while pos >= 0 && pos < size && char_at(buf, pos) != '\n' {
        if char_at(buf, pos) == ch && (pos == 0 || is_quote_without_escape(buf, pos, ch)) {
            return Some(pos as usize);
        }
        pos += direction.offset();
    }
    None
}

/// True when `quote` sits at `position` with an even number of immediately
/// preceding backslashes.
fn is_quote_without_escape<B: TextBuffer + ?Sized>(buf: &B, position: isize, quote: char) -> bool {
    if char_at(buf, position) != quote {
        return false;
    }
    let mut i = position;
    let mut backslash_counter = 0;
    while i > 0 && char_at(buf, i - 1) == '\\' {
        backslash_counter += 1;
        i -= 1;
    }
    backslash_counter % 2 == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    fn outer(text: &str, caret: usize, quote: char) -> Option<TextRange> {
        find_block_quote_in_line(&RopeBuffer::from_text(text), caret, quote, true)
    }

    fn inner(text: &str, caret: usize, quote: char) -> Option<TextRange> {
        find_block_quote_in_line(&RopeBuffer::from_text(text), caret, quote, false)
    }

    // -- Caret inside a pair ------------------------------------------------

    #[test]
    fn caret_inside_first_pair() {
        let text = r#"He said "hi" to "her""#;
        assert_eq!(outer(text, 9, '"'), Some(TextRange::new(8, 12)));
        assert_eq!(inner(text, 9, '"'), Some(TextRange::new(9, 11)));
    }

    #[test]
    fn caret_inside_second_pair() {
        let text = r#"He said "hi" to "her""#;
        assert_eq!(outer(text, 18, '"'), Some(TextRange::new(16, 21)));
        assert_eq!(inner(text, 18, '"'), Some(TextRange::new(17, 20)));
    }

    #[test]
    fn caret_on_closing_quote_selects_that_pair() {
        let text = r#"He said "hi" to "her""#;
        assert_eq!(outer(text, 11, '"'), Some(TextRange::new(8, 12)));
    }

    // -- Caret before or on an opening quote --------------------------------

    #[test]
    fn caret_before_any_quote_selects_pair_ahead() {
        let text = r#"He said "hi" to "her""#;
        assert_eq!(outer(text, 0, '"'), Some(TextRange::new(8, 12)));
        assert_eq!(inner(text, 3, '"'), Some(TextRange::new(9, 11)));
    }

    #[test]
    fn caret_on_opening_quote_selects_pair_ahead() {
        let text = r#""hi" there"#;
        assert_eq!(outer(text, 0, '"'), Some(TextRange::new(0, 4)));
    }

    #[test]
    fn caret_between_pairs_pairs_with_surroundings() {
        // Between the two pairs the closing quote behind and the opening
        // quote ahead pair up, matching the alternating convention.
        let text = r#""a" x "b""#;
        assert_eq!(outer(text, 4, '"'), Some(TextRange::new(2, 7)));
    }

    // -- Escapes ------------------------------------------------------------

    #[test]
    fn escaped_quotes_are_invisible() {
        let text = r#"say \"hi\" "ok""#;
        assert_eq!(outer(text, 12, '"'), Some(TextRange::new(11, 15)));
        assert_eq!(inner(text, 12, '"'), Some(TextRange::new(12, 14)));
    }

    #[test]
    fn double_backslash_does_not_escape() {
        // The backslash itself is escaped, so the quote at 6 is real.
        let text = r#"ab \\"cd""#;
        assert_eq!(outer(text, 7, '"'), Some(TextRange::new(5, 9)));
    }

    // -- Empty and failure cases --------------------------------------------

    #[test]
    fn empty_quoted_string() {
        let text = r#"x "" y"#;
        assert_eq!(outer(text, 3, '"'), Some(TextRange::new(2, 4)));
        let i = inner(text, 3, '"');
        assert_eq!(i, Some(TextRange::new(3, 3)));
        assert!(i.is_some_and(TextRange::is_empty));
    }

    #[test]
    fn unpaired_quote_fails() {
        assert_eq!(outer(r#"only "one"#, 6, '"'), None);
    }

    #[test]
    fn no_quotes_fails() {
        assert_eq!(outer("no quotes here", 3, '"'), None);
    }

    #[test]
    fn search_stops_at_line_ending() {
        // The pair on the next line is out of reach.
        assert_eq!(outer("abc\n\"hi\"", 1, '"'), None);
    }

    #[test]
    fn single_quotes_work_too() {
        let text = "it 'works' fine";
        assert_eq!(outer(text, 5, '\''), Some(TextRange::new(3, 10)));
        assert_eq!(inner(text, 5, '\''), Some(TextRange::new(4, 9)));
    }

    #[test]
    fn empty_buffer_fails() {
        assert_eq!(outer("", 0, '"'), None);
    }
}
