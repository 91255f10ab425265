//! Character classification for word boundary detection.
//!
//! Every char classifies to exactly one of three classes. A **word** is a
//! maximal run of one class; a **WORD** (big word) is a maximal run of
//! non-whitespace, which is modeled here by collapsing punctuation into
//! the word class when `big_word` is set.
//!
//! Classification is locale-independent: Unicode letters and digits are
//! word chars, whitespace (including newlines) is whitespace, everything
//! else is punctuation.

// ---------------------------------------------------------------------------
// CharClass
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Letters and digits.
    Word,
    /// Non-blank, non-word characters (operators, brackets, etc.).
    Punctuation,
    /// Whitespace, including `\n` and `\r`.
    Whitespace,
}

/// Classify a character.
///
/// With `big_word` set, punctuation collapses into [`CharClass::Word`] so
/// that only whitespace separates tokens (`W`/`B`/`E` motions).
#[inline]
#[must_use]
pub fn classify(ch: char, big_word: bool) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if big_word || ch.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
