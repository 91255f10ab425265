use proptest::prelude::*;
use vi_motion::buffer::{RopeBuffer, TextBuffer};
use vi_motion::charclass::classify;
use vi_motion::quote::find_block_quote_in_line;
use vi_motion::sentence::{find_next_sentence_end, find_next_sentence_start};
use vi_motion::word::{find_next_word_end, find_next_word_start};

// Text with the edge cases the scanners care about: punctuation runs,
// blank and whitespace-only lines, escapes and quotes, non-ASCII.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 .!?,;:\\-_]{0,50}",
        "[a-zA-Z0-9 .!?'\")\\]\n]{0,200}",
        r"[a-z ]{0,20}\n\n[a-z ]{0,20}",
        "[ \t]{0,10}\n[ \t]{0,10}\n[a-z]{0,10}",
        r#"[a-z"'\\ ]{0,40}"#,
        "[\u{0020}-\u{007E}\u{00E0}-\u{00FF}\u{4E00}-\u{4E10}\n]{0,80}",
    ]
}

proptest! {
    #[test]
    fn word_start_round_trip_never_overshoots(
        text in text_strategy(),
        pos in 0usize..200,
        big_word in any::<bool>(),
    ) {
        let buf = RopeBuffer::from_text(&text);
        if buf.is_empty() {
            return Ok(());
        }
        let pos = pos % buf.len();
        let forward = find_next_word_start(&buf, pos, 1, big_word, false);
        if forward > pos {
            let back = find_next_word_start(&buf, forward, -1, big_word, false);
            prop_assert!(back <= pos, "w from {pos} to {forward}, b back to {back}");
        }
    }

    #[test]
    fn word_end_lands_on_a_type_transition(
        text in text_strategy(),
        pos in 0usize..200,
    ) {
        let buf = RopeBuffer::from_text(&text);
        if buf.is_empty() {
            return Ok(());
        }
        let pos = pos % buf.len();
        let res = find_next_word_end(&buf, pos, 1, false, false);
        prop_assert!(res < buf.len());
        prop_assert!(
            res == buf.len() - 1
                || classify(buf.char_at(res), false) != classify(buf.char_at(res + 1), false),
            "end at {res} from {pos} is not a transition"
        );
    }

    #[test]
    fn word_motions_stay_in_bounds(
        text in text_strategy(),
        pos in 0usize..200,
        count in -5isize..=5,
        big_word in any::<bool>(),
    ) {
        let buf = RopeBuffer::from_text(&text);
        if buf.is_empty() {
            return Ok(());
        }
        let pos = pos % buf.len();
        let start = find_next_word_start(&buf, pos, count, big_word, false);
        prop_assert!(start <= buf.len());
        let end = find_next_word_end(&buf, pos, count, big_word, false);
        prop_assert!(end < buf.len());
    }

    #[test]
    fn sentence_motions_never_panic_and_stay_in_bounds(
        text in text_strategy(),
        pos in 0usize..200,
        count in -3isize..=3,
    ) {
        let buf = RopeBuffer::from_text(&text);
        if buf.is_empty() || count == 0 {
            return Ok(());
        }
        let pos = pos % buf.len();
        if let Some(offset) = find_next_sentence_start(&buf, pos, count, false, false).offset() {
            prop_assert!(offset <= buf.len());
        }
        if let Some(offset) = find_next_sentence_end(&buf, pos, count, false, false).offset() {
            prop_assert!(offset <= buf.len());
        }
    }

    #[test]
    fn quote_spans_are_well_formed(
        text in text_strategy(),
        pos in 0usize..200,
        quote in prop_oneof![Just('"'), Just('\'')],
    ) {
        let buf = RopeBuffer::from_text(&text);
        let pos = if buf.is_empty() { 0 } else { pos % buf.len() };
        if let Some(outer) = find_block_quote_in_line(&buf, pos, quote, true) {
            prop_assert!(outer.end <= buf.len());
            prop_assert!(outer.len() >= 2);
            prop_assert_eq!(buf.char_at(outer.start), quote);
            prop_assert_eq!(buf.char_at(outer.end - 1), quote);
        }
        if let Some(inner) = find_block_quote_in_line(&buf, pos, quote, false) {
            prop_assert!(inner.end <= buf.len());
        }
    }
}
