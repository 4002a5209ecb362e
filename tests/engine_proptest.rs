//! Property-based tests for the engine invariants
//!
//! These pin down the contracts that must hold for arbitrary input, not
//! just the handpicked cases: text round-tripping through a parse, and the
//! transactionality of failed attempts at arbitrary stream positions.

use glint::engine::{
    either, pattern, plain_text, scan, seq, word, GrammarBuilder, Language, Stream,
};
use proptest::prelude::*;
use regex::Regex;

/// Language recognizing digit runs as `number`, everything else raw
fn digit_language() -> Language {
    let mut b = GrammarBuilder::new();
    let top = b
        .compile(scan(pattern("^[0-9]+$").tag("number")))
        .unwrap();
    Language::new(b.build(top), ["[0-9]+", r"[\t \r]+|\n", "."]).unwrap()
}

proptest! {
    /// Concatenating the text fragments of a parse reproduces the input
    /// exactly: no characters gained or lost, whatever the input.
    #[test]
    fn parse_round_trips_text(input in ".*") {
        let language = digit_language();
        let fragments = language.fragments(&input);
        prop_assert_eq!(plain_text(&fragments), input);
    }

    /// Same property for multi-line input with explicit newlines mixed in.
    #[test]
    fn parse_round_trips_multiline_text(lines in prop::collection::vec("[a-z0-9=;]{0,8}", 0..6)) {
        let input = lines.join("\n");
        let language = digit_language();
        let fragments = language.fragments(&input);
        prop_assert_eq!(plain_text(&fragments), input);
    }

    /// A failed attempt restores the stream position, wherever the cursor
    /// started and whatever the tokens are.
    #[test]
    fn failed_attempts_leave_no_trace(
        tokens in prop::collection::vec("[a-c]{1,2}", 0..12),
        start in 0usize..12,
    ) {
        let mut b = GrammarBuilder::new();
        // Needs "aa" then "bb": fails on most streams, consuming partway first
        let top = b.compile(seq(["aa", "bb"])).unwrap();
        let g = b.build(top);

        let mut s = Stream::new(tokens.clone(), Regex::new(r"^[ \t\r\n]+$").unwrap());
        for _ in 0..start.min(tokens.len()) {
            s.next();
        }
        let before = s.position();
        if g.run(g.top(), &mut s).is_none() {
            prop_assert_eq!(s.position(), before);
        }
    }

    /// Ordered choice always yields the first matching alternative.
    #[test]
    fn ordered_choice_prefers_earlier_alternatives(token in "[ab]") {
        let mut b = GrammarBuilder::new();
        let top = b
            .compile(either([
                word(token.as_str()).tag("first"),
                word(token.as_str()).tag("second"),
            ]))
            .unwrap();
        let g = b.build(top);

        let mut s = Stream::new(vec![token], Regex::new(r"^[ \t\r\n]+$").unwrap());
        let res = g.run(g.top(), &mut s).unwrap();
        prop_assert_eq!(&res[0], &glint::Fragment::Open("first".to_string()));
    }
}
