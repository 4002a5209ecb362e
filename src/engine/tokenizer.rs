//! Regex-driven tokenizer
//!
//! Splits raw text into an ordered sequence of lexical tokens using a
//! prioritized union of patterns. The patterns are combined into a single
//! alternation preserving declaration order; the regex engine's
//! leftmost-first semantics make earlier patterns win on overlapping matches
//! at the same position, so a three-character operator must be listed before
//! its two-character prefix.
//!
//! Tokenization is a single deterministic pass, independent of the grammar,
//! and has no failure mode: the scan simply stops on exhaustion. A language
//! is expected to end its pattern list with a catch-all matching any single
//! character so no input character is dropped. Patterns must never match
//! zero width.

use regex::Regex;

use super::grammar::GrammarError;

/// A compiled, prioritized union of lexical patterns.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    regex: Regex,
}

impl Tokenizer {
    /// Combine an ordered list of regex sources into one tokenizer.
    ///
    /// Earlier patterns take priority on overlapping matches at the same
    /// position.
    pub fn new<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, GrammarError> {
        let alternation = patterns
            .into_iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&alternation).map_err(|e| GrammarError::InvalidPattern {
            pattern: alternation.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Scan `text` left to right into maximal, non-overlapping tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_character_becomes_a_token_with_catch_all() {
        let t = Tokenizer::new(["[0-9]+", "."]).unwrap();
        assert_eq!(t.tokenize("x=42;"), vec!["x", "=", "42", ";"]);
    }

    #[test]
    fn test_declaration_order_wins_at_same_position() {
        // The three-character operator is listed before its two-character prefix
        let t = Tokenizer::new(["===", "==", "."]).unwrap();
        assert_eq!(t.tokenize("a===b"), vec!["a", "===", "b"]);

        // Listing the short one first makes it win instead
        let t = Tokenizer::new(["==", "===", "."]).unwrap();
        assert_eq!(t.tokenize("a===b"), vec!["a", "==", "=", "b"]);
    }

    #[test]
    fn test_whitespace_runs_stay_single_tokens() {
        let t = Tokenizer::new([r"[a-z]+", r"[\t \r]+|\n", "."]).unwrap();
        assert_eq!(t.tokenize("ab  cd\n"), vec!["ab", "  ", "cd", "\n"]);
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let t = Tokenizer::new(["."]).unwrap();
        assert_eq!(t.tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(Tokenizer::new(["(unclosed"]).is_err());
    }

    #[test]
    fn test_retokenizing_is_deterministic() {
        let t = Tokenizer::new([r"[0-9]+", r"\n", "."]).unwrap();
        let first = t.tokenize("1+2\n34");
        let second = t.tokenize("1+2\n34");
        assert_eq!(first, second);
        assert_eq!(first, vec!["1", "+", "2", "\n", "34"]);
    }
}
