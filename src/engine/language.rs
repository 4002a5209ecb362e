//! Languages and the language registry
//!
//! A [`Language`] is an immutable bundle of a compiled grammar, the ordered
//! tokenizer pattern list that feeds it, the skip predicate, and the alias
//! names it registers under. It keeps no per-parse state: every call builds
//! a fresh [`Stream`], so a populated language can be shared freely.
//!
//! The [`Registry`] is an explicitly constructed object rather than implicit
//! global state; populate it at startup and pass it to whatever does the
//! highlighting. Lookup is case-sensitive, and an unknown name degrades to
//! passthrough: the input comes back unchanged, with no escaping applied.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::fragment::{render, Fragment};
use super::grammar::{Grammar, GrammarError};
use super::stream::Stream;
use super::tokenizer::Tokenizer;

/// Whole-token whitespace, the skip predicate languages start with
static DEFAULT_SKIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t\r\n]+$").unwrap());

/// A compiled grammar bound to its tokenizer patterns and alias names.
#[derive(Debug, Clone)]
pub struct Language {
    grammar: Grammar,
    tokenizer: Tokenizer,
    skip: Regex,
    aliases: Vec<String>,
}

impl Language {
    /// Bundle a compiled grammar with its ordered tokenizer pattern list.
    ///
    /// The pattern list should end with a catch-all matching any single
    /// character so tokenization never drops input. The skip predicate
    /// defaults to whole-token whitespace; see [`with_skip`](Self::with_skip).
    pub fn new<'a>(
        grammar: Grammar,
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, GrammarError> {
        Ok(Self {
            grammar,
            tokenizer: Tokenizer::new(patterns)?,
            skip: DEFAULT_SKIP.clone(),
            aliases: Vec::new(),
        })
    }

    /// Replace the skip predicate with a custom pattern.
    pub fn with_skip(mut self, pattern: &str) -> Result<Self, GrammarError> {
        self.skip = Regex::new(pattern).map_err(|e| GrammarError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(self)
    }

    /// Add names this language registers under.
    pub fn alias<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(names.into_iter().map(Into::into));
        self
    }

    /// The names this language registers under
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Tokenize `text` and run the top-level rule, returning the raw
    /// fragment sequence.
    ///
    /// Tokens left unconsumed by the top-level rule (including all of them,
    /// when the rule fails outright) are appended as plain text, so the
    /// fragment sequence always reconstructs the full input.
    pub fn fragments(&self, text: &str) -> Vec<Fragment> {
        let tokens = self.tokenizer.tokenize(text);
        let mut stream = Stream::new(tokens, self.skip.clone());
        let mut fragments = self
            .grammar
            .run(self.grammar.top(), &mut stream)
            .unwrap_or_default();
        while let Some(token) = stream.next() {
            fragments.push(Fragment::text(token));
        }
        fragments
    }

    /// Parse `text` and render the result, escaping plain text and emitting
    /// markers literally.
    pub fn highlight(&self, text: &str) -> String {
        render(&self.fragments(text))
    }
}

/// Name-to-language mapping, populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    languages: HashMap<String, Arc<Language>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the builtin grammars.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_shared(crate::languages::javascript::shared());
        registry
    }

    /// Register a language under all of its aliases.
    pub fn register(&mut self, language: Language) {
        self.register_shared(Arc::new(language));
    }

    /// Register an already-shared language under all of its aliases.
    pub fn register_shared(&mut self, language: Arc<Language>) {
        for name in language.aliases() {
            self.languages.insert(name.clone(), Arc::clone(&language));
        }
    }

    /// Look up a language by name. Exact, case-sensitive match.
    pub fn get(&self, name: &str) -> Option<&Language> {
        self.languages.get(name).map(|l| l.as_ref())
    }

    /// Highlight `text` as the named language.
    ///
    /// An unknown name returns the input unchanged (and unescaped): the
    /// output degrades to no highlighting, it never fails visibly.
    pub fn parse(&self, text: &str, name: &str) -> String {
        match self.get(name) {
            Some(language) => language.highlight(text),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grammar::GrammarBuilder;
    use crate::engine::rule::{pattern, scan};

    /// Grammar recognizing digit runs as `number`, everything else raw
    fn digits() -> Language {
        let mut b = GrammarBuilder::new();
        let top = b.compile(scan(pattern("^[0-9]+$").tag("number"))).unwrap();
        Language::new(b.build(top), ["[0-9]+", "."])
            .unwrap()
            .alias(["digits"])
    }

    #[test]
    fn test_end_to_end_digit_grammar() {
        let language = digits();
        assert_eq!(
            language.highlight("x=42;"),
            "x=<span class='number'>42</span>;"
        );
    }

    #[test]
    fn test_unknown_language_passthrough_is_unescaped() {
        let registry = Registry::new();
        assert_eq!(registry.parse("a<b", "not-a-real-language"), "a<b");
    }

    #[test]
    fn test_registered_language_is_found_under_every_alias() {
        let mut registry = Registry::new();
        registry.register(digits().alias(["numbers"]));
        assert!(registry.get("digits").is_some());
        assert!(registry.get("numbers").is_some());
        assert!(registry.get("Digits").is_none());
    }

    #[test]
    fn test_plain_text_is_escaped_in_output() {
        let language = digits();
        assert_eq!(language.highlight("1<2"), "<span class='number'>1</span>&lt;<span class='number'>2</span>");
    }

    #[test]
    fn test_failing_top_rule_degrades_to_escaped_passthrough() {
        let mut b = GrammarBuilder::new();
        let top = b.compile(crate::engine::rule::word("nope")).unwrap();
        let language = Language::new(b.build(top), ["."]).unwrap();
        assert_eq!(language.highlight("a&b"), "a&amp;b");
    }

    #[test]
    fn test_custom_skip_pattern() {
        let mut b = GrammarBuilder::new();
        let top = b
            .compile(crate::engine::rule::seq(["a", "b"]))
            .unwrap();
        // Commas are insignificant for this toy language
        let language = Language::new(b.build(top), ["."])
            .unwrap()
            .with_skip("^,$")
            .unwrap();
        assert_eq!(language.highlight("a,b"), "a,b");
    }
}
