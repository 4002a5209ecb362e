//! Construction-time rule descriptors
//!
//! Grammars are authored as trees of [`Rule`] values and compiled once into
//! a [`Grammar`](super::grammar::Grammar) arena before any matching happens.
//! A `Rule` is a plain immutable value: combinators wrap, they never mutate,
//! so the same descriptor can appear untagged in one grammar position and
//! tagged differently in another.
//!
//! Heterogeneous inputs (literal strings, pattern sources, already-compiled
//! rule ids) all convert into this one sum type at construction time via the
//! `From` impls, so matching never needs dynamic dispatch.
//!
//! Recursive grammars go through [`GrammarBuilder::placeholder`]
//! (super::grammar): the placeholder's `RuleId` is a stable handle that
//! referencing rules embed with [`Rule::Ref`] before the body is defined.

use super::grammar::RuleId;

/// A node in a grammar description tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Match one token equal to any of a fixed set of literal strings
    Words(Vec<String>),
    /// Match one token against a regex (compiled at grammar build time)
    Pattern(String),
    /// Unconditionally consume the next token; fails only at end of input
    Any,
    /// All sub-rules in order, with skip-token runs admitted between them
    Seq(Vec<Rule>),
    /// Ordered choice: first successful alternative wins
    Either(Vec<Rule>),
    /// Attempt the sub-rule; succeed with empty output when it fails
    Optional(Box<Rule>),
    /// Repeat {sub-rule, skip run} until the sub-rule fails; always succeeds
    Repeat(Box<Rule>),
    /// Test the sub-rule without consuming anything
    LookAhead(Box<Rule>),
    /// Greedy scan: recognize `body` opportunistically, stop at `until`
    /// (or at end of input, which also counts as success)
    Scan {
        body: Box<Rule>,
        until: Option<Box<Rule>>,
    },
    /// Delegate to the sub-rule and bracket its output with markers
    Tag { rule: Box<Rule>, class: String },
    /// Reference to an already-compiled node, e.g. a forward declaration
    Ref(RuleId),
}

impl Rule {
    /// Wrap this rule so its successful output is bracketed with
    /// open/close markers carrying `class`.
    ///
    /// Returns a new rule; the receiver is moved, never mutated, so clones
    /// of a shared descriptor can carry different tags.
    pub fn tag(self, class: impl Into<String>) -> Rule {
        Rule::Tag {
            rule: Box::new(self),
            class: class.into(),
        }
    }

    /// Attach (or replace) a terminator on a scan rule.
    ///
    /// On any other rule this wraps the receiver in a scan first, so
    /// `any().until(word("*/"))` reads naturally.
    pub fn until(self, terminator: impl Into<Rule>) -> Rule {
        let until = Some(Box::new(terminator.into()));
        match self {
            Rule::Scan { body, .. } => Rule::Scan { body, until },
            other => Rule::Scan {
                body: Box::new(other),
                until,
            },
        }
    }
}

impl From<&str> for Rule {
    fn from(word: &str) -> Self {
        Rule::Words(vec![word.to_string()])
    }
}

impl From<String> for Rule {
    fn from(word: String) -> Self {
        Rule::Words(vec![word])
    }
}

impl From<RuleId> for Rule {
    fn from(id: RuleId) -> Self {
        Rule::Ref(id)
    }
}

/// Match one token equal to `word`
pub fn word(word: impl Into<String>) -> Rule {
    Rule::Words(vec![word.into()])
}

/// Match one token equal to any of `words`
pub fn words<I, S>(words: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Rule::Words(words.into_iter().map(Into::into).collect())
}

/// Match one token against a regex source
pub fn pattern(source: impl Into<String>) -> Rule {
    Rule::Pattern(source.into())
}

/// Unconditionally consume the next token
pub fn any() -> Rule {
    Rule::Any
}

/// All parts in order, admitting skip tokens between adjacent parts
pub fn seq<I, R>(parts: I) -> Rule
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    Rule::Seq(parts.into_iter().map(Into::into).collect())
}

/// Ordered choice over the alternatives, first success wins
pub fn either<I, R>(alternatives: I) -> Rule
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    Rule::Either(alternatives.into_iter().map(Into::into).collect())
}

/// Attempt `rule`, succeeding with empty output when it fails
pub fn optional(rule: impl Into<Rule>) -> Rule {
    Rule::Optional(Box::new(rule.into()))
}

/// Repeat `rule` until it fails; always succeeds, possibly empty
pub fn zero_or_more(rule: impl Into<Rule>) -> Rule {
    Rule::Repeat(Box::new(rule.into()))
}

/// Test `rule` without consuming; empty output on success
pub fn look_ahead(rule: impl Into<Rule>) -> Rule {
    Rule::LookAhead(Box::new(rule.into()))
}

/// Greedy scan recognizing `body` opportunistically, with no terminator:
/// consumes the remaining input. Pair with [`Rule::until`] for a terminator.
pub fn scan(body: impl Into<Rule>) -> Rule {
    Rule::Scan {
        body: Box::new(body.into()),
        until: None,
    }
}

/// Literal word set tagged `keyword`
pub fn keyword<I, S>(keys: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words(keys).tag("keyword")
}

/// Literal word set tagged `operator`
pub fn operator<I, S>(ops: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words(ops).tag("operator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_wraps_without_mutating() {
        let base = word("if");
        let tagged = base.clone().tag("keyword");
        // The original descriptor is unchanged
        assert_eq!(base, Rule::Words(vec!["if".to_string()]));
        assert_eq!(
            tagged,
            Rule::Tag {
                rule: Box::new(base),
                class: "keyword".to_string()
            }
        );
    }

    #[test]
    fn test_until_on_scan_replaces_terminator() {
        let r = scan(any()).until("\"");
        match r {
            Rule::Scan { until: Some(t), .. } => {
                assert_eq!(*t, Rule::Words(vec!["\"".to_string()]))
            }
            other => panic!("expected scan, got {:?}", other),
        }
    }

    #[test]
    fn test_until_on_plain_rule_wraps_in_scan() {
        let r = any().until("*/");
        assert!(matches!(r, Rule::Scan { until: Some(_), .. }));
    }

    #[test]
    fn test_heterogeneous_conversion() {
        let r = seq(["let", "x"]);
        assert_eq!(
            r,
            Rule::Seq(vec![
                Rule::Words(vec!["let".to_string()]),
                Rule::Words(vec!["x".to_string()]),
            ])
        );
    }

    #[test]
    fn test_keyword_shorthand_tags() {
        assert_eq!(
            keyword(["if", "else"]),
            words(["if", "else"]).tag("keyword")
        );
        assert_eq!(operator(["+", "-"]), words(["+", "-"]).tag("operator"));
    }
}
