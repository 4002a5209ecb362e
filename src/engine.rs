//! Core rule-combinator engine
//!
//! The engine turns source text into a flat sequence of classified
//! fragments in four steps: the [tokenizer](tokenizer) splits the text into
//! lexical tokens, a [stream](stream) wraps them with checkpoint/rollback
//! backtracking, the [grammar](grammar) runs the compiled rule algebra over
//! the stream, and the [fragment](fragment) renderer turns the result into
//! escaped output with literal span markers.
//!
//! Grammars are authored with the [rule](rule) constructors and compiled
//! once through [`GrammarBuilder`]; a [`Language`] binds a compiled grammar
//! to its tokenizer patterns and alias names inside a [`Registry`].

pub mod fragment;
pub mod grammar;
pub mod language;
pub mod rule;
pub mod stream;
pub mod tokenizer;

pub use fragment::{escape, plain_text, render, Fragment};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, RuleId};
pub use language::{Language, Registry};
pub use rule::{
    any, either, keyword, look_ahead, operator, optional, pattern, scan, seq, word, words,
    zero_or_more, Rule,
};
pub use stream::Stream;
pub use tokenizer::Tokenizer;
