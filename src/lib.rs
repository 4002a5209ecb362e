//! # glint
//!
//! A backtracking rule-combinator engine for syntax highlighting.
//!
//! Text is tokenized by a prioritized union of regex patterns, then a
//! grammar of composable rules (sequence, ordered choice, optional,
//! repetition, lookahead, greedy scan-until) consumes the token stream with
//! transactional backtracking and produces a flat sequence of fragments:
//! verbatim text interleaved with classification markers.
//!
//! ```text
//! let registry = Registry::with_builtins();
//! registry.parse("let x = 1", "ts")
//!   => <span class='keyword'>let</span> x = <span class='number'>1</span>
//! ```
//!
//! Unknown language names degrade to passthrough; the engine never fails
//! visibly, it only falls back to no highlighting.

pub mod engine;
pub mod languages;

pub use engine::{
    Fragment, Grammar, GrammarBuilder, GrammarError, Language, Registry, Rule, Stream, Tokenizer,
};
