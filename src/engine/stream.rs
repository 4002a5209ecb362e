//! Backtracking cursor over a tokenized input
//!
//! The stream owns the token list produced by the tokenizer and exposes a
//! cursor with nested checkpoints. Every rule attempt saves a checkpoint on
//! entry and either commits it (keeping the consumption) or rolls it back
//! (restoring the position), so checkpoints nest exactly like the recursive
//! call structure of the rule algebra.
//!
//! The stream also carries the skip predicate: the pattern identifying
//! insignificant tokens (usually whitespace) that sequences consume silently
//! between their elements.

use regex::Regex;

/// A cursor over a token sequence with save/commit/rollback checkpoints.
#[derive(Debug, Clone)]
pub struct Stream {
    tokens: Vec<String>,
    skip: Regex,
    position: usize,
    saved: Vec<usize>,
}

impl Stream {
    /// Wrap a token list, using `skip` to recognize insignificant tokens.
    pub fn new(tokens: Vec<String>, skip: Regex) -> Self {
        Self {
            tokens,
            skip,
            position: 0,
            saved: Vec::new(),
        }
    }

    /// Current cursor position (0-based index into the token list)
    pub fn position(&self) -> usize {
        self.position
    }

    /// The predicate for insignificant tokens
    pub fn skip_pattern(&self) -> &Regex {
        &self.skip
    }

    /// Push the current position as a checkpoint.
    pub fn save(&mut self) {
        self.saved.push(self.position);
    }

    /// Pop the most recent checkpoint and restore its position.
    ///
    /// Abandons everything consumed since the matching `save`. No-op when no
    /// checkpoint is pending.
    pub fn rollback(&mut self) {
        if let Some(position) = self.saved.pop() {
            self.position = position;
        }
    }

    /// Pop the most recent checkpoint without restoring its position.
    ///
    /// Confirms the consumption since the matching `save`. No-op when no
    /// checkpoint is pending.
    pub fn commit(&mut self) {
        self.saved.pop();
    }

    /// The token at the cursor, without advancing. `None` at end of input.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(|t| t.as_str())
    }

    /// The token at the cursor, advancing past it. `None` at end of input.
    pub fn next(&mut self) -> Option<&str> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token.as_str())
    }
}
