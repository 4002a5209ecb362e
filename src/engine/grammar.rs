//! Compiled grammar arena and the matching runtime
//!
//! [`GrammarBuilder`] interns [`Rule`] description trees into a flat arena
//! of compiled nodes addressed by [`RuleId`]. Leaf regexes are compiled here,
//! once, so a match attempt never touches a pattern source again.
//!
//! Cyclic grammars (mutual recursion) go through [`GrammarBuilder::placeholder`]:
//! the reserved id is a stable handle other rules can reference before the
//! body exists, and [`GrammarBuilder::define`] installs the body in place.
//! An undefined placeholder behaves like an empty sequence: it matches
//! successfully with empty output.
//!
//! Matching is uniformly transactional. [`Grammar::run`] saves a stream
//! checkpoint, executes the node, then commits on success or rolls back on
//! failure, so a failed attempt never leaves partial consumption behind.
//! Failure is routine control flow (`None`), not an error.

use std::fmt;

use regex::Regex;

use super::fragment::Fragment;
use super::rule::Rule;
use super::stream::Stream;

/// Handle to a compiled rule node inside a [`Grammar`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(pub(crate) usize);

/// Error raised while compiling a grammar or tokenizer pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A regex source failed to compile
    InvalidPattern { pattern: String, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern `{}`: {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// A compiled rule node. Mirrors [`Rule`] with patterns compiled and
/// children resolved to arena ids.
#[derive(Debug, Clone)]
enum Compiled {
    Words(Vec<String>),
    Pattern(Regex),
    Any,
    Seq(Vec<RuleId>),
    Either(Vec<RuleId>),
    Optional(RuleId),
    Repeat(RuleId),
    LookAhead(RuleId),
    Scan {
        body: RuleId,
        until: Option<RuleId>,
    },
    Tag {
        rule: RuleId,
        class: String,
    },
}

/// Builder interning rule trees into an arena.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    nodes: Vec<Compiled>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a stable id for a rule whose body comes later.
    ///
    /// Until [`define`](Self::define) runs, the placeholder matches like an
    /// empty sequence: success with empty output.
    pub fn placeholder(&mut self) -> RuleId {
        self.push(Compiled::Seq(Vec::new()))
    }

    /// Install the body of a previously reserved placeholder.
    ///
    /// Rules already referencing the placeholder observe the new body, since
    /// they hold the id, not a copy.
    pub fn define(&mut self, id: RuleId, rule: impl Into<Rule>) -> Result<(), GrammarError> {
        assert!(id.0 < self.nodes.len(), "rule id from a different builder");
        let node = self.compile_node(rule.into())?;
        self.nodes[id.0] = node;
        Ok(())
    }

    /// Intern a rule tree, compiling its leaf patterns.
    pub fn compile(&mut self, rule: impl Into<Rule>) -> Result<RuleId, GrammarError> {
        match rule.into() {
            // References are already in the arena
            Rule::Ref(id) => Ok(id),
            other => {
                let node = self.compile_node(other)?;
                Ok(self.push(node))
            }
        }
    }

    /// Finish building, designating the grammar's top-level rule.
    pub fn build(self, top: RuleId) -> Grammar {
        Grammar {
            nodes: self.nodes,
            top,
        }
    }

    fn push(&mut self, node: Compiled) -> RuleId {
        let id = RuleId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn compile_node(&mut self, rule: Rule) -> Result<Compiled, GrammarError> {
        Ok(match rule {
            Rule::Words(words) => Compiled::Words(words),
            Rule::Pattern(source) => {
                let regex = Regex::new(&source).map_err(|e| GrammarError::InvalidPattern {
                    pattern: source.clone(),
                    message: e.to_string(),
                })?;
                Compiled::Pattern(regex)
            }
            Rule::Any => Compiled::Any,
            Rule::Seq(parts) => {
                let parts = parts
                    .into_iter()
                    .map(|p| self.compile(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Compiled::Seq(parts)
            }
            Rule::Either(alternatives) => {
                let alternatives = alternatives
                    .into_iter()
                    .map(|a| self.compile(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Compiled::Either(alternatives)
            }
            Rule::Optional(rule) => Compiled::Optional(self.compile(*rule)?),
            Rule::Repeat(rule) => Compiled::Repeat(self.compile(*rule)?),
            Rule::LookAhead(rule) => Compiled::LookAhead(self.compile(*rule)?),
            Rule::Scan { body, until } => Compiled::Scan {
                body: self.compile(*body)?,
                until: until.map(|u| self.compile(*u)).transpose()?,
            },
            Rule::Tag { rule, class } => Compiled::Tag {
                rule: self.compile(*rule)?,
                class,
            },
            // A bare reference defined in place delegates to its target
            Rule::Ref(id) => Compiled::Seq(vec![id]),
        })
    }
}

/// An immutable, compiled grammar: the rule arena plus its top-level rule.
#[derive(Debug, Clone)]
pub struct Grammar {
    nodes: Vec<Compiled>,
    top: RuleId,
}

impl Grammar {
    /// The designated top-level rule
    pub fn top(&self) -> RuleId {
        self.top
    }

    /// Attempt a match starting at the stream's current position.
    ///
    /// The transactional wrapper shared by every rule type: a checkpoint is
    /// saved on entry, committed on success and rolled back on failure, so
    /// no partial consumption survives a failed attempt.
    pub fn run(&self, id: RuleId, s: &mut Stream) -> Option<Vec<Fragment>> {
        s.save();
        match self.exec(id, s) {
            Some(fragments) => {
                s.commit();
                Some(fragments)
            }
            None => {
                s.rollback();
                None
            }
        }
    }

    fn exec(&self, id: RuleId, s: &mut Stream) -> Option<Vec<Fragment>> {
        match &self.nodes[id.0] {
            Compiled::Words(words) => {
                let next = s.next()?;
                if words.iter().any(|w| w == next) {
                    Some(vec![Fragment::text(next)])
                } else {
                    None
                }
            }
            Compiled::Pattern(regex) => {
                let next = s.next()?;
                if regex.is_match(next) {
                    Some(vec![Fragment::text(next)])
                } else {
                    None
                }
            }
            Compiled::Any => {
                let next = s.next()?;
                Some(vec![Fragment::text(next)])
            }
            Compiled::Seq(parts) => {
                let mut out = Vec::new();
                let last = parts.len().saturating_sub(1);
                for (i, part) in parts.iter().enumerate() {
                    let mut matched = self.run(*part, s)?;
                    out.append(&mut matched);
                    // Skip tokens are admitted between elements only, not
                    // before the first or after the last
                    if i < last {
                        self.skip_run(s, &mut out);
                    }
                }
                Some(out)
            }
            Compiled::Either(alternatives) => {
                // A failed alternative has already rolled back, so the next
                // one starts from the original position
                for alternative in alternatives {
                    if let Some(matched) = self.run(*alternative, s) {
                        return Some(matched);
                    }
                }
                None
            }
            Compiled::Optional(rule) => Some(self.run(*rule, s).unwrap_or_default()),
            Compiled::Repeat(rule) => {
                let mut out = Vec::new();
                loop {
                    let before = s.position();
                    match self.run(*rule, s) {
                        Some(mut matched) => {
                            out.append(&mut matched);
                            self.skip_run(s, &mut out);
                            // A grammar whose repeated rule can match zero
                            // tokens never terminates; see spec of repetition
                            debug_assert!(
                                s.position() > before,
                                "repetition made no progress; the repeated rule matches zero tokens"
                            );
                        }
                        None => break,
                    }
                }
                Some(out)
            }
            Compiled::LookAhead(rule) => {
                s.save();
                let result = self.run(*rule, s);
                s.rollback();
                result.map(|_| Vec::new())
            }
            Compiled::Scan { body, until } => {
                let mut out = Vec::new();
                loop {
                    // The terminator gets the first shot on every iteration;
                    // matching it is the only successful exit besides EOF
                    if let Some(until) = until {
                        if let Some(mut end) = self.run(*until, s) {
                            out.append(&mut end);
                            return Some(out);
                        }
                    }
                    let before = s.position();
                    if let Some(mut matched) = self.run(*body, s) {
                        debug_assert!(
                            s.position() > before,
                            "scan body made no progress; the body rule matches zero tokens"
                        );
                        out.append(&mut matched);
                        continue;
                    }
                    // Neither matched: take one raw token. This step is
                    // permanent, there is no backtracking past it.
                    match s.next() {
                        Some(token) => out.push(Fragment::text(token)),
                        // Exhaustion is success, even with an unmatched
                        // terminator configured (unterminated constructs at
                        // end of input still highlight)
                        None => return Some(out),
                    }
                }
            }
            Compiled::Tag { rule, class } => {
                let mut matched = self.run(*rule, s)?;
                let mut out = Vec::with_capacity(matched.len() + 2);
                out.push(Fragment::Open(class.clone()));
                out.append(&mut matched);
                out.push(Fragment::Close);
                Some(out)
            }
        }
    }

    /// Consume a run of zero or more skip-pattern tokens, appending them to
    /// the output in their original form.
    fn skip_run(&self, s: &mut Stream, out: &mut Vec<Fragment>) {
        loop {
            let is_skip = match s.peek() {
                Some(token) => s.skip_pattern().is_match(token),
                None => false,
            };
            if !is_skip {
                break;
            }
            if let Some(token) = s.next() {
                out.push(Fragment::text(token));
            }
        }
    }
}
