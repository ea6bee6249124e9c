//! Match accumulators.
//!
//! A [`CallMatch`] collects what one attempt has matched so far. Groups that
//! may fail (optional and variant groups) run their contents on a
//! [`branch`](CallMatch::branch) and [`join`](CallMatch::join) it back only
//! on success, so a failed attempt never leaves partial bindings behind.

use std::collections::BTreeMap;

use cliffs_foundation::{MatchFail, Value};

/// The state of one matching attempt.
#[derive(Clone, Debug)]
pub struct CallMatch<'raw> {
    raw: &'raw str,
    /// Accumulated score.
    pub score: f64,
    /// Bound parameters, tails and named groups.
    pub params: BTreeMap<String, Value>,
    /// Presence of each anonymous optional group, in match order.
    pub optionals: Vec<bool>,
    /// Chosen alternative of each anonymous variant group, in match order.
    pub variants: Vec<usize>,
    /// Set once a tail has consumed the rest of the call.
    pub terminated: bool,
    /// Current nesting depth in the syntax tree.
    pub depth: usize,
    /// The last mismatch an optional group recovered from.
    pub hint: Option<MatchFail>,
}

impl<'raw> CallMatch<'raw> {
    /// Creates an empty accumulator for the given raw call.
    #[must_use]
    pub fn new(raw: &'raw str) -> Self {
        Self {
            raw,
            score: 0.0,
            params: BTreeMap::new(),
            optionals: Vec::new(),
            variants: Vec::new(),
            terminated: false,
            depth: 0,
            hint: None,
        }
    }

    /// The raw call being matched.
    #[must_use]
    pub fn raw(&self) -> &'raw str {
        self.raw
    }

    /// Creates an empty accumulator at the same call and depth.
    #[must_use]
    pub fn branch(&self) -> Self {
        Self {
            depth: self.depth,
            ..Self::new(self.raw)
        }
    }

    /// Merges a successful branch into this accumulator.
    pub fn join(&mut self, branch: Self) {
        self.score += branch.score;
        self.params.extend(branch.params);
        self.optionals.extend(branch.optionals);
        self.variants.extend(branch.variants);
        self.terminated |= branch.terminated;
        if branch.hint.is_some() {
            self.hint = branch.hint;
        }
    }

    /// Binds a value, replacing any earlier value under the same name.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(name.into(), value.into());
    }

    /// Records whether an optional group was present.
    pub fn record_optional(&mut self, identifier: Option<&str>, present: bool) {
        match identifier {
            Some(id) => self.bind(id, present),
            None => self.optionals.push(present),
        }
    }

    /// Records which alternative a variant group chose.
    pub fn record_variant(&mut self, identifier: Option<&str>, index: usize) {
        match identifier {
            Some(id) => self.bind(id, i64::try_from(index).unwrap_or(i64::MAX)),
            None => self.variants.push(index),
        }
    }

    /// Finishes the attempt.
    #[must_use]
    pub fn into_outcome(self) -> MatchOutcome {
        MatchOutcome {
            bindings: self.params,
            optionals: self.optionals,
            variants: self.variants,
            score: self.score,
        }
    }
}

/// The result of a successful match.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MatchOutcome {
    /// Bound parameters, tails and named groups.
    pub bindings: BTreeMap<String, Value>,
    /// Presence of each anonymous optional group, in match order.
    pub optionals: Vec<bool>,
    /// Chosen alternative of each anonymous variant group, in match order.
    pub variants: Vec<usize>,
    /// Total score.
    pub score: f64,
}

impl MatchOutcome {
    /// Gets a bound value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Gets a bound string by name.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}
