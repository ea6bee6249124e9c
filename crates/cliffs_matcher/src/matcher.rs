//! The call matcher.
//!
//! A [`CallMatcher`] owns the configuration, the call lexer and the type
//! registry. It tokenizes a call once, runs every candidate syntax tree
//! against the tokens with a fresh accumulator, and picks the highest
//! scoring success.

use cliffs_foundation::{FailReason, MatchError, MatchFail, MatchResult, Rejection, Result, Token, Value};
use cliffs_syntax::Node;
use tracing::debug;

use crate::call_match::{CallMatch, MatchOutcome};
use crate::config::MatcherConfig;
use crate::lexer::CallLexer;
use crate::node::MatchCall;
use crate::types::{ArgError, CoercionError, TypeRegistry};

/// The outcome of running one candidate tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Attempt {
    /// The candidate matched the whole call.
    Matched(MatchOutcome),
    /// The candidate did not fit.
    Rejected(Rejection),
}

/// The winning candidate of [`CallMatcher::match_best`].
#[derive(Clone, Debug, PartialEq)]
pub struct BestMatch {
    /// Index of the winning tree.
    pub index: usize,
    /// What it matched.
    pub outcome: MatchOutcome,
}

/// Matches command calls against syntax trees.
#[derive(Clone, Debug)]
pub struct CallMatcher {
    config: MatcherConfig,
    lexer: CallLexer,
    types: TypeRegistry,
}

impl Default for CallMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl CallMatcher {
    /// Creates a matcher with the built-in types.
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        let lexer = CallLexer::new(config.quotes.iter().copied());
        Self {
            config,
            lexer,
            types: TypeRegistry::default(),
        }
    }

    /// Gets the matcher configuration.
    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Gets the type registry.
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Registers a parameter type, replacing any type with the same name.
    pub fn register_type<F>(&mut self, name: impl Into<String>, coercion: F)
    where
        F: Fn(&str) -> std::result::Result<Value, CoercionError> + Send + Sync + 'static,
    {
        self.types.register(name, coercion);
    }

    /// Coerces a raw argument with a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::UndefinedType`] for an unregistered type and
    /// [`ArgError::Rejected`] if the type rejects the argument.
    pub fn parse_arg(&self, typename: &str, raw: &str) -> std::result::Result<Value, ArgError> {
        self.types.coerce(typename, raw)
    }

    /// Compares a literal with a call token.
    ///
    /// The comparison ignores case if either the matcher or the literal is
    /// case-insensitive.
    #[must_use]
    pub fn compare_literal(&self, literal: &str, token: &str, literal_case_sensitive: bool) -> bool {
        if self.config.case_sensitive && literal_case_sensitive {
            literal == token
        } else {
            literal.to_lowercase() == token.to_lowercase()
        }
    }

    /// Returns true if a token looks like a misspelling of a literal.
    #[must_use]
    pub fn is_similar(&self, literal: &str, token: &str) -> bool {
        let similarity = strsim::jaro_winkler(&literal.to_lowercase(), &token.to_lowercase());
        similarity >= self.config.literal_threshold
    }

    /// Splits a call into tokens with this matcher's quote characters.
    ///
    /// # Errors
    ///
    /// Returns an error if a quoted token is never closed.
    pub fn tokenize(&self, raw: &str) -> Result<Vec<Token>> {
        self.lexer.tokenize(raw)
    }

    /// Runs one tree against already tokenized input.
    ///
    /// `index` identifies the candidate in the returned rejection.
    ///
    /// # Errors
    ///
    /// Returns a structural error if the tree or the matcher setup is
    /// broken; soft mismatches are returned as [`Attempt::Rejected`].
    pub fn attempt(&self, index: usize, tree: &Node, tokens: &[Token], raw: &str) -> Result<Attempt> {
        let mut call = CallMatch::new(raw);
        let fail = match tree.match_call(tokens, self, &mut call) {
            Ok([]) => return Ok(Attempt::Matched(call.into_outcome())),
            Ok([extra, ..]) => MatchFail::too_many_arguments(extra.clone(), call.hint.take()),
            Err(MatchError::Mismatch(fail)) => fail,
            Err(MatchError::Structural(err)) => return Err(err),
        };
        Ok(Attempt::Rejected(Rejection {
            index,
            progress: call.score,
            fail,
        }))
    }

    /// Matches a call against a single tree.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Mismatch`] if the call does not fit and
    /// [`MatchError::Structural`] if the call's quoting, the tree or the
    /// matcher setup is broken.
    pub fn match_call(&self, tree: &Node, raw: &str) -> MatchResult<MatchOutcome> {
        let tokens = self.tokenize(raw)?;
        match self.attempt(0, tree, &tokens, raw)? {
            Attempt::Matched(outcome) => Ok(outcome),
            Attempt::Rejected(rejection) => Err(rejection.fail.into()),
        }
    }

    /// Matches a call against several trees and returns the best match.
    ///
    /// The highest score wins; ties go to the earliest tree.
    ///
    /// # Errors
    ///
    /// Returns a [`FailReason::NoCandidate`] mismatch carrying every tree's
    /// rejection if none matched, and a structural error as soon as any tree
    /// hits one.
    pub fn match_best(&self, trees: &[Node], raw: &str) -> MatchResult<BestMatch> {
        let tokens = self.tokenize(raw)?;
        let mut best: Option<BestMatch> = None;
        let mut rejections = Vec::new();

        for (index, tree) in trees.iter().enumerate() {
            match self.attempt(index, tree, &tokens, raw)? {
                Attempt::Matched(outcome) => {
                    debug!(index, score = outcome.score, "candidate matched");
                    if best.as_ref().is_none_or(|b| outcome.score > b.outcome.score) {
                        best = Some(BestMatch { index, outcome });
                    }
                }
                Attempt::Rejected(rejection) => {
                    debug!(
                        index,
                        progress = rejection.progress,
                        reason = %rejection.fail,
                        "candidate rejected"
                    );
                    rejections.push(rejection);
                }
            }
        }

        match best {
            Some(best) => {
                debug!(index = best.index, score = best.outcome.score, "best match");
                Ok(best)
            }
            None => Err(MatchFail::new(FailReason::NoCandidate { rejections }).into()),
        }
    }
}
