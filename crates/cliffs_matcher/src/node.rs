//! The node matching protocol.
//!
//! Every syntax node consumes a prefix of the remaining tokens, records what
//! it matched in the accumulator, and returns the rest. Soft mismatches
//! travel up as [`MatchError::Mismatch`] until an optional group, a variant
//! group or the candidate loop recovers from them; structural errors are
//! never recovered from.

use cliffs_foundation::{Error, FailReason, MatchError, MatchFail, MatchResult, Span, Token};
use cliffs_syntax::{Literal, Node, Optional, Parameter, Sequence, Tail, Variant};

use crate::call_match::CallMatch;
use crate::matcher::CallMatcher;
use crate::scoring::{LITERAL_WEIGHT, PARAMETER_WEIGHT, TAIL_WEIGHT};
use crate::types::ArgError;

/// Matching a syntax node against call tokens.
pub trait MatchCall {
    /// Matches a prefix of `tokens`, returning the tokens left over.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Mismatch`] if the tokens do not fit and
    /// [`MatchError::Structural`] if the syntax or matcher setup is broken.
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]>;
}

impl MatchCall for Node {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        if call.terminated {
            return Err(Error::match_after_termination(self.kind_name()).into());
        }
        let limit = matcher.config().max_depth;
        if call.depth >= limit {
            return Err(Error::depth_exceeded(limit).into());
        }

        call.depth += 1;
        let result = match self {
            Self::Literal(lit) => lit.match_call(tokens, matcher, call),
            Self::Parameter(param) => param.match_call(tokens, matcher, call),
            Self::Tail(tail) => tail.match_call(tokens, matcher, call),
            Self::Optional(opt) => opt.match_call(tokens, matcher, call),
            Self::Variant(var) => var.match_call(tokens, matcher, call),
            Self::Sequence(seq) => seq.match_call(tokens, matcher, call),
        };
        call.depth -= 1;
        result
    }
}

impl MatchCall for Literal {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        let Some((token, rest)) = tokens.split_first() else {
            return Err(MatchFail::expected_literal(&self.value, None, false).into());
        };

        if !matcher.compare_literal(&self.value, &token.value, self.case_sensitive) {
            let similar = matcher.is_similar(&self.value, &token.value);
            return Err(MatchFail::expected_literal(&self.value, Some(token.clone()), similar).into());
        }

        call.score += LITERAL_WEIGHT;
        Ok(rest)
    }
}

impl MatchCall for Parameter {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        // An unknown type is a broken grammar, whatever the input
        if let Some(typename) = &self.typename {
            if !matcher.types().contains(typename) {
                return Err(Error::undefined_type(typename).into());
            }
        }

        let Some((token, rest)) = tokens.split_first() else {
            return Err(MatchFail::expected_argument(&self.name).into());
        };

        let value = match &self.typename {
            None => token.value.as_str().into(),
            Some(typename) => match matcher.parse_arg(typename, &token.value) {
                Ok(value) => value,
                Err(ArgError::UndefinedType(err)) => return Err(err.into()),
                Err(ArgError::Rejected(cause)) => {
                    return Err(MatchFail::type_mismatch(
                        &self.name,
                        typename,
                        token.clone(),
                        cause.message,
                    )
                    .into());
                }
            },
        };

        call.bind(&self.name, value);
        call.score += PARAMETER_WEIGHT;
        Ok(rest)
    }
}

impl MatchCall for Tail {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        _matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(MatchFail::expected_tail(&self.name).into());
        };

        let text = Span::new(first.start(), last.end()).text(call.raw());
        if text.is_empty() {
            return Err(MatchFail::expected_tail(&self.name).into());
        }

        call.bind(&self.name, text);
        call.terminated = true;
        call.score += TAIL_WEIGHT;
        Ok(&tokens[tokens.len()..])
    }
}

impl MatchCall for Optional {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        let mut branch = call.branch();
        match self.inner.match_call(tokens, matcher, &mut branch) {
            Ok(rest) => {
                call.record_optional(self.identifier.as_deref(), true);
                call.join(branch);
                Ok(rest)
            }
            Err(MatchError::Mismatch(fail)) => {
                call.record_optional(self.identifier.as_deref(), false);
                call.hint = Some(fail);
                Ok(tokens)
            }
            Err(err) => Err(err),
        }
    }
}

impl MatchCall for Variant {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        let mut best: Option<(usize, CallMatch<'_>, &'t [Token])> = None;
        let mut first_fail: Option<MatchFail> = None;

        for (index, alternative) in self.alternatives.iter().enumerate() {
            let mut branch = call.branch();
            match alternative.match_call(tokens, matcher, &mut branch) {
                Ok(rest) => {
                    // Ties keep the earlier alternative
                    if best
                        .as_ref()
                        .is_none_or(|(_, chosen, _)| branch.score > chosen.score)
                    {
                        best = Some((index, branch, rest));
                    }
                }
                Err(MatchError::Mismatch(fail)) => {
                    first_fail.get_or_insert(fail);
                }
                Err(err) => return Err(err),
            }
        }

        let Some((index, branch, rest)) = best else {
            return Err(MatchFail::new(FailReason::NoVariant {
                alternatives: self.alternatives.iter().map(ToString::to_string).collect(),
                first: first_fail.map(Box::new),
            })
            .into());
        };

        call.record_variant(self.identifier.as_deref(), index);
        call.join(branch);
        Ok(rest)
    }
}

impl MatchCall for Sequence {
    fn match_call<'t>(
        &self,
        tokens: &'t [Token],
        matcher: &CallMatcher,
        call: &mut CallMatch<'_>,
    ) -> MatchResult<&'t [Token]> {
        let mut rest = tokens;
        for child in &self.children {
            rest = child.match_call(rest, matcher, call)?;
        }
        Ok(rest)
    }
}
