//! Choosing between several candidate syntaxes.

use cliffs_foundation::{ErrorKind, FailReason};
use cliffs_matcher::{CallMatcher, LITERAL_WEIGHT, PARAMETER_WEIGHT};
use cliffs_syntax::{CompilerConfig, Node, SimplifyMode, SyntaxCompiler, compile};

fn trees(definitions: &[&str]) -> Vec<Node> {
    definitions.iter().map(|d| compile(d).unwrap()).collect()
}

#[test]
fn tie_goes_to_first_candidate() {
    let matcher = CallMatcher::default();
    let candidates = trees(&["greet <name>", "greet <name: int>"]);
    let best = matcher.match_best(&candidates, "greet 7").unwrap();
    assert_eq!(best.index, 0);
    assert_eq!(best.outcome.score, LITERAL_WEIGHT + PARAMETER_WEIGHT);

    let reversed = trees(&["greet <name: int>", "greet <name>"]);
    let best = matcher.match_best(&reversed, "greet 7").unwrap();
    assert_eq!(best.index, 0);
    assert_eq!(best.outcome.get("name").and_then(|v| v.as_int()), Some(7));
}

#[test]
fn literals_beat_parameters() {
    let matcher = CallMatcher::default();
    let candidates = trees(&["take <item>", "take all", "take <item> from <place>"]);
    assert_eq!(matcher.match_best(&candidates, "take all").unwrap().index, 1);
    assert_eq!(matcher.match_best(&candidates, "take lamp").unwrap().index, 0);
    assert_eq!(
        matcher.match_best(&candidates, "take lamp from box").unwrap().index,
        2
    );
}

#[test]
fn no_candidate_aggregates_rejections() {
    let matcher = CallMatcher::default();
    let candidates = trees(&["look", "take <item> from <place>"]);
    let err = matcher.match_best(&candidates, "take lamp form box").unwrap_err();
    let fail = err.as_mismatch().unwrap();
    let FailReason::NoCandidate { rejections } = &fail.reason else {
        panic!("expected no candidate, got {fail:?}");
    };
    assert_eq!(rejections.len(), 2);
    assert_eq!(rejections[0].progress, 0.0);
    assert_eq!(rejections[1].progress, LITERAL_WEIGHT + PARAMETER_WEIGHT);
    assert_eq!(
        fail.to_string(),
        "expected literal 'from', got \"form\" at 10 (did you mean 'from'?)"
    );
}

#[test]
fn structural_error_aborts_everything() {
    let matcher = CallMatcher::default();
    let candidates = trees(&["hello", "hello <x: undefined>", "hello world"]);
    let err = matcher.match_best(&candidates, "hello").unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn simplified_trees_match_the_same() {
    let matcher = CallMatcher::default();
    let flat = SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::Yes));
    let raw = SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::No));
    let definition = "set [loud] alarm at <time: int> (am|pm) [with message <message...>]";
    let call = "set loud alarm at 6 am with message get up";

    let a = matcher
        .match_call(&flat.compile(definition).unwrap(), call)
        .unwrap();
    let b = matcher
        .match_call(&raw.compile(definition).unwrap(), call)
        .unwrap();
    let c = matcher
        .match_call(&compile(definition).unwrap(), call)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn unterminated_quote_aborts() {
    let matcher = CallMatcher::default();
    let err = matcher
        .match_best(&trees(&["say <msg...>"]), "say 'hi")
        .unwrap_err();
    assert_eq!(
        err.as_structural().map(|e| &e.kind),
        Some(&ErrorKind::UnterminatedQuote { quote: '\'', offset: 4 })
    );
}
