//! Matching a call against a single syntax.

use cliffs_foundation::{ErrorKind, FailReason, MatchResult, Value};
use cliffs_matcher::{CallMatcher, LITERAL_WEIGHT, MatchOutcome, PARAMETER_WEIGHT, TAIL_WEIGHT};
use cliffs_syntax::compile;

fn run(definition: &str, raw: &str) -> MatchResult<MatchOutcome> {
    CallMatcher::default().match_call(&compile(definition).unwrap(), raw)
}

// =============================================================================
// Literals, parameters, tails
// =============================================================================

#[test]
fn literal_score() {
    let outcome = run("turn the lights off", "turn the lights off").unwrap();
    assert_eq!(outcome.score, 4.0 * LITERAL_WEIGHT);
    assert!(outcome.bindings.is_empty());
}

#[test]
fn literal_mismatch_is_soft() {
    let err = run("turn the lights off", "turn the lights on").unwrap_err();
    assert!(err.is_mismatch());
}

#[test]
fn missing_tokens() {
    let err = run("give <item> <n: int>", "give apple").unwrap_err();
    assert!(matches!(
        err.as_mismatch().map(|f| &f.reason),
        Some(FailReason::ExpectedArgument { param }) if param == "n"
    ));
}

#[test]
fn too_many_arguments() {
    let err = run("look", "look around").unwrap_err();
    assert_eq!(err.to_string(), "too many arguments, starting with \"around\" at 5");
}

#[test]
fn tail_binds_raw_text() {
    let outcome = run("say <msg...>", "say  hello   world").unwrap();
    assert_eq!(outcome.get_str("msg"), Some("hello   world"));
    assert_eq!(outcome.score, LITERAL_WEIGHT + TAIL_WEIGHT);
}

#[test]
fn tail_requires_something() {
    let err = run("say <msg...>", "say   ").unwrap_err();
    assert_eq!(err.to_string(), "expected msg...");
}

#[test]
fn match_after_tail_is_structural() {
    let err = run("say <msg...> x", "say a x").unwrap_err();
    assert_eq!(
        err.as_structural().map(|e| &e.kind),
        Some(&ErrorKind::MatchAfterTermination { node: "literal" })
    );
}

// =============================================================================
// Optional groups
// =============================================================================

#[test]
fn optional_omitted() {
    let outcome = run("give <item> [--count <n: int>]", "give apple").unwrap();
    assert_eq!(outcome.optionals, vec![false]);
    assert_eq!(outcome.get("n"), None);
    assert_eq!(outcome.score, LITERAL_WEIGHT + PARAMETER_WEIGHT);
}

#[test]
fn optional_given() {
    let outcome = run("give <item> [--count <n: int>]", "give apple --count 3").unwrap();
    assert_eq!(outcome.optionals, vec![true]);
    assert_eq!(outcome.get("n"), Some(&Value::Int(3)));
    assert_eq!(outcome.score, 2.0 * LITERAL_WEIGHT + 2.0 * PARAMETER_WEIGHT);
}

#[test]
fn optional_failure_explains_leftovers() {
    let err = run("give <item> [--count <n: int>]", "give apple --count three").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("too many arguments"), "{message}");
    assert!(message.contains("does not match type int"), "{message}");
}

#[test]
fn several_optionals_in_order() {
    let definition = "set [loud] alarm at <time: int> (am|pm) [with message <message...>]";
    let outcome = run(definition, "set alarm at 7 pm with message wake up").unwrap();
    assert_eq!(outcome.optionals, vec![false, true]);
    assert_eq!(outcome.variants, vec![1]);
    assert_eq!(outcome.get("time"), Some(&Value::Int(7)));
    assert_eq!(outcome.get_str("message"), Some("wake up"));
}

// =============================================================================
// Variant groups
// =============================================================================

#[test]
fn top_level_variants() {
    let tree = compile("start | stop | restart").unwrap();
    let matcher = CallMatcher::default();
    assert_eq!(matcher.match_call(&tree, "stop").unwrap().variants, vec![1]);
    assert_eq!(matcher.match_call(&tree, "restart").unwrap().variants, vec![2]);
    let err = matcher.match_call(&tree, "pause").unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected one of: start | stop | restart (expected literal 'start', got \"pause\" at 0)"
    );
}

#[test]
fn named_groups_bind_values() {
    let outcome = run("go [quickly]:fast (north|south):dir", "go south").unwrap();
    assert_eq!(outcome.get("fast"), Some(&Value::Bool(false)));
    assert_eq!(outcome.get("dir"), Some(&Value::Int(1)));
    assert!(outcome.optionals.is_empty());
    assert!(outcome.variants.is_empty());
}

#[test]
fn variant_inside_optional_named() {
    let outcome = run("speed [fast|slow]:pace", "speed slow").unwrap();
    assert_eq!(outcome.get("pace"), Some(&Value::Int(1)));
    assert_eq!(outcome.optionals, vec![true]);
}

// =============================================================================
// Case sensitivity
// =============================================================================

#[test]
fn caret_makes_literal_case_insensitive() {
    assert!(run("HELP^", "help").is_ok());
    assert!(run("HELP", "help").is_err());
}
