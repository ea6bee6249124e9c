//! Serializing tokens and bound values.

use cliffs_foundation::{Token, Value};
use cliffs_matcher::{CallMatcher, tokenize};
use cliffs_syntax::compile;

#[test]
fn tokens_round_trip() {
    let tokens = tokenize(r#"say "hello there" twice"#).unwrap();
    let bytes = rmp_serde::to_vec_named(&tokens).unwrap();
    let restored: Vec<Token> = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(restored, tokens);
}

#[test]
fn bound_values_round_trip() {
    let matcher = CallMatcher::default();
    let tree = compile("set <name> <level: int> <ratio: float> <on: bool> <note...>").unwrap();
    let outcome = matcher
        .match_call(&tree, "set volume 7 0.5 yes turn it up")
        .unwrap();

    let values: Vec<Value> = outcome.bindings.values().cloned().collect();
    let bytes = rmp_serde::to_vec_named(&values).unwrap();
    let restored: Vec<Value> = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(restored, values);
    assert!(restored.contains(&Value::from("turn it up")));
    assert!(restored.contains(&Value::Float(0.5)));
}
