//! Typed parameters and the type registry.

use cliffs_foundation::{FailReason, Value};
use cliffs_matcher::{ArgError, CallMatcher, CoercionError, MatcherConfig, loose_bool};
use cliffs_syntax::compile;

#[test]
fn int_parameter() {
    let matcher = CallMatcher::default();
    let tree = compile("wait <seconds: int>").unwrap();
    let outcome = matcher.match_call(&tree, "wait 42").unwrap();
    assert_eq!(outcome.get("seconds"), Some(&Value::Int(42)));

    let err = matcher.match_call(&tree, "wait abc").unwrap_err();
    assert!(matches!(
        err.as_mismatch().map(|f| &f.reason),
        Some(FailReason::TypeMismatch { typename, .. }) if typename == "int"
    ));
}

#[test]
fn undefined_type_is_structural_for_any_input() {
    let matcher = CallMatcher::default();
    let tree = compile("paint <c: color>").unwrap();
    for raw in ["paint red", "paint", "paint 1 2"] {
        assert!(matcher.match_call(&tree, raw).unwrap_err().is_structural(), "{raw}");
    }
}

#[test]
fn float_and_bool_parameters() {
    let matcher = CallMatcher::default();
    let tree = compile("set <ratio: float> <enabled: bool>").unwrap();
    let outcome = matcher.match_call(&tree, "set 0.25 sure").unwrap();
    assert_eq!(outcome.get("ratio"), Some(&Value::Float(0.25)));
    assert_eq!(outcome.get("enabled"), Some(&Value::Bool(true)));
}

#[test]
fn loose_bool_round_trip() {
    for word in ["y", "yes", "t", "true", "do", "ok", "sure", "alright", "1", "2.5"] {
        assert_eq!(loose_bool(word), Ok(true), "{word}");
        assert_eq!(loose_bool(&word.to_uppercase()), Ok(true), "{word}");
    }
    for word in ["n", "no", "f", "false", "dont", "0", "0.0"] {
        assert_eq!(loose_bool(word), Ok(false), "{word}");
    }
    assert!(loose_bool("perhaps").is_err());
}

#[test]
fn registered_type_coerces() {
    let mut matcher = CallMatcher::default();
    matcher.register_type("percent", |raw| {
        let n: i64 = raw
            .trim_end_matches('%')
            .parse()
            .map_err(|_| CoercionError::new("not a percentage"))?;
        if (0..=100).contains(&n) {
            Ok(Value::Int(n))
        } else {
            Err(CoercionError::new("out of range"))
        }
    });

    let tree = compile("volume <level: percent>").unwrap();
    assert_eq!(
        matcher.match_call(&tree, "volume 40%").unwrap().get("level"),
        Some(&Value::Int(40))
    );
    assert!(matcher.match_call(&tree, "volume 140%").unwrap_err().is_mismatch());
    assert_eq!(matcher.parse_arg("percent", "7"), Ok(Value::Int(7)));
    assert!(matches!(
        matcher.parse_arg("percentage", "7"),
        Err(ArgError::UndefinedType(_))
    ));
}

#[test]
fn registering_replaces_builtin() {
    let mut matcher = CallMatcher::new(MatcherConfig::default());
    matcher.register_type("int", |raw| Ok(Value::Int(i64::try_from(raw.len()).unwrap_or(0))));
    let tree = compile("count <n: int>").unwrap();
    assert_eq!(
        matcher.match_call(&tree, "count abcd").unwrap().get("n"),
        Some(&Value::Int(4))
    );
}
