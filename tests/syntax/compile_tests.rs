//! Compiling grammar definitions into trees.

use cliffs_matcher::CallMatcher;
use cliffs_syntax::{CompilerConfig, Node, SimplifyMode, SyntaxCompiler, compile};
use proptest::prelude::*;

fn compile_flat(definition: &str) -> Node {
    SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::Yes))
        .compile(definition)
        .unwrap()
}

// =============================================================================
// Shapes
// =============================================================================

#[test]
fn alarm_definition() {
    let tree = compile_flat("set [loud] alarm at <time: int> (am|pm) [with message <message...>]");
    assert_eq!(
        tree,
        Node::sequence(vec![
            Node::literal("set"),
            Node::optional(Node::literal("loud")),
            Node::literal("alarm"),
            Node::literal("at"),
            Node::parameter("time", Some("int")),
            Node::variant(vec![Node::literal("am"), Node::literal("pm")]),
            Node::optional(Node::sequence(vec![
                Node::literal("with"),
                Node::literal("message"),
                Node::tail("message"),
            ])),
        ])
    );
}

#[test]
fn binding_names() {
    let tree = compile("give <item> [--count <n: int>] [to <who...>]").unwrap();
    assert_eq!(tree.binding_names(), vec!["item", "n", "who"]);
}

#[test]
fn named_groups_are_binding_names() {
    let tree = compile("[loud]:is_loud (am|pm):half").unwrap();
    assert_eq!(tree.binding_names(), vec!["is_loud", "half"]);
}

#[test]
fn literal_only_definition_renders_back() {
    let tree = compile("turn the lights off").unwrap();
    assert_eq!(tree.to_string(), "turn the lights off");
    assert_eq!(tree.children().len(), 4);
}

// =============================================================================
// Simplification
// =============================================================================

#[test]
fn warn_mode_keeps_redundant_groups() {
    let warned = compile("a ((b c))").unwrap();
    let flat = compile_flat("a ((b c))");
    assert_ne!(warned, flat);
    assert_eq!(flat.to_string(), "a b c");
}

#[test]
fn no_mode_keeps_root_sequence() {
    let compiler = SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::No));
    let tree = compiler.compile("look").unwrap();
    assert_eq!(tree, Node::sequence(vec![Node::literal("look")]));
}

#[test]
fn silently_matches_yes() {
    let silent = SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::Silently));
    let definition = "x [(y)] (z)";
    assert_eq!(silent.compile(definition).unwrap(), compile_flat(definition));
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn compile_is_deterministic() {
    let definition = "deploy <service> [--env <env>] (now|later):when <notes...>";
    let first = compile(definition).unwrap();
    let second = compile(definition).unwrap();
    assert_eq!(first, second);

    let matcher = CallMatcher::default();
    for call in ["deploy api --env prod later ship it", "deploy api now", "deploy"] {
        assert_eq!(
            matcher.match_call(&first, call),
            matcher.match_call(&second, call),
            "{call}"
        );
    }
}

#[test]
fn unsimplified_nested_group_round_trips() {
    let compiler = SyntaxCompiler::new(CompilerConfig::default().with_simplify(SimplifyMode::No));
    let tree = compiler.compile("(a b)").unwrap();
    assert_eq!(tree.to_string(), "(a b)");
    assert_eq!(compiler.compile(&tree.to_string()).unwrap(), tree);
}

#[test]
fn rendered_tree_recompiles_to_same_tree() {
    for definition in [
        "deploy <service> [--env <env>] (now|later):when <notes...>",
        "start | stop | restart",
        "[a|b|c]:pick go^",
        "go (north|south (west|east))",
        "[(a b)]",
        "sync [(--all --force)]:hard",
    ] {
        let tree = compile(definition).unwrap();
        assert_eq!(compile(&tree.to_string()).unwrap(), tree, "{definition}");
    }
}

proptest! {
    #[test]
    fn literal_sequences_round_trip(words in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let definition = words.join(" ");
        let tree = compile(&definition).unwrap();
        prop_assert_eq!(tree.to_string(), definition);
    }
}
