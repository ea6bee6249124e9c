//! Dispatching calls to commands.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cliffs_dispatch::{Command, CommandDispatcher, DispatchError};
use cliffs_foundation::Value;
use cliffs_matcher::MatchOutcome;
use cliffs_syntax::compile;

#[derive(Debug, PartialEq)]
enum Action {
    Alarm { time: i64, pm: bool, loud: bool },
    Cancel,
    Say(String),
}

fn alarm(m: &MatchOutcome) -> Action {
    Action::Alarm {
        time: m.get("time").and_then(Value::as_int).unwrap_or_default(),
        pm: m.get("half").and_then(Value::as_int) == Some(1),
        loud: m.get("loud").and_then(Value::as_bool).unwrap_or_default(),
    }
}

fn clock() -> CommandDispatcher<Action> {
    let mut dispatcher = CommandDispatcher::default();
    dispatcher
        .command("set [loud]:loud alarm at <time: int> (am|pm):half", alarm)
        .unwrap()
        .set_description("Sets an alarm.");
    dispatcher
        .command("cancel alarm", |_| Action::Cancel)
        .unwrap();
    dispatcher
        .command("say <text...>", |m| {
            Action::Say(m.get_str("text").unwrap_or_default().to_string())
        })
        .unwrap();
    dispatcher
}

#[test]
fn dispatches_to_matching_command() {
    let dispatcher = clock();
    assert_eq!(
        dispatcher.dispatch("set loud alarm at 7 pm"),
        Ok(Action::Alarm {
            time: 7,
            pm: true,
            loud: true
        })
    );
    assert_eq!(
        dispatcher.dispatch("set alarm at 6 am"),
        Ok(Action::Alarm {
            time: 6,
            pm: false,
            loud: false
        })
    );
    assert_eq!(dispatcher.dispatch("cancel alarm"), Ok(Action::Cancel));
    assert_eq!(
        dispatcher.dispatch("say \"good  morning\" all"),
        Ok(Action::Say("\"good  morning\" all".to_string()))
    );
}

#[test]
fn partial_match_reports_mismatch() {
    let dispatcher = clock();
    let err = dispatcher.dispatch("set alarm at seven pm").unwrap_err();
    let DispatchError::Mismatch(fail) = &err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert!(fail.to_string().contains("does not match type int"));
}

#[test]
fn unrelated_call_is_unknown() {
    let dispatcher = clock();
    assert_eq!(dispatcher.dispatch("dance"), Err(DispatchError::UnknownCommand));
    assert_eq!(
        dispatcher.dispatch("dance").unwrap_err().to_string(),
        "unknown command"
    );
}

#[test]
fn only_the_winner_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = CommandDispatcher::default();
    for syntax in ["open <thing>", "open door", "open <thing> with <tool>"] {
        let calls = Arc::clone(&calls);
        dispatcher
            .command(syntax, move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                syntax
            })
            .unwrap();
    }

    assert_eq!(dispatcher.dispatch("open door"), Ok("open door"));
    assert_eq!(dispatcher.dispatch("open gate with key"), Ok("open <thing> with <tool>"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn registered_commands_keep_order() {
    let mut dispatcher: CommandDispatcher<u8> = CommandDispatcher::default();
    dispatcher.register(Command::new(compile("a").unwrap(), |_| 1));
    dispatcher.register(Command::new(compile("a").unwrap(), |_| 2));
    assert_eq!(dispatcher.commands().len(), 2);
    assert_eq!(dispatcher.dispatch("a"), Ok(1));
}
