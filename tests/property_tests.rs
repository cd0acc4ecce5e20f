//! Property-based tests for dispatch and aggregation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use composite_hsm::core::{CompositeState, Event, EventHandlingResult, Guard};
use composite_hsm::machine::{Configuration, Orchestrator, Transition};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn answer(propagate: bool) -> EventHandlingResult {
    if propagate {
        EventHandlingResult::CONTINUE
    } else {
        EventHandlingResult::STOP
    }
}

/// A one-state child machine whose state answers `E` with the given flag.
fn child(propagate: bool) -> Orchestrator {
    let mut config = Configuration::new("child", "s");
    config.add_state(CompositeState::new("s").with_handler("E", move |_: &Event| answer(propagate)));
    Orchestrator::new(config).unwrap()
}

/// Parent machine: state `p` owns the children and optionally consumes `E`,
/// transition `p --E--> q`.
fn parent(flags: &[bool], parent_stops: bool, handler_calls: Arc<AtomicUsize>) -> Orchestrator {
    let mut p = CompositeState::new("p");
    if parent_stops {
        p.add_event_handler("E", move |_: &Event| {
            handler_calls.fetch_add(1, Ordering::SeqCst);
            EventHandlingResult::STOP
        });
    }
    for &flag in flags {
        p.add_child_machine(child(flag));
    }

    let mut config = Configuration::new("parent", "p");
    config.add_state(p);
    config.add_state(CompositeState::new("q"));
    config.add_transition(Transition::new("p", "E", "q"));
    Orchestrator::new(config).unwrap()
}

prop_compose! {
    fn event_type()(variant in 0..3u8) -> &'static str {
        match variant {
            0 => "A",
            1 => "B",
            _ => "X",
        }
    }
}

proptest! {
    #[test]
    fn composite_propagates_only_if_a_child_propagates(
        flags in prop::collection::vec(any::<bool>(), 1..6),
        parent_stops in any::<bool>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut machine = parent(&flags, parent_stops, Arc::clone(&calls));
        machine.start().unwrap();

        let state = machine.state_mut("p").unwrap();
        let result = state.deliver_event(&Event::new("E")).unwrap();

        let any_child = flags.iter().any(|f| *f);
        prop_assert_eq!(result.propagate, any_child && !parent_stops);
        let expected_calls = usize::from(any_child && parent_stops);
        prop_assert_eq!(calls.load(Ordering::SeqCst), expected_calls);
    }

    #[test]
    fn consumed_event_never_reaches_transition_table(
        flags in prop::collection::vec(any::<bool>(), 0..6),
        parent_stops in any::<bool>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut machine = parent(&flags, parent_stops, calls);
        machine.start().unwrap();

        let result = machine.deliver_event(&Event::new("E")).unwrap();

        let consumed = (!flags.is_empty() && flags.iter().all(|f| !*f)) || parent_stops;
        prop_assert_eq!(result.propagate, !consumed);
        let expected = if consumed { "p" } else { "q" };
        prop_assert_eq!(machine.current_state().as_str(), expected);
    }

    #[test]
    fn guard_gates_transition_and_runs_once(allow in any::<bool>()) {
        let checks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&checks);
        let mut config = Configuration::new("guarded", "a");
        config.add_state(CompositeState::new("a"));
        config.add_state(CompositeState::new("b"));
        config.add_transition(Transition::new("a", "GO", "b").with_guard(Guard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            allow
        })));
        let mut machine = Orchestrator::new(config).unwrap();
        machine.start().unwrap();

        let result = machine.deliver_event(&Event::new("GO")).unwrap();

        prop_assert!(result.propagate);
        prop_assert_eq!(checks.load(Ordering::SeqCst), 1);
        let expected = if allow { "b" } else { "a" };
        prop_assert_eq!(machine.current_state().as_str(), expected);
    }

    #[test]
    fn introspection_is_stable_and_log_tracks_moves(
        events in prop::collection::vec(event_type(), 0..20),
    ) {
        let mut config = Configuration::new("toggle", "left");
        config.add_state(CompositeState::new("left"));
        config.add_state(CompositeState::new("right"));
        config.add_transition(Transition::new("left", "A", "right"));
        config.add_transition(Transition::new("right", "B", "left"));
        let mut machine = Orchestrator::new(config).unwrap();
        machine.start().unwrap();

        let mut moves = 0;
        for event in &events {
            let before = machine.current_state().clone();
            machine.deliver_event(&Event::new(*event)).unwrap();
            if *machine.current_state() != before {
                moves += 1;
            }

            prop_assert_eq!(machine.current_state(), machine.current_state());
            prop_assert_eq!(machine.context(), machine.context());
        }

        prop_assert_eq!(machine.context().log().len(), moves);
        if moves > 0 {
            prop_assert_eq!(machine.context().log().path().len(), moves + 1);
        }
    }
}
