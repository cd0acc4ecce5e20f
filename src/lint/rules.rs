//! Reference checks over a configuration tree using Validation.

use crate::lint::violations::ReferenceViolation;
use crate::machine::Configuration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of one reference check.
pub type Check = Validation<(), NonEmptyVec<ReferenceViolation>>;

/// Check every state reference in `config` and its child configurations,
/// accumulating ALL violations.
/// Returns Validation::Success(()) if every reference resolves.
pub fn check_references(config: &Configuration) -> Check {
    let mut checks: Vec<Check> = vec![check_initial(config)];

    for transition in &config.transitions {
        checks.push(check_state(config, &transition.from_state, || {
            ReferenceViolation::UnknownSourceState {
                machine: config.id.clone(),
                state: transition.from_state.clone(),
                event: transition.event_type.clone(),
            }
        }));
        checks.push(check_state(config, &transition.to_state, || {
            ReferenceViolation::UnknownTargetState {
                machine: config.id.clone(),
                state: transition.to_state.clone(),
                event: transition.event_type.clone(),
            }
        }));
    }

    for state in config.states.values() {
        if let Some(parent) = state.parent() {
            checks.push(check_state(config, parent, || ReferenceViolation::UnknownParent {
                machine: config.id.clone(),
                state: state.id().clone(),
                parent: parent.clone(),
            }));
        }
        for child in state.children() {
            checks.push(check_references(child.config()));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_initial(config: &Configuration) -> Check {
    check_state(config, &config.initial, || ReferenceViolation::UnknownInitialState {
        machine: config.id.clone(),
        initial: config.initial.clone(),
    })
}

fn check_state<F>(config: &Configuration, id: &str, violation: F) -> Check
where
    F: FnOnce() -> ReferenceViolation,
{
    if config.has_state(id) {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}
