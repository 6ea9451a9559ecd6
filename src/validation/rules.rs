//! Validation rules for automata using Validation.

use crate::analysis::{detect_nondeterminism, unreachable_states};
use crate::core::{Automaton, MachineKind};
use crate::validation::issues::{Severity, ValidationIssue};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Type alias for custom check functions
pub type ValidationCheck =
    Box<dyn Fn(&Automaton) -> Validation<(), NonEmptyVec<ValidationIssue>> + Send + Sync>;

/// A set of well-formedness rules.
/// Uses Validation to accumulate ALL issues.
pub struct Validator {
    pub(crate) require_initial: bool,
    pub(crate) require_final: bool,
    pub(crate) require_deterministic: bool,
    pub(crate) require_moore_outputs: bool,
    pub(crate) forbid_unreachable: bool,
    pub(crate) checks: Vec<ValidationCheck>,
    pub(crate) severity: Severity,
}

impl Validator {
    /// Run every rule against `automaton`.
    ///
    /// With [`Severity::Warning`] the issues are logged and the result is
    /// always a success.
    pub fn validate(&self, automaton: &Automaton) -> Validation<(), NonEmptyVec<ValidationIssue>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ValidationIssue>>> = Vec::new();

        if self.require_initial {
            checks.push(check(
                automaton.initial_state().is_some(),
                ValidationIssue::MissingInitialState,
            ));
        }

        if self.require_final && automaton.kind().is_acceptor() {
            checks.push(check(
                !automaton.final_states().is_empty(),
                ValidationIssue::NoFinalStates,
            ));
        }

        if self.require_moore_outputs && automaton.kind() == MachineKind::Moore {
            for state in automaton.state_ids() {
                checks.push(check(
                    automaton.output(state).is_some(),
                    ValidationIssue::MissingOutput(state),
                ));
            }
        }

        if self.require_deterministic {
            for conflict in detect_nondeterminism(automaton) {
                checks.push(Validation::fail(ValidationIssue::Nondeterministic {
                    state: conflict.state,
                    first: conflict.first,
                    second: conflict.second,
                }));
            }
            for transition in automaton.transitions() {
                checks.push(check(
                    !automaton.is_silent(transition),
                    ValidationIssue::SilentTransition(transition.id()),
                ));
            }
        }

        if self.forbid_unreachable {
            for state in unreachable_states(automaton).iter() {
                checks.push(Validation::fail(ValidationIssue::UnreachableState(state)));
            }
        }

        for check_fn in &self.checks {
            checks.push(check_fn(automaton));
        }

        let result = Validation::all_vec(checks).map(|_| ());
        match (self.severity, result) {
            (Severity::Warning, Validation::Failure(issues)) => {
                for issue in issues.iter() {
                    warn!(%issue, "Automaton validation issue");
                }
                Validation::success(())
            }
            (_, result) => result,
        }
    }

    /// Every issue found, regardless of severity.
    pub fn issues(&self, automaton: &Automaton) -> Vec<ValidationIssue> {
        let strict = Validator {
            require_initial: self.require_initial,
            require_final: self.require_final,
            require_deterministic: self.require_deterministic,
            require_moore_outputs: self.require_moore_outputs,
            forbid_unreachable: self.forbid_unreachable,
            checks: Vec::new(),
            severity: Severity::Error,
        };
        let mut found = Vec::new();
        if let Validation::Failure(issues) = strict.validate(automaton) {
            found.extend(issues.iter().cloned());
        }
        for check_fn in &self.checks {
            if let Validation::Failure(issues) = check_fn(automaton) {
                found.extend(issues.iter().cloned());
            }
        }
        found
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

fn check(ok: bool, issue: ValidationIssue) -> Validation<(), NonEmptyVec<ValidationIssue>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AutomatonBuilder;
    use crate::validation::builder::ValidatorBuilder;

    fn sloppy() -> Automaton {
        // Nondeterministic on 'a', an unreachable state, no final state.
        AutomatonBuilder::finite()
            .initial("q0")
            .state("q1")
            .state("orphan")
            .on("q0", 'a', "q0")
            .on("q0", 'a', "q1")
            .build()
            .unwrap()
    }

    #[test]
    fn validation_accumulates_all_issues() {
        let validator = ValidatorBuilder::new()
            .require_initial()
            .require_final()
            .require_deterministic()
            .forbid_unreachable()
            .require_pred(|a| a.num_states() < 3, "Too many states".to_string())
            .build();

        match validator.validate(&sloppy()) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationIssue::Nondeterministic { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationIssue::UnreachableState(2))));
                assert!(errors.iter().any(|e| *e == ValidationIssue::NoFinalStates));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ValidationIssue::CustomCheckFailed { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validation_succeeds_when_all_checks_pass() {
        let dfa = AutomatonBuilder::finite()
            .initial("q0")
            .final_state("q1")
            .on("q0", 'a', "q1")
            .build()
            .unwrap();

        let validator = ValidatorBuilder::new()
            .require_initial()
            .require_final()
            .require_deterministic()
            .forbid_unreachable()
            .build();
        assert!(validator.validate(&dfa).is_success());
    }

    #[test]
    fn silent_transitions_are_not_deterministic() {
        let nfa = AutomatonBuilder::finite()
            .initial("q0")
            .final_state("q1")
            .epsilon("q0", "q1")
            .build()
            .unwrap();

        let validator = ValidatorBuilder::new().require_deterministic().build();
        assert_eq!(
            validator.issues(&nfa),
            vec![ValidationIssue::SilentTransition(0)]
        );
    }

    #[test]
    fn moore_outputs_are_checked() {
        let moore = AutomatonBuilder::moore()
            .initial("a")
            .state("b")
            .output("a", "0")
            .build()
            .unwrap();

        let validator = ValidatorBuilder::for_kind(moore.kind()).build();
        assert_eq!(validator.issues(&moore), vec![ValidationIssue::MissingOutput(1)]);
    }

    #[test]
    fn transducers_need_no_final_states() {
        let mealy = AutomatonBuilder::mealy().initial("q").build().unwrap();
        let validator = ValidatorBuilder::new().require_final().build();
        assert!(validator.validate(&mealy).is_success());
    }

    #[test]
    fn warnings_do_not_fail() {
        let validator = ValidatorBuilder::new()
            .require_final()
            .severity(Severity::Warning)
            .build();

        assert_eq!(validator.severity(), Severity::Warning);
        assert!(validator.validate(&sloppy()).is_success());
        assert_eq!(validator.issues(&sloppy()), vec![ValidationIssue::NoFinalStates]);
    }
}
