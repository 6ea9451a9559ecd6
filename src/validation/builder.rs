//! Builder API for creating validators.

use crate::core::{Automaton, MachineKind};
use crate::validation::issues::{Severity, ValidationIssue};
use crate::validation::rules::{ValidationCheck, Validator};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating validators
pub struct ValidatorBuilder {
    require_initial: bool,
    require_final: bool,
    require_deterministic: bool,
    require_moore_outputs: bool,
    forbid_unreachable: bool,
    checks: Vec<ValidationCheck>,
    severity: Severity,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            require_initial: false,
            require_final: false,
            require_deterministic: false,
            require_moore_outputs: false,
            forbid_unreachable: false,
            checks: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// The checks every automaton of `kind` should pass.
    pub fn for_kind(kind: MachineKind) -> Self {
        let builder = Self::new().require_initial();
        match kind {
            MachineKind::Moore => builder.require_moore_outputs(),
            MachineKind::Mealy => builder,
            _ => builder.require_final(),
        }
    }

    pub fn require_initial(mut self) -> Self {
        self.require_initial = true;
        self
    }

    /// Require at least one final state. Ignored for transducers.
    pub fn require_final(mut self) -> Self {
        self.require_final = true;
        self
    }

    /// Require no competing and no silent transitions
    pub fn require_deterministic(mut self) -> Self {
        self.require_deterministic = true;
        self
    }

    pub fn require_moore_outputs(mut self) -> Self {
        self.require_moore_outputs = true;
        self
    }

    pub fn forbid_unreachable(mut self) -> Self {
        self.forbid_unreachable = true;
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&Automaton) -> Validation<(), NonEmptyVec<ValidationIssue>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&Automaton) -> bool + Send + Sync + 'static,
    {
        let check = move |automaton: &Automaton| {
            if predicate(automaton) {
                Validation::success(())
            } else {
                Validation::fail(ValidationIssue::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            require_initial: self.require_initial,
            require_final: self.require_final,
            require_deterministic: self.require_deterministic,
            require_moore_outputs: self.require_moore_outputs,
            forbid_unreachable: self.forbid_unreachable,
            checks: self.checks,
            severity: self.severity,
        }
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
