//! Validation issues and how to treat them.

use crate::core::{StateId, TransitionId};
use thiserror::Error;

/// A well-formedness problem found in an automaton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationIssue {
    #[error("No initial state")]
    MissingInitialState,

    #[error("Acceptor has no final states")]
    NoFinalStates,

    #[error("Moore state {0} has no output")]
    MissingOutput(StateId),

    #[error("State {state} has competing transitions {first} and {second}")]
    Nondeterministic {
        state: StateId,
        first: TransitionId,
        second: TransitionId,
    },

    #[error("Deterministic machine has silent transition {0}")]
    SilentTransition(TransitionId),

    #[error("State {0} is unreachable")]
    UnreachableState(StateId),

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}

/// How a validator reports the issues it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Issues fail the validation
    Error,

    /// Issues are logged and the validation succeeds
    Warning,
}
