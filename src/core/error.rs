//! Structural errors raised by automaton mutations.

use super::state::StateId;
use super::transition::{TransitionId, TransitionKind};
use thiserror::Error;

/// Errors that can occur when mutating an automaton.
///
/// Each variant is a structural violation caught synchronously at the
/// mutation call; the automaton is left unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("Cannot add a {found} transition to a {expected}")]
    IncompatibleTransitionKind {
        expected: TransitionKind,
        found: TransitionKind,
    },

    #[error("State {0} does not belong to this automaton")]
    ForeignState(StateId),

    #[error("Transition {0} does not belong to this automaton")]
    UnknownTransition(TransitionId),

    #[error("Transition has {found} tape operations, machine has {expected} tapes")]
    TapeCountMismatch { expected: usize, found: usize },

    #[error("State outputs are only defined for Moore machines")]
    NotMoore,
}
