//! Machine kinds and the predicates that depend on them.
//!
//! Which transitions are silent and which pairs of transitions compete
//! for the same input differ per kind. Instead of re-dispatching on every
//! query, an automaton resolves its [`KindRules`] once when it is created.

use super::transition::{Transition, TransitionKind, TransitionLabel, TuringLabel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of machine an automaton is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineKind {
    Finite,
    Pushdown,
    Turing { tapes: usize },
    Mealy,
    Moore,
}

impl MachineKind {
    /// The only transition kind an automaton of this kind accepts.
    pub fn transition_kind(&self) -> TransitionKind {
        match self {
            Self::Finite => TransitionKind::Finite,
            Self::Pushdown => TransitionKind::Pushdown,
            Self::Turing { .. } => TransitionKind::Turing,
            Self::Mealy => TransitionKind::Mealy,
            Self::Moore => TransitionKind::Moore,
        }
    }

    /// Whether the machine decides acceptance (as opposed to a transducer).
    pub fn is_acceptor(&self) -> bool {
        !matches!(self, Self::Mealy | Self::Moore)
    }

    /// Number of Turing tapes; zero for every other kind.
    pub fn tapes(&self) -> usize {
        match self {
            Self::Turing { tapes } => *tapes,
            _ => 0,
        }
    }

    pub(crate) fn rules(&self) -> KindRules {
        match self {
            Self::Finite => KindRules {
                is_silent: finite_silent,
                overlaps: finite_overlap,
            },
            Self::Pushdown => KindRules {
                is_silent: pushdown_silent,
                overlaps: pushdown_overlap,
            },
            Self::Turing { .. } => KindRules {
                is_silent: turing_silent,
                overlaps: turing_overlap,
            },
            Self::Mealy | Self::Moore => KindRules {
                is_silent: never_silent,
                overlaps: transducer_overlap,
            },
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turing { tapes } if *tapes > 1 => write!(f, "{tapes}-tape Turing machine"),
            _ => fmt::Display::fmt(&self.transition_kind(), f),
        }
    }
}

/// Kind-specific predicates, resolved once per automaton.
#[derive(Clone, Copy)]
pub(crate) struct KindRules {
    /// Can the transition be taken without consuming input?
    pub(crate) is_silent: fn(&TransitionLabel) -> bool,
    /// Can both transitions (leaving the same state) fire on some input?
    pub(crate) overlaps: fn(&Transition, &Transition) -> bool,
}

impl fmt::Debug for KindRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRules").finish_non_exhaustive()
    }
}

fn finite_silent(label: &TransitionLabel) -> bool {
    matches!(label, TransitionLabel::Finite { input: None })
}

fn pushdown_silent(label: &TransitionLabel) -> bool {
    matches!(
        label,
        TransitionLabel::Pushdown { input: None, pop: None, push } if push.is_empty()
    )
}

fn turing_silent(label: &TransitionLabel) -> bool {
    matches!(label, TransitionLabel::Turing(TuringLabel::Block))
}

fn never_silent(_label: &TransitionLabel) -> bool {
    false
}

fn finite_overlap(a: &Transition, b: &Transition) -> bool {
    match (a.label(), b.label()) {
        (TransitionLabel::Finite { input: Some(x) }, TransitionLabel::Finite { input: Some(y) }) => {
            x == y
        }
        (TransitionLabel::Finite { .. }, TransitionLabel::Finite { .. }) => a.to() != b.to(),
        _ => false,
    }
}

fn compatible(a: &Option<char>, b: &Option<char>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x == y,
        _ => true,
    }
}

fn pushdown_overlap(a: &Transition, b: &Transition) -> bool {
    match (a.label(), b.label()) {
        (
            TransitionLabel::Pushdown {
                input: input_a,
                pop: pop_a,
                ..
            },
            TransitionLabel::Pushdown {
                input: input_b,
                pop: pop_b,
                ..
            },
        ) => compatible(input_a, input_b) && compatible(pop_a, pop_b),
        _ => false,
    }
}

fn turing_overlap(a: &Transition, b: &Transition) -> bool {
    match (a.label(), b.label()) {
        (TransitionLabel::Turing(TuringLabel::Block), TransitionLabel::Turing(_))
        | (TransitionLabel::Turing(_), TransitionLabel::Turing(TuringLabel::Block)) => true,
        (
            TransitionLabel::Turing(TuringLabel::Tapes(ops_a)),
            TransitionLabel::Turing(TuringLabel::Tapes(ops_b)),
        ) => {
            ops_a.len() == ops_b.len()
                && ops_a.iter().zip(ops_b).all(|(x, y)| x.read == y.read)
        }
        _ => false,
    }
}

fn transducer_overlap(a: &Transition, b: &Transition) -> bool {
    match (a.input(), b.input()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
