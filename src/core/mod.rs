//! The automaton model.
//!
//! This module contains the pure data layer every algorithm builds on:
//! - States and ordered state sets
//! - Transitions with kind-specific labels
//! - The [`Automaton`] container and its structural invariants
//!
//! Nothing in here searches or iterates to a fixed point; that lives in
//! [`analysis`](crate::analysis), [`simulation`](crate::simulation) and
//! [`conversion`](crate::conversion).

mod automaton;
mod error;
mod kind;
mod state;
mod state_set;
mod transition;

pub use automaton::Automaton;
pub use error::ModelError;
pub use kind::MachineKind;
pub use state::{Point, State, StateId};
pub use state_set::StateSet;
pub use transition::{
    Move, Symbol, TapeOp, Transition, TransitionId, TransitionKind, TransitionLabel, TuringLabel,
    BLANK,
};
