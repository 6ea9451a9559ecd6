//! Structural analyses that precede simulation and conversion.
//!
//! All functions here are pure queries over an [`Automaton`](crate::core::Automaton):
//! - [`closure`]: states reachable through silent transitions
//! - [`detect_nondeterminism`]: transitions competing for the same input
//! - [`unreachable_states`] and [`useless_states`]: reachability facts

mod closure;
mod nondeterminism;
mod reachability;

pub use closure::{closure, closure_of};
pub use nondeterminism::{detect_nondeterminism, is_deterministic, nondeterministic_states, Conflict};
pub use reachability::{reachable_states, unreachable_states, useless_states};
