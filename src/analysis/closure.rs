//! Closure over silent transitions.

use crate::core::{Automaton, StateId, StateSet};
use std::collections::VecDeque;

/// States reachable from `state` through zero or more silent transitions.
///
/// Which transitions count as silent is decided by the automaton's kind:
/// empty input for finite automata, empty read/pop/push for pushdown
/// automata, block transitions for Turing machines and nothing at all for
/// Mealy and Moore machines.
///
/// # Example
///
/// ```rust
/// use automata_lab::analysis::closure;
/// use automata_lab::core::{Automaton, Point, TransitionLabel};
///
/// let mut nfa = Automaton::finite();
/// let q0 = nfa.create_state(Point::default());
/// let q1 = nfa.create_state(Point::default());
/// let q2 = nfa.create_state(Point::default());
/// nfa.add_transition(q0, q1, TransitionLabel::epsilon()).unwrap();
/// nfa.add_transition(q1, q2, TransitionLabel::symbol('a')).unwrap();
///
/// assert_eq!(closure(&nfa, q0).to_vec(), vec![q0, q1]);
/// ```
pub fn closure(automaton: &Automaton, state: StateId) -> StateSet {
    closure_of(automaton, &StateSet::singleton(state))
}

/// Union of the closures of every state in `states`.
///
/// Worklist fixed point: the result only grows and is bounded by the
/// number of states, so this always terminates. Closing an already closed
/// set returns it unchanged.
pub fn closure_of(automaton: &Automaton, states: &StateSet) -> StateSet {
    let mut closed = states.clone();
    let mut worklist: VecDeque<StateId> = states.iter().collect();

    while let Some(current) = worklist.pop_front() {
        for transition in automaton.transitions_from(current) {
            if automaton.is_silent(transition) && closed.insert(transition.to()) {
                worklist.push_back(transition.to());
            }
        }
    }

    closed
}
