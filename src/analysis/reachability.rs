//! Reachability facts: unreachable and useless states.
//!
//! Neither is an error. Simulation and conversion are well defined in
//! their presence; these functions just surface them.

use crate::core::{Automaton, StateId, StateSet};
use std::collections::VecDeque;

/// States reachable from the initial state along any transition.
pub fn reachable_states(automaton: &Automaton) -> StateSet {
    let mut reached = StateSet::new();
    let Some(start) = automaton.initial_state() else {
        return reached;
    };

    let mut queue = VecDeque::from([start]);
    reached.insert(start);
    while let Some(state) = queue.pop_front() {
        for transition in automaton.transitions_from(state) {
            if reached.insert(transition.to()) {
                queue.push_back(transition.to());
            }
        }
    }

    reached
}

/// States no path from the initial state leads to.
///
/// Every state is unreachable when there is no initial state.
pub fn unreachable_states(automaton: &Automaton) -> StateSet {
    let reached = reachable_states(automaton);
    automaton
        .state_ids()
        .filter(|&state| !reached.contains(state))
        .collect()
}

/// States from which no final state can be reached.
pub fn useless_states(automaton: &Automaton) -> StateSet {
    let mut productive: StateSet = automaton.final_states().iter().copied().collect();
    let mut queue: VecDeque<StateId> = productive.iter().collect();

    while let Some(state) = queue.pop_front() {
        for transition in automaton.transitions_into(state) {
            if productive.insert(transition.from()) {
                queue.push_back(transition.from());
            }
        }
    }

    automaton
        .state_ids()
        .filter(|&state| !productive.contains(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point, TransitionLabel};

    fn sample() -> (Automaton, Vec<StateId>) {
        // 0 -a-> 1 -b-> 2 (final), 0 -c-> 3 (dead end), 4 isolated
        let mut nfa = Automaton::finite();
        let q: Vec<_> = (0..5).map(|_| nfa.create_state(Point::default())).collect();
        nfa.set_initial(q[0]).unwrap();
        nfa.add_final(q[2]).unwrap();
        nfa.add_transition(q[0], q[1], TransitionLabel::symbol('a')).unwrap();
        nfa.add_transition(q[1], q[2], TransitionLabel::symbol('b')).unwrap();
        nfa.add_transition(q[0], q[3], TransitionLabel::symbol('c')).unwrap();
        (nfa, q)
    }

    #[test]
    fn finds_unreachable_states() {
        let (nfa, q) = sample();
        assert_eq!(unreachable_states(&nfa).to_vec(), vec![q[4]]);
        assert_eq!(reachable_states(&nfa).len(), 4);
    }

    #[test]
    fn finds_useless_states() {
        let (nfa, q) = sample();
        assert_eq!(useless_states(&nfa).to_vec(), vec![q[3], q[4]]);
    }

    #[test]
    fn everything_unreachable_without_initial_state() {
        let (mut nfa, _) = sample();
        nfa.clear_initial();
        assert_eq!(unreachable_states(&nfa).len(), nfa.num_states());
    }
}
