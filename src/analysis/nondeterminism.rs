//! Detection of competing transitions.

use crate::core::{Automaton, StateId, StateSet, TransitionId};
use serde::{Deserialize, Serialize};

/// Two transitions leaving `state` that can fire on the same input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conflict {
    pub state: StateId,
    pub first: TransitionId,
    pub second: TransitionId,
}

/// Report every pair of outgoing transitions whose trigger conditions
/// overlap.
///
/// The overlap test depends on the machine kind: equal symbols for finite
/// automata (or a silent move next to a transition to another state),
/// compatible read and pop symbols for pushdown automata, equal reads on
/// every tape for Turing machines, equal inputs for Mealy and Moore
/// machines. An empty result means the automaton is deterministic in that
/// respect. The automaton is not modified.
///
/// # Example
///
/// ```rust
/// use automata_lab::analysis::detect_nondeterminism;
/// use automata_lab::core::{Automaton, Point, TransitionLabel};
///
/// let mut nfa = Automaton::finite();
/// let q0 = nfa.create_state(Point::default());
/// let q1 = nfa.create_state(Point::default());
/// nfa.add_transition(q0, q0, TransitionLabel::symbol('a')).unwrap();
/// nfa.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
///
/// let conflicts = detect_nondeterminism(&nfa);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].state, q0);
/// ```
pub fn detect_nondeterminism(automaton: &Automaton) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for state in automaton.state_ids() {
        let outgoing: Vec<_> = automaton.transitions_from(state).collect();
        for (i, first) in outgoing.iter().enumerate() {
            for second in &outgoing[i + 1..] {
                if automaton.overlaps(first, second) {
                    conflicts.push(Conflict {
                        state,
                        first: first.id(),
                        second: second.id(),
                    });
                }
            }
        }
    }

    conflicts
}

/// States that have at least one conflicting pair of transitions.
pub fn nondeterministic_states(automaton: &Automaton) -> StateSet {
    detect_nondeterminism(automaton)
        .into_iter()
        .map(|conflict| conflict.state)
        .collect()
}

/// No conflicting transitions and no silent transitions at all.
pub fn is_deterministic(automaton: &Automaton) -> bool {
    detect_nondeterminism(automaton).is_empty()
        && !automaton
            .transitions()
            .any(|transition| automaton.is_silent(transition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Move, Point, TransitionLabel};

    #[test]
    fn deterministic_fsa_has_no_conflicts() {
        let mut dfa = Automaton::finite();
        let q0 = dfa.create_state(Point::default());
        let q1 = dfa.create_state(Point::default());
        dfa.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
        dfa.add_transition(q0, q0, TransitionLabel::symbol('b')).unwrap();
        dfa.add_transition(q1, q0, TransitionLabel::symbol('a')).unwrap();

        assert!(detect_nondeterminism(&dfa).is_empty());
        assert!(is_deterministic(&dfa));
    }

    #[test]
    fn silent_transition_conflicts_with_other_targets() {
        let mut nfa = Automaton::finite();
        let q0 = nfa.create_state(Point::default());
        let q1 = nfa.create_state(Point::default());
        let q2 = nfa.create_state(Point::default());
        let eps = nfa.add_transition(q0, q1, TransitionLabel::epsilon()).unwrap();
        let b = nfa.add_transition(q0, q2, TransitionLabel::symbol('b')).unwrap();

        assert_eq!(
            detect_nondeterminism(&nfa),
            vec![Conflict {
                state: q0,
                first: eps,
                second: b,
            }]
        );
        assert_eq!(nondeterministic_states(&nfa).to_vec(), vec![q0]);
    }

    #[test]
    fn lone_silent_transition_is_not_deterministic() {
        let mut nfa = Automaton::finite();
        let q0 = nfa.create_state(Point::default());
        let q1 = nfa.create_state(Point::default());
        nfa.add_transition(q0, q1, TransitionLabel::epsilon()).unwrap();

        assert!(detect_nondeterminism(&nfa).is_empty());
        assert!(!is_deterministic(&nfa));
    }

    #[test]
    fn pushdown_conflicts_on_compatible_pop() {
        let mut pda = Automaton::pushdown();
        let q0 = pda.create_state(Point::default());
        let q1 = pda.create_state(Point::default());
        pda.add_transition(q0, q1, TransitionLabel::pushdown(Some('a'), Some('Z'), "AZ"))
            .unwrap();
        pda.add_transition(q0, q0, TransitionLabel::pushdown(Some('a'), Some('A'), "AA"))
            .unwrap();
        assert!(detect_nondeterminism(&pda).is_empty());

        pda.add_transition(q0, q0, TransitionLabel::pushdown(None, Some('Z'), ""))
            .unwrap();
        assert_eq!(detect_nondeterminism(&pda).len(), 1);
    }

    #[test]
    fn turing_conflicts_on_equal_reads() {
        let mut tm = Automaton::turing(1);
        let q0 = tm.create_state(Point::default());
        let q1 = tm.create_state(Point::default());
        tm.add_transition(q0, q1, TransitionLabel::turing('a', 'b', Move::Right))
            .unwrap();
        tm.add_transition(q0, q0, TransitionLabel::turing('b', 'b', Move::Right))
            .unwrap();
        assert!(detect_nondeterminism(&tm).is_empty());

        tm.add_transition(q0, q0, TransitionLabel::turing('a', 'a', Move::Left))
            .unwrap();
        assert_eq!(nondeterministic_states(&tm).to_vec(), vec![q0]);
    }

    #[test]
    fn mealy_conflicts_on_equal_inputs() {
        let mut mealy = Automaton::mealy();
        let q0 = mealy.create_state(Point::default());
        mealy.add_transition(q0, q0, TransitionLabel::mealy('a', "0")).unwrap();
        mealy.add_transition(q0, q0, TransitionLabel::mealy('a', "1")).unwrap();

        assert_eq!(detect_nondeterminism(&mealy).len(), 1);
    }
}
