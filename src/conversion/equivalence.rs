//! Language equivalence of finite automata.

use super::minimize::{minimize, transition_table, Table};
use crate::analysis::is_deterministic;
use crate::core::{Automaton, MachineKind, StateId};
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// Whether two finite automata accept the same language.
///
/// Both sides are determinized and minimized, then walked in lockstep from
/// their initial states over the union of their alphabets while building
/// a state bijection. A finality mismatch, a transition present on only
/// one side, or a pair that contradicts the bijection built so far proves
/// the languages differ.
///
/// Returns `false` for anything that is not a finite automaton. Neither
/// input is modified.
///
/// # Example
///
/// ```rust
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::conversion::are_equivalent;
///
/// let a_plus = AutomatonBuilder::finite()
///     .initial("p")
///     .final_state("q")
///     .on("p", 'a', "q")
///     .on("q", 'a', "q")
///     .build()
///     .unwrap();
///
/// let a_a_star = AutomatonBuilder::finite()
///     .initial("r")
///     .state("s")
///     .final_state("t")
///     .on("r", 'a', "s")
///     .epsilon("s", "t")
///     .on("t", 'a', "t")
///     .build()
///     .unwrap();
///
/// assert!(are_equivalent(&a_plus, &a_a_star));
/// ```
pub fn are_equivalent(first: &Automaton, second: &Automaton) -> bool {
    if first.kind() != MachineKind::Finite || second.kind() != MachineKind::Finite {
        return false;
    }
    let (Ok(left), Ok(right)) = (minimize(first), minimize(second)) else {
        return false;
    };

    let equivalent = are_isomorphic(&left, &right);
    debug!(
        left_states = left.num_states(),
        right_states = right.num_states(),
        equivalent,
        "Compared minimal DFAs"
    );
    equivalent
}

/// Whether two deterministic finite automata are the same machine up to
/// renaming of states.
///
/// Every state of both automata must be covered by the bijection, so
/// unreachable states count. Two automata without an initial state are
/// isomorphic only when both have no states at all.
pub fn are_isomorphic(first: &Automaton, second: &Automaton) -> bool {
    if first.kind() != MachineKind::Finite
        || second.kind() != MachineKind::Finite
        || !is_deterministic(first)
        || !is_deterministic(second)
        || first.num_states() != second.num_states()
    {
        return false;
    }
    match (first.initial_state(), second.initial_state()) {
        (Some(left_start), Some(right_start)) => lockstep(first, second, left_start, right_start)
            .is_some_and(|bijection| bijection.len() == first.num_states()),
        (None, None) => first.num_states() == 0,
        _ => false,
    }
}

/// Walk both automata from their initial states and return the state
/// bijection, or `None` as soon as the two disagree.
fn lockstep(
    left: &Automaton,
    right: &Automaton,
    left_start: StateId,
    right_start: StateId,
) -> Option<BTreeMap<StateId, StateId>> {
    let left_table: Table = transition_table(left);
    let right_table: Table = transition_table(right);
    let mut alphabet = left.alphabet();
    alphabet.extend(right.alphabet());

    let mut forward = BTreeMap::from([(left_start, right_start)]);
    let mut backward = BTreeMap::from([(right_start, left_start)]);
    let mut queue = VecDeque::from([(left_start, right_start)]);

    while let Some((l, r)) = queue.pop_front() {
        if left.is_final(l) != right.is_final(r) {
            return None;
        }

        for &symbol in &alphabet {
            let (l_next, r_next) = match (left_table.get(&(l, symbol)), right_table.get(&(r, symbol))) {
                (None, None) => continue,
                (Some(&l_next), Some(&r_next)) => (l_next, r_next),
                _ => return None,
            };

            match (forward.get(&l_next), backward.get(&r_next)) {
                (None, None) => {
                    forward.insert(l_next, r_next);
                    backward.insert(r_next, l_next);
                    queue.push_back((l_next, r_next));
                }
                (Some(&mapped), Some(&mapped_back)) if mapped == r_next && mapped_back == l_next => {}
                _ => return None,
            }
        }
    }

    Some(forward)
}
