//! DFA minimization by partition refinement.

use super::error::ConversionError;
use super::subset::{centroid, convert_to_dfa, require_finite, subset_label};
use crate::analysis::{is_deterministic, unreachable_states, useless_states};
use crate::core::{Automaton, Point, StateId, StateSet, Symbol, TransitionLabel};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Deterministic transition table: `(state, symbol) -> target`.
pub(super) type Table = BTreeMap<(StateId, Symbol), StateId>;

pub(super) fn transition_table(dfa: &Automaton) -> Table {
    dfa.transitions()
        .filter_map(|transition| {
            transition
                .input()
                .map(|symbol| ((transition.from(), symbol), transition.to()))
        })
        .collect()
}

/// Add a trap state so every state has a transition on every symbol of
/// `alphabet`.
///
/// Returns the trap state, or `None` if the automaton was already
/// complete and nothing was added.
pub fn complete_with_trap(
    dfa: &mut Automaton,
    alphabet: &BTreeSet<Symbol>,
) -> Result<Option<StateId>, ConversionError> {
    require_finite(dfa)?;

    let table = transition_table(dfa);
    let missing: Vec<(StateId, Symbol)> = dfa
        .state_ids()
        .flat_map(|state| alphabet.iter().map(move |&symbol| (state, symbol)))
        .filter(|key| !table.contains_key(key))
        .collect();
    if missing.is_empty() {
        return Ok(None);
    }

    let trap = dfa.create_state(Point::default());
    dfa.set_state_label(trap, Some("trap".to_string()))?;
    for (state, symbol) in missing {
        dfa.add_transition(state, trap, TransitionLabel::symbol(symbol))?;
    }
    for &symbol in alphabet {
        dfa.add_transition(trap, trap, TransitionLabel::symbol(symbol))?;
    }
    Ok(Some(trap))
}

/// Minimize a finite automaton.
///
/// Nondeterministic input is determinized first. Unreachable states are
/// dropped, the automaton is completed with a trap state, and blocks of
/// the `{final, non-final}` partition are split by where their states go
/// on each symbol until nothing changes. The quotient keeps one state per
/// block; the dead block is dropped again unless it is the initial one,
/// in which case only its transitions go.
///
/// The input is never modified. Minimizing a minimal DFA yields an
/// isomorphic DFA.
///
/// # Example
///
/// ```rust
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::conversion::minimize;
///
/// // Two redundant accepting states for "a" and "b".
/// let dfa = AutomatonBuilder::finite()
///     .initial("s")
///     .final_state("x")
///     .final_state("y")
///     .on("s", 'a', "x")
///     .on("s", 'b', "y")
///     .build()
///     .unwrap();
///
/// let minimal = minimize(&dfa).unwrap();
/// assert_eq!(minimal.num_states(), 2);
/// ```
pub fn minimize(dfa: &Automaton) -> Result<Automaton, ConversionError> {
    require_finite(dfa)?;

    let mut work = if is_deterministic(dfa) {
        dfa.clone()
    } else {
        debug!("Determinizing before minimization");
        convert_to_dfa(dfa)?
    };

    let Some(initial) = work.initial_state() else {
        // Empty language: a lone non-final start state.
        let mut empty = Automaton::finite();
        let start = empty.create_state(Point::default());
        empty.set_initial(start)?;
        return Ok(empty);
    };

    for state in unreachable_states(&work).iter() {
        work.remove_state(state)?;
    }
    let alphabet = work.alphabet();
    complete_with_trap(&mut work, &alphabet)?;

    let block_of = refine(&work, &alphabet);
    let quotient = build_quotient(&work, &block_of, initial, &alphabet)?;

    debug!(
        before = dfa.num_states(),
        after = quotient.num_states(),
        "Minimization finished"
    );
    Ok(quotient)
}

/// Refine `{final, non-final}` until every block is stable.
///
/// Block ids are assigned in order of the lowest state id of each block,
/// so the result does not depend on iteration accidents.
fn refine(dfa: &Automaton, alphabet: &BTreeSet<Symbol>) -> BTreeMap<StateId, usize> {
    let table = transition_table(dfa);
    let mut block_of: BTreeMap<StateId, usize> = BTreeMap::new();
    let mut blocks = renumber(dfa.state_ids().map(|state| (state, dfa.is_final(state))), &mut block_of);

    let mut rounds = 0;
    loop {
        rounds += 1;
        let signatures = dfa.state_ids().map(|state| {
            let targets: Vec<Option<usize>> = alphabet
                .iter()
                .map(|&symbol| {
                    table
                        .get(&(state, symbol))
                        .and_then(|target| block_of.get(target).copied())
                })
                .collect();
            (state, (block_of.get(&state).copied(), targets))
        });

        let mut next = BTreeMap::new();
        let refined = renumber(signatures, &mut next);
        block_of = next;
        if refined == blocks {
            break;
        }
        blocks = refined;
    }

    debug!(blocks, rounds, "Partition refinement stable");
    block_of
}

/// Give equal keys the same block id, numbered by first appearance.
/// Returns the number of blocks.
fn renumber<K: Ord>(
    keyed: impl Iterator<Item = (StateId, K)>,
    block_of: &mut BTreeMap<StateId, usize>,
) -> usize {
    let mut ids: BTreeMap<K, usize> = BTreeMap::new();
    for (state, key) in keyed {
        let next = ids.len();
        let block = *ids.entry(key).or_insert(next);
        block_of.insert(state, block);
    }
    ids.len()
}

fn build_quotient(
    dfa: &Automaton,
    block_of: &BTreeMap<StateId, usize>,
    initial: StateId,
    alphabet: &BTreeSet<Symbol>,
) -> Result<Automaton, ConversionError> {
    let mut members: BTreeMap<usize, StateSet> = BTreeMap::new();
    for (&state, &block) in block_of {
        members.entry(block).or_default().insert(state);
    }

    let mut quotient = Automaton::finite();
    let mut state_of_block = BTreeMap::new();
    for (&block, states) in &members {
        let state = quotient.create_state(centroid(dfa, states));
        quotient.set_state_label(state, Some(subset_label(dfa, states)))?;
        if states.iter().any(|member| dfa.is_final(member)) {
            quotient.add_final(state)?;
        }
        state_of_block.insert(block, state);
    }

    let table = transition_table(dfa);
    for (&block, states) in &members {
        let Some(representative) = states.iter().next() else {
            continue;
        };
        for &symbol in alphabet {
            let target = table
                .get(&(representative, symbol))
                .and_then(|target| block_of.get(target))
                .and_then(|block| state_of_block.get(block));
            if let (Some(&from), Some(&to)) = (state_of_block.get(&block), target) {
                quotient.add_transition(from, to, TransitionLabel::symbol(symbol))?;
            }
        }
    }

    let start = block_of
        .get(&initial)
        .and_then(|block| state_of_block.get(block))
        .copied();
    if let Some(start) = start {
        quotient.set_initial(start)?;
    }

    for dead in useless_states(&quotient).iter() {
        if Some(dead) == start {
            // A dead start block keeps its state but none of its loops.
            let loops: Vec<_> = quotient.transitions_from(dead).map(|t| t.id()).collect();
            for transition in loops {
                quotient.remove_transition(transition)?;
            }
        } else {
            quotient.remove_state(dead)?;
        }
    }
    Ok(quotient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::detect_nondeterminism;
    use crate::conversion::are_isomorphic;
    use crate::simulation::{accepts, SimulationConfig};

    fn dfa(transitions: &[(StateId, Symbol, StateId)], states: usize, finals: &[StateId]) -> Automaton {
        let mut dfa = Automaton::finite();
        for _ in 0..states {
            dfa.create_state(Point::default());
        }
        for &(from, symbol, to) in transitions {
            dfa.add_transition(from, to, TransitionLabel::symbol(symbol)).unwrap();
        }
        for &state in finals {
            dfa.add_final(state).unwrap();
        }
        dfa.set_initial(0).unwrap();
        dfa
    }

    #[test]
    fn complete_with_trap_fills_gaps() {
        let mut d = dfa(&[(0, 'a', 1)], 2, &[1]);
        let alphabet = BTreeSet::from(['a', 'b']);

        let trap = complete_with_trap(&mut d, &alphabet).unwrap().unwrap();
        assert_eq!(d.num_states(), 3);
        assert_eq!(d.num_transitions(), 6);
        assert!(detect_nondeterminism(&d).is_empty());
        assert_eq!(d.transitions_from(trap).count(), 2);

        assert_eq!(complete_with_trap(&mut d, &alphabet).unwrap(), None);
    }

    #[test]
    fn test_dfa_minimization() {
        // 0 -a-> 1, 0 -b-> 2, 1 -a-> 3, 2 -a-> 3, 3 final.
        // 1 and 2 are equivalent.
        let d = dfa(&[(0, 'a', 1), (0, 'b', 2), (1, 'a', 3), (2, 'a', 3)], 4, &[3]);
        let minimal = minimize(&d).unwrap();

        assert_eq!(minimal.num_states(), 3);
        assert_eq!(minimal.final_states().len(), 1);
        for word in ["aa", "ba"] {
            assert!(accepts(&minimal, word, &SimulationConfig::default()).unwrap());
        }
        for word in ["a", "ab", "aaa", ""] {
            assert!(!accepts(&minimal, word, &SimulationConfig::default()).unwrap());
        }
    }

    #[test]
    fn unreachable_states_are_dropped() {
        let d = dfa(&[(0, 'a', 0), (1, 'a', 0)], 2, &[0, 1]);
        let minimal = minimize(&d).unwrap();
        assert_eq!(minimal.num_states(), 1);
        assert!(minimal.is_final(minimal.initial_state().unwrap()));
    }

    #[test]
    fn empty_language_keeps_initial_block() {
        let d = dfa(&[(0, 'a', 1), (1, 'b', 0)], 2, &[]);
        let minimal = minimize(&d).unwrap();
        assert_eq!(minimal.num_states(), 1);
        assert_eq!(minimal.num_transitions(), 0);
        assert!(minimal.final_states().is_empty());
    }

    #[test]
    fn minimize_determinizes_first() {
        let mut n = dfa(&[(0, 'a', 1), (0, 'a', 2)], 3, &[1, 2]);
        n.add_transition(1, 2, TransitionLabel::epsilon()).unwrap();
        let minimal = minimize(&n).unwrap();
        assert!(is_deterministic(&minimal));
        assert_eq!(minimal.num_states(), 2);
    }

    #[test]
    fn minimize_is_idempotent() {
        let d = dfa(
            &[(0, 'a', 1), (0, 'b', 2), (1, 'a', 3), (2, 'a', 3), (3, 'b', 0)],
            4,
            &[3],
        );
        let once = minimize(&d).unwrap();
        let twice = minimize(&once).unwrap();
        assert!(are_isomorphic(&once, &twice));
        assert!(!are_isomorphic(&d, &once));
    }

    #[test]
    fn input_is_not_mutated() {
        let d = dfa(&[(0, 'a', 1)], 3, &[1]);
        let before = d.clone();
        minimize(&d).unwrap();
        assert_eq!(d.num_states(), before.num_states());
        assert_eq!(d.num_transitions(), before.num_transitions());
    }
}
