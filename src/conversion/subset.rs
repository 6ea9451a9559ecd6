//! Subset construction algorithm for converting NFAs with silent moves to DFAs.

use super::error::ConversionError;
use crate::analysis::{closure, closure_of};
use crate::core::{Automaton, MachineKind, Point, StateId, StateSet, Symbol, TransitionLabel};
use indexmap::IndexMap;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// A DFA together with the NFA states behind each of its states.
#[derive(Debug, Clone)]
pub struct SubsetDfa {
    pub automaton: Automaton,
    /// DFA state to the set of NFA states it stands for.
    pub subsets: BTreeMap<StateId, StateSet>,
}

/// Convert a finite automaton to an equivalent DFA using the powerset
/// construction.
///
/// The DFA start state is the closure of the NFA initial state. Every
/// discovered subset gets one DFA state, found by content, and is final
/// iff it contains an NFA final state. Empty subsets produce no
/// transition, so the result may be partial. Each DFA state is labelled
/// with the names of the NFA states it represents.
///
/// An NFA without an initial state accepts nothing; its DFA is a single
/// non-final start state.
pub fn subset_construction(nfa: &Automaton) -> Result<SubsetDfa, ConversionError> {
    require_finite(nfa)?;

    let mut dfa = Automaton::finite();
    let mut state_mapping: IndexMap<StateSet, StateId> = IndexMap::new();

    let Some(initial) = nfa.initial_state() else {
        let start = dfa.create_state(Point::default());
        dfa.set_initial(start)?;
        dfa.set_state_label(start, Some(subset_label(nfa, &StateSet::new())))?;
        return Ok(SubsetDfa {
            automaton: dfa,
            subsets: BTreeMap::from([(start, StateSet::new())]),
        });
    };

    let alphabet = nfa.alphabet();
    let initial_set = closure(nfa, initial);
    let start = add_subset_state(nfa, &mut dfa, &initial_set)?;
    dfa.set_initial(start)?;
    state_mapping.insert(initial_set.clone(), start);

    let mut worklist = VecDeque::from([initial_set]);
    while let Some(current_set) = worklist.pop_front() {
        let Some(&current) = state_mapping.get(&current_set) else {
            continue;
        };

        for &symbol in &alphabet {
            let next_set = closure_of(nfa, &move_on_symbol(nfa, &current_set, symbol));
            if next_set.is_empty() {
                continue;
            }

            let next = match state_mapping.get(&next_set) {
                Some(&existing) => existing,
                None => {
                    let created = add_subset_state(nfa, &mut dfa, &next_set)?;
                    state_mapping.insert(next_set.clone(), created);
                    worklist.push_back(next_set);
                    created
                }
            };
            dfa.add_transition(current, next, TransitionLabel::symbol(symbol))?;
        }
    }

    debug!(
        nfa_states = nfa.num_states(),
        dfa_states = dfa.num_states(),
        "Subset construction finished"
    );

    let subsets = state_mapping
        .into_iter()
        .map(|(subset, state)| (state, subset))
        .collect();
    Ok(SubsetDfa {
        automaton: dfa,
        subsets,
    })
}

/// Convert a finite automaton to an equivalent DFA.
///
/// # Example
///
/// ```rust
/// use automata_lab::analysis::is_deterministic;
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::conversion::convert_to_dfa;
///
/// let nfa = AutomatonBuilder::finite()
///     .initial("q0")
///     .state("q1")
///     .final_state("q2")
///     .on("q0", 'a', "q1")
///     .epsilon("q1", "q2")
///     .on("q0", 'b', "q0")
///     .build()
///     .unwrap();
///
/// let dfa = convert_to_dfa(&nfa).unwrap();
/// assert!(is_deterministic(&dfa));
/// assert_eq!(dfa.num_states(), 2);
/// ```
pub fn convert_to_dfa(nfa: &Automaton) -> Result<Automaton, ConversionError> {
    subset_construction(nfa).map(|subset| subset.automaton)
}

pub(super) fn require_finite(automaton: &Automaton) -> Result<(), ConversionError> {
    match automaton.kind() {
        MachineKind::Finite => Ok(()),
        other => Err(ConversionError::NotFiniteAutomaton(other)),
    }
}

/// `{q0,q1}` style label listing the names of `members`.
pub(super) fn subset_label(automaton: &Automaton, members: &StateSet) -> String {
    let names: Vec<&str> = members
        .iter()
        .filter_map(|id| automaton.state(id).map(|state| state.name()))
        .collect();
    format!("{{{}}}", names.join(","))
}

/// Targets of `symbol` transitions out of any state in `states`.
fn move_on_symbol(nfa: &Automaton, states: &StateSet, symbol: Symbol) -> StateSet {
    states
        .iter()
        .flat_map(|state| nfa.transitions_from(state))
        .filter(|transition| transition.input() == Some(symbol))
        .map(|transition| transition.to())
        .collect()
}

fn add_subset_state(
    nfa: &Automaton,
    dfa: &mut Automaton,
    subset: &StateSet,
) -> Result<StateId, ConversionError> {
    let state = dfa.create_state(centroid(nfa, subset));
    dfa.set_state_label(state, Some(subset_label(nfa, subset)))?;
    if subset.intersects(nfa.final_states()) {
        dfa.add_final(state)?;
    }
    Ok(state)
}

/// Mean position of the member states, so layouts stay readable.
pub(super) fn centroid(automaton: &Automaton, members: &StateSet) -> Point {
    let positions: Vec<Point> = members
        .iter()
        .filter_map(|id| automaton.state(id).map(|state| state.position()))
        .collect();
    if positions.is_empty() {
        return Point::default();
    }
    let n = positions.len() as f64;
    Point::new(
        positions.iter().map(|p| p.x).sum::<f64>() / n,
        positions.iter().map(|p| p.y).sum::<f64>() / n,
    )
}
