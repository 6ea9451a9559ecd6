//! The automaton model: states, typed transitions and a derived alphabet.
//!
//! This is the substrate every algorithm in the crate queries. It performs
//! no search of its own; its job is to keep the structural invariants:
//!
//! - every transition is of the automaton's declared kind,
//! - every transition joins two states of this automaton,
//! - initial, final and output markings only refer to existing states.

use super::error::ModelError;
use super::kind::{KindRules, MachineKind};
use super::state::{Point, State, StateId};
use super::transition::{Symbol, Transition, TransitionId, TransitionLabel};
use std::collections::{BTreeMap, BTreeSet};

/// A finite, pushdown, Turing, Mealy or Moore machine.
///
/// # Example
///
/// ```rust
/// use automata_lab::core::{Automaton, ModelError, Point, TransitionLabel};
///
/// let mut nfa = Automaton::finite();
/// let q0 = nfa.create_state(Point::default());
/// let q1 = nfa.create_state(Point::default());
/// nfa.set_initial(q0).unwrap();
/// nfa.add_final(q1).unwrap();
/// nfa.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
///
/// assert_eq!(nfa.transitions_from(q0).count(), 1);
/// assert!(matches!(
///     nfa.add_transition(q0, q1, TransitionLabel::mealy('a', "x")),
///     Err(ModelError::IncompatibleTransitionKind { .. })
/// ));
/// ```
#[derive(Clone, Debug)]
pub struct Automaton {
    kind: MachineKind,
    rules: KindRules,
    states: BTreeMap<StateId, State>,
    transitions: BTreeMap<TransitionId, Transition>,
    initial: Option<StateId>,
    finals: BTreeSet<StateId>,
    outputs: BTreeMap<StateId, String>,
    next_state: StateId,
    next_transition: TransitionId,
}

impl Automaton {
    /// Create an empty automaton of the given kind.
    pub fn new(kind: MachineKind) -> Self {
        Self {
            kind,
            rules: kind.rules(),
            states: BTreeMap::new(),
            transitions: BTreeMap::new(),
            initial: None,
            finals: BTreeSet::new(),
            outputs: BTreeMap::new(),
            next_state: 0,
            next_transition: 0,
        }
    }

    pub fn finite() -> Self {
        Self::new(MachineKind::Finite)
    }

    pub fn pushdown() -> Self {
        Self::new(MachineKind::Pushdown)
    }

    /// Create a Turing machine with `tapes` tapes (at least one).
    pub fn turing(tapes: usize) -> Self {
        Self::new(MachineKind::Turing {
            tapes: tapes.max(1),
        })
    }

    pub fn mealy() -> Self {
        Self::new(MachineKind::Mealy)
    }

    pub fn moore() -> Self {
        Self::new(MachineKind::Moore)
    }

    pub fn kind(&self) -> MachineKind {
        self.kind
    }

    // ---- states ----

    /// Create a new state named `q<id>` at `position`.
    pub fn create_state(&mut self, position: Point) -> StateId {
        let id = self.next_state;
        self.create_named_state(format!("q{id}"), position)
    }

    /// Create a new state with an explicit display name.
    pub fn create_named_state(&mut self, name: impl Into<String>, position: Point) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        self.states.insert(id, State::new(id, name.into(), position));
        id
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    /// All states in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.values()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.keys().copied()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Look a state up by display name. Names are not required to be
    /// unique; the lowest id wins.
    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states
            .values()
            .find(|state| state.name() == name)
            .map(State::id)
    }

    pub fn rename_state(&mut self, id: StateId, name: impl Into<String>) -> Result<(), ModelError> {
        self.state_mut(id)?.set_name(name.into());
        Ok(())
    }

    pub fn set_state_label(&mut self, id: StateId, label: Option<String>) -> Result<(), ModelError> {
        self.state_mut(id)?.set_label(label);
        Ok(())
    }

    /// Remove a state together with every transition touching it.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, ModelError> {
        let state = self.states.remove(&id).ok_or(ModelError::ForeignState(id))?;
        self.transitions
            .retain(|_, transition| transition.from() != id && transition.to() != id);
        self.finals.remove(&id);
        self.outputs.remove(&id);
        if self.initial == Some(id) {
            self.initial = None;
        }
        Ok(state)
    }

    fn state_mut(&mut self, id: StateId) -> Result<&mut State, ModelError> {
        self.states.get_mut(&id).ok_or(ModelError::ForeignState(id))
    }

    fn require_state(&self, id: StateId) -> Result<(), ModelError> {
        if self.contains_state(id) {
            Ok(())
        } else {
            Err(ModelError::ForeignState(id))
        }
    }

    // ---- initial / final ----

    pub fn set_initial(&mut self, id: StateId) -> Result<(), ModelError> {
        self.require_state(id)?;
        self.initial = Some(id);
        Ok(())
    }

    pub fn clear_initial(&mut self) {
        self.initial = None;
    }

    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    pub fn add_final(&mut self, id: StateId) -> Result<(), ModelError> {
        self.require_state(id)?;
        self.finals.insert(id);
        Ok(())
    }

    /// Unmark a final state. Returns whether it was final.
    pub fn remove_final(&mut self, id: StateId) -> bool {
        self.finals.remove(&id)
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    // ---- Moore outputs ----

    /// Attach the output a Moore machine emits on entering `id`.
    pub fn set_output(&mut self, id: StateId, output: impl Into<String>) -> Result<(), ModelError> {
        if self.kind != MachineKind::Moore {
            return Err(ModelError::NotMoore);
        }
        self.require_state(id)?;
        self.outputs.insert(id, output.into());
        Ok(())
    }

    /// Moore output of a state; `None` for other kinds or unset outputs.
    pub fn output(&self, id: StateId) -> Option<&str> {
        self.outputs.get(&id).map(String::as_str)
    }

    // ---- transitions ----

    /// Add a transition between two states of this automaton.
    ///
    /// Adding a transition identical to an existing one (same endpoints,
    /// same label) returns the existing id.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
        label: TransitionLabel,
    ) -> Result<TransitionId, ModelError> {
        let expected = self.kind.transition_kind();
        if label.kind() != expected {
            return Err(ModelError::IncompatibleTransitionKind {
                expected,
                found: label.kind(),
            });
        }
        if let (MachineKind::Turing { tapes }, Some(found)) = (self.kind, label.tape_count()) {
            if tapes != found {
                return Err(ModelError::TapeCountMismatch {
                    expected: tapes,
                    found,
                });
            }
        }
        self.require_state(from)?;
        self.require_state(to)?;

        if let Some(existing) = self
            .transitions_between(from, to)
            .find(|transition| *transition.label() == label)
        {
            return Ok(existing.id());
        }

        let id = self.next_transition;
        self.next_transition += 1;
        self.transitions
            .insert(id, Transition::new(id, from, to, label));
        Ok(id)
    }

    pub fn remove_transition(&mut self, id: TransitionId) -> Result<Transition, ModelError> {
        self.transitions
            .remove(&id)
            .ok_or(ModelError::UnknownTransition(id))
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(&id)
    }

    /// All transitions in ascending id order.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.values()
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn transitions_from(&self, from: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .values()
            .filter(move |transition| transition.from() == from)
    }

    pub fn transitions_into(&self, to: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .values()
            .filter(move |transition| transition.to() == to)
    }

    pub fn transitions_between(
        &self,
        from: StateId,
        to: StateId,
    ) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .values()
            .filter(move |transition| transition.from() == from && transition.to() == to)
    }

    /// Distinct trigger symbols of all transitions, silent moves excluded.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.transitions
            .values()
            .flat_map(|transition| transition.label().trigger_symbols())
            .collect()
    }

    /// Whether the transition can be taken without consuming input.
    pub fn is_silent(&self, transition: &Transition) -> bool {
        (self.rules.is_silent)(transition.label())
    }

    /// Whether two transitions leaving the same state compete for input.
    pub(crate) fn overlaps(&self, a: &Transition, b: &Transition) -> bool {
        (self.rules.overlaps)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transition::{Move, TapeOp};

    fn two_states(automaton: &mut Automaton) -> (StateId, StateId) {
        (
            automaton.create_state(Point::default()),
            automaton.create_state(Point::default()),
        )
    }

    #[test]
    fn create_state_assigns_fresh_ids() {
        let mut automaton = Automaton::finite();
        let (q0, q1) = two_states(&mut automaton);
        automaton.remove_state(q1).unwrap();
        let q2 = automaton.create_state(Point::default());

        assert_eq!(q0, 0);
        assert_eq!(q2, 2);
        assert_eq!(automaton.state(q2).unwrap().name(), "q2");
        assert_eq!(automaton.num_states(), 2);
    }

    #[test]
    fn rejects_transition_of_wrong_kind() {
        let mut automaton = Automaton::pushdown();
        let (q0, q1) = two_states(&mut automaton);

        let result = automaton.add_transition(q0, q1, TransitionLabel::symbol('a'));
        assert_eq!(
            result,
            Err(ModelError::IncompatibleTransitionKind {
                expected: crate::core::TransitionKind::Pushdown,
                found: crate::core::TransitionKind::Finite,
            })
        );
        assert_eq!(automaton.num_transitions(), 0);
    }

    #[test]
    fn rejects_foreign_states() {
        let mut automaton = Automaton::finite();
        let (q0, _) = two_states(&mut automaton);

        assert_eq!(
            automaton.add_transition(q0, 42, TransitionLabel::symbol('a')),
            Err(ModelError::ForeignState(42))
        );
        assert_eq!(automaton.set_initial(7), Err(ModelError::ForeignState(7)));
        assert_eq!(automaton.add_final(9), Err(ModelError::ForeignState(9)));
    }

    #[test]
    fn rejects_wrong_tape_count() {
        let mut automaton = Automaton::turing(2);
        let (q0, q1) = two_states(&mut automaton);

        let result = automaton.add_transition(q0, q1, TransitionLabel::turing('a', 'b', Move::Right));
        assert_eq!(
            result,
            Err(ModelError::TapeCountMismatch {
                expected: 2,
                found: 1
            })
        );

        let ok = automaton.add_transition(
            q0,
            q1,
            TransitionLabel::turing_tapes(vec![
                TapeOp::new('a', 'b', Move::Right),
                TapeOp::new('□', '□', Move::Stay),
            ]),
        );
        assert!(ok.is_ok());
        assert!(automaton.add_transition(q1, q0, TransitionLabel::block()).is_ok());
    }

    #[test]
    fn duplicate_transition_is_not_added_twice() {
        let mut automaton = Automaton::finite();
        let (q0, q1) = two_states(&mut automaton);

        let first = automaton.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
        let second = automaton.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
        assert_eq!(first, second);
        assert_eq!(automaton.num_transitions(), 1);
    }

    #[test]
    fn remove_state_removes_incident_transitions() {
        let mut automaton = Automaton::finite();
        let (q0, q1) = two_states(&mut automaton);
        let q2 = automaton.create_state(Point::default());
        automaton.set_initial(q1).unwrap();
        automaton.add_final(q1).unwrap();
        automaton.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
        automaton.add_transition(q1, q2, TransitionLabel::symbol('b')).unwrap();
        automaton.add_transition(q0, q2, TransitionLabel::symbol('c')).unwrap();

        automaton.remove_state(q1).unwrap();

        assert_eq!(automaton.num_transitions(), 1);
        assert!(automaton.transitions().all(|t| t.from() != q1 && t.to() != q1));
        assert_eq!(automaton.initial_state(), None);
        assert!(automaton.final_states().is_empty());
        assert_eq!(automaton.remove_state(q1), Err(ModelError::ForeignState(q1)));
    }

    #[test]
    fn transition_queries() {
        let mut automaton = Automaton::finite();
        let (q0, q1) = two_states(&mut automaton);
        automaton.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();
        automaton.add_transition(q0, q1, TransitionLabel::epsilon()).unwrap();
        automaton.add_transition(q0, q0, TransitionLabel::symbol('b')).unwrap();
        automaton.add_transition(q1, q0, TransitionLabel::symbol('c')).unwrap();

        assert_eq!(automaton.transitions_from(q0).count(), 3);
        assert_eq!(automaton.transitions_between(q0, q1).count(), 2);
        assert_eq!(automaton.transitions_into(q0).count(), 2);
        assert_eq!(
            automaton.alphabet().into_iter().collect::<Vec<_>>(),
            vec!['a', 'b', 'c']
        );
    }

    #[test]
    fn silent_classification_follows_kind() {
        let mut automaton = Automaton::finite();
        let (q0, q1) = two_states(&mut automaton);
        let eps = automaton.add_transition(q0, q1, TransitionLabel::epsilon()).unwrap();
        let sym = automaton.add_transition(q0, q1, TransitionLabel::symbol('a')).unwrap();

        assert!(automaton.is_silent(automaton.transition(eps).unwrap()));
        assert!(!automaton.is_silent(automaton.transition(sym).unwrap()));
    }

    #[test]
    fn moore_outputs_are_state_properties() {
        let mut moore = Automaton::moore();
        let (q0, _) = two_states(&mut moore);
        moore.set_output(q0, "1").unwrap();
        assert_eq!(moore.output(q0), Some("1"));
        assert_eq!(moore.set_output(99, "x"), Err(ModelError::ForeignState(99)));

        let mut dfa = Automaton::finite();
        let (p0, _) = two_states(&mut dfa);
        assert_eq!(dfa.set_output(p0, "1"), Err(ModelError::NotMoore));
    }

    #[test]
    fn find_and_rename_state() {
        let mut automaton = Automaton::finite();
        let start = automaton.create_named_state("start", Point::default());
        assert_eq!(automaton.find_state("start"), Some(start));

        automaton.rename_state(start, "begin").unwrap();
        automaton.set_state_label(start, Some("entry".to_string())).unwrap();
        assert_eq!(automaton.find_state("start"), None);
        assert_eq!(automaton.find_state("begin"), Some(start));
        assert_eq!(automaton.state(start).unwrap().label(), Some("entry"));
    }
}
