//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::core::{Automaton, MachineKind, Point, StateId, Symbol, TransitionLabel};
use indexmap::IndexMap;

/// Builder for constructing automata with a fluent API, keyed by state
/// names.
///
/// States are created in the order they are first mentioned by
/// [`state`](Self::state), [`initial`](Self::initial) or
/// [`final_state`](Self::final_state). Transitions and outputs may only
/// refer to states mentioned that way.
///
/// # Example
///
/// ```rust
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::core::TransitionLabel;
///
/// let pda = AutomatonBuilder::pushdown()
///     .initial("push")
///     .state("pop")
///     .final_state("done")
///     .transition("push", "push", TransitionLabel::pushdown(Some('a'), None, "A"))
///     .transition("push", "pop", TransitionLabel::pushdown(Some('b'), Some('A'), ""))
///     .transition("pop", "pop", TransitionLabel::pushdown(Some('b'), Some('A'), ""))
///     .transition("pop", "done", TransitionLabel::pushdown(None, Some('Z'), "Z"))
///     .build()
///     .unwrap();
///
/// assert_eq!(pda.num_states(), 3);
/// assert_eq!(pda.find_state("done"), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    kind: MachineKind,
    states: IndexMap<String, Point>,
    duplicate: Option<String>,
    initial: Option<String>,
    finals: Vec<String>,
    transitions: Vec<(String, String, TransitionLabel)>,
    outputs: Vec<(String, String)>,
}

impl AutomatonBuilder {
    /// Create a builder for an automaton of `kind`.
    pub fn new(kind: MachineKind) -> Self {
        Self {
            kind,
            states: IndexMap::new(),
            duplicate: None,
            initial: None,
            finals: Vec::new(),
            transitions: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn finite() -> Self {
        Self::new(MachineKind::Finite)
    }

    pub fn pushdown() -> Self {
        Self::new(MachineKind::Pushdown)
    }

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

    /// Declare a state. Declaring the same name twice fails the build.
    pub fn state(self, name: impl Into<String>) -> Self {
        self.state_at(name, Point::default())
    }

    /// Declare a state at an editor position.
    pub fn state_at(mut self, name: impl Into<String>, position: Point) -> Self {
        let name = name.into();
        if self.states.contains_key(&name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.states.insert(name, position);
        }
        self
    }

    /// Set the initial state (required), declaring it if needed.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        let name = self.mention(name.into());
        self.initial = Some(name);
        self
    }

    /// Mark a state as final, declaring it if needed.
    pub fn final_state(mut self, name: impl Into<String>) -> Self {
        let name = self.mention(name.into());
        self.finals.push(name);
        self
    }

    /// Add a transition with an explicit label.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: TransitionLabel,
    ) -> Self {
        self.transitions.push((from.into(), to.into(), label));
        self
    }

    /// Finite automaton transition on `symbol`.
    pub fn on(self, from: impl Into<String>, symbol: Symbol, to: impl Into<String>) -> Self {
        self.transition(from, to, TransitionLabel::symbol(symbol))
    }

    /// Silent finite automaton transition.
    pub fn epsilon(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.transition(from, to, TransitionLabel::epsilon())
    }

    /// Moore output of a state.
    pub fn output(mut self, state: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.push((state.into(), output.into()));
        self
    }

    /// Build the automaton.
    /// Returns the first error found, checking declarations before
    /// transitions.
    pub fn build(self) -> Result<Automaton, BuildError> {
        if let Some(name) = self.duplicate {
            return Err(BuildError::DuplicateState(name));
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut automaton = Automaton::new(self.kind);
        let ids: IndexMap<String, StateId> = self
            .states
            .into_iter()
            .map(|(name, position)| {
                let id = automaton.create_named_state(name.clone(), position);
                (name, id)
            })
            .collect();
        let resolve = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| BuildError::UnknownState(name.to_string()))
        };

        automaton.set_initial(resolve(&initial)?)?;
        for name in &self.finals {
            automaton.add_final(resolve(name)?)?;
        }
        for (from, to, label) in self.transitions {
            automaton.add_transition(resolve(&from)?, resolve(&to)?, label)?;
        }
        for (state, output) in self.outputs {
            automaton.set_output(resolve(&state)?, output)?;
        }

        Ok(automaton)
    }

    fn mention(&mut self, name: String) -> String {
        if !self.states.contains_key(&name) {
            self.states.insert(name.clone(), Point::default());
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ModelError, Move, TransitionKind};

    #[test]
    fn builder_validates_required_fields() {
        let result = AutomatonBuilder::finite().state("q0").build();
        assert_eq!(result.unwrap_err(), BuildError::MissingInitialState);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let nfa = AutomatonBuilder::finite()
            .initial("q0")
            .state("q1")
            .final_state("q2")
            .on("q0", 'a', "q1")
            .epsilon("q1", "q2")
            .on("q0", 'b', "q0")
            .build()
            .unwrap();

        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.num_transitions(), 3);
        assert_eq!(nfa.initial_state(), nfa.find_state("q0"));
        assert!(nfa.is_final(2));
        assert_eq!(nfa.state(1).unwrap().name(), "q1");
    }

    #[test]
    fn undeclared_states_are_reported() {
        let result = AutomatonBuilder::finite()
            .initial("q0")
            .on("q0", 'a', "nowhere")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::UnknownState("nowhere".into()));
    }

    #[test]
    fn duplicate_declarations_are_reported() {
        let result = AutomatonBuilder::finite()
            .state("q0")
            .initial("q0")
            .state("q0")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::DuplicateState("q0".into()));
    }

    #[test]
    fn model_errors_pass_through() {
        let result = AutomatonBuilder::finite()
            .initial("q0")
            .transition("q0", "q0", TransitionLabel::mealy('a', "x"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::Model(ModelError::IncompatibleTransitionKind {
                expected: TransitionKind::Finite,
                found: TransitionKind::Mealy,
            })
        );

        let result = AutomatonBuilder::mealy()
            .initial("q0")
            .output("q0", "x")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::Model(ModelError::NotMoore));
    }

    #[test]
    fn builds_moore_and_turing_machines() {
        let moore = AutomatonBuilder::moore()
            .initial("even")
            .state("odd")
            .output("even", "0")
            .output("odd", "1")
            .transition("even", "odd", TransitionLabel::moore('1'))
            .transition("odd", "even", TransitionLabel::moore('1'))
            .build()
            .unwrap();
        assert_eq!(moore.output(1), Some("1"));

        let tm = AutomatonBuilder::turing(2)
            .initial("q")
            .transition("q", "q", TransitionLabel::block())
            .build()
            .unwrap();
        assert_eq!(tm.kind(), MachineKind::Turing { tapes: 2 });

        let wrong_tapes = AutomatonBuilder::turing(2)
            .initial("q")
            .transition("q", "q", TransitionLabel::turing('a', 'b', Move::Right))
            .build();
        assert_eq!(
            wrong_tapes.unwrap_err(),
            BuildError::Model(ModelError::TapeCountMismatch {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn positions_are_kept() {
        let automaton = AutomatonBuilder::finite()
            .state_at("q0", Point::new(1.0, 2.0))
            .initial("q0")
            .build()
            .unwrap();
        assert_eq!(automaton.state(0).unwrap().position(), Point::new(1.0, 2.0));
    }
}
