//! Per-kind successor and acceptance functions.
//!
//! The simulator is generic over machine kinds; everything kind-specific
//! is concentrated in [`StepRules`], resolved once per simulation.

use super::config::{PushdownAcceptance, SimulationConfig, TuringAcceptance};
use super::configuration::{ConfigId, Configuration, Tape};
use crate::analysis::{closure, closure_of};
use crate::core::{Automaton, MachineKind, StateId, StateSet, Symbol, TransitionLabel, TuringLabel};
use std::fmt;

/// Kind-specific behavior of a simulation, resolved once from the
/// automaton's [`MachineKind`].
#[derive(Clone, Copy)]
pub(crate) struct StepRules {
    /// Root configurations for a run starting in the given state.
    pub(crate) initial: fn(&Automaton, StateId, &[Symbol], &SimulationConfig) -> Vec<Configuration>,
    /// Every configuration reachable in one step from the one stored at
    /// the given id.
    pub(crate) successors: fn(&Automaton, &[Symbol], ConfigId, &Configuration) -> Vec<Configuration>,
    /// Accepting regardless of successors.
    pub(crate) is_accept: fn(&Automaton, &[Symbol], &SimulationConfig, &Configuration) -> bool,
    /// Whether a configuration without successors counts as accepted.
    pub(crate) accepts_on_halt: fn(&SimulationConfig) -> bool,
}

impl fmt::Debug for StepRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRules").finish_non_exhaustive()
    }
}

impl StepRules {
    pub(crate) fn for_kind(kind: MachineKind) -> Self {
        match kind {
            MachineKind::Finite => Self {
                initial: finite_initial,
                successors: finite_successors,
                is_accept: finite_accept,
                accepts_on_halt: never_on_halt,
            },
            MachineKind::Pushdown => Self {
                initial: pushdown_initial,
                successors: pushdown_successors,
                is_accept: pushdown_accept,
                accepts_on_halt: never_on_halt,
            },
            MachineKind::Turing { .. } => Self {
                initial: turing_initial,
                successors: turing_successors,
                is_accept: turing_accept,
                accepts_on_halt: turing_on_halt,
            },
            MachineKind::Mealy => Self {
                initial: mealy_initial,
                successors: transducer_successors,
                is_accept: transducer_accept,
                accepts_on_halt: never_on_halt,
            },
            MachineKind::Moore => Self {
                initial: moore_initial,
                successors: transducer_successors,
                is_accept: transducer_accept,
                accepts_on_halt: never_on_halt,
            },
        }
    }
}

// Finite automata start in every state of the initial closure; all other
// kinds start with a single configuration.

fn finite_initial(
    automaton: &Automaton,
    initial: StateId,
    _input: &[Symbol],
    _config: &SimulationConfig,
) -> Vec<Configuration> {
    closure(automaton, initial)
        .iter()
        .map(Configuration::root)
        .collect()
}

fn pushdown_initial(
    _automaton: &Automaton,
    initial: StateId,
    _input: &[Symbol],
    config: &SimulationConfig,
) -> Vec<Configuration> {
    vec![Configuration::root(initial).with_stack(config.initial_stack_symbol.into_iter().collect())]
}

fn turing_initial(
    automaton: &Automaton,
    initial: StateId,
    input: &[Symbol],
    _config: &SimulationConfig,
) -> Vec<Configuration> {
    let tapes = automaton.kind().tapes();
    let mut all = vec![Tape::new(input)];
    all.extend((1..tapes).map(|_| Tape::blank()));
    vec![Configuration::root(initial).with_tapes(all)]
}

fn mealy_initial(
    _automaton: &Automaton,
    initial: StateId,
    _input: &[Symbol],
    _config: &SimulationConfig,
) -> Vec<Configuration> {
    vec![Configuration::root(initial)]
}

fn moore_initial(
    automaton: &Automaton,
    initial: StateId,
    _input: &[Symbol],
    _config: &SimulationConfig,
) -> Vec<Configuration> {
    let output = automaton.output(initial).unwrap_or_default().to_string();
    vec![Configuration::root(initial).with_output(output)]
}

fn finite_accept(
    automaton: &Automaton,
    input: &[Symbol],
    _config: &SimulationConfig,
    current: &Configuration,
) -> bool {
    current.consumed() >= input.len() && automaton.is_final(current.state())
}

fn pushdown_accept(
    automaton: &Automaton,
    input: &[Symbol],
    config: &SimulationConfig,
    current: &Configuration,
) -> bool {
    let is_final = automaton.is_final(current.state());
    current.consumed() >= input.len()
        && match config.pushdown_acceptance {
            PushdownAcceptance::FinalState => is_final,
            PushdownAcceptance::EmptyStack => current.stack().is_empty(),
            PushdownAcceptance::Both => is_final && current.stack().is_empty(),
        }
}

/// Acceptance by halting can only be decided once the successors are
/// known; see [`turing_on_halt`].
fn turing_accept(
    automaton: &Automaton,
    _input: &[Symbol],
    config: &SimulationConfig,
    current: &Configuration,
) -> bool {
    match config.turing_acceptance {
        TuringAcceptance::FinalState | TuringAcceptance::Either => {
            automaton.is_final(current.state())
        }
        TuringAcceptance::Halting => false,
    }
}

fn transducer_accept(
    _automaton: &Automaton,
    input: &[Symbol],
    _config: &SimulationConfig,
    current: &Configuration,
) -> bool {
    current.consumed() >= input.len()
}

fn turing_on_halt(config: &SimulationConfig) -> bool {
    matches!(
        config.turing_acceptance,
        TuringAcceptance::Halting | TuringAcceptance::Either
    )
}

fn never_on_halt(_config: &SimulationConfig) -> bool {
    false
}

// A finite step consumes one input symbol and lands in every state of the
// closure of the targets. Pushdown and Turing machines take exactly one
// transition per step, silent or not. Transducers consume one symbol per
// step.

fn finite_successors(
    automaton: &Automaton,
    input: &[Symbol],
    id: ConfigId,
    current: &Configuration,
) -> Vec<Configuration> {
    let Some(&symbol) = current.remaining(input).first() else {
        return Vec::new();
    };

    let targets: StateSet = automaton
        .transitions_from(current.state())
        .filter(|t| matches!(t.label(), TransitionLabel::Finite { input: Some(s) } if *s == symbol))
        .map(|t| t.to())
        .collect();

    closure_of(automaton, &targets)
        .iter()
        .map(|state| current.successor(id, state).consume(1))
        .collect()
}

fn pushdown_successors(
    automaton: &Automaton,
    input: &[Symbol],
    id: ConfigId,
    current: &Configuration,
) -> Vec<Configuration> {
    let next_symbol = current.remaining(input).first().copied();
    let mut successors = Vec::new();

    for transition in automaton.transitions_from(current.state()) {
        let TransitionLabel::Pushdown { input: read, pop, push } = transition.label() else {
            continue;
        };
        if read.is_some() && *read != next_symbol {
            continue;
        }
        if pop.is_some() && *pop != current.stack_top() {
            continue;
        }

        let mut next = current.successor(id, transition.to());
        if read.is_some() {
            next = next.consume(1);
        }
        let stack = next.stack_mut();
        if pop.is_some() {
            stack.pop();
        }
        stack.extend(push.iter().rev());
        successors.push(next);
    }

    successors
}

fn turing_successors(
    automaton: &Automaton,
    _input: &[Symbol],
    id: ConfigId,
    current: &Configuration,
) -> Vec<Configuration> {
    let mut successors = Vec::new();

    for transition in automaton.transitions_from(current.state()) {
        match transition.label() {
            TransitionLabel::Turing(TuringLabel::Block) => {
                successors.push(current.successor(id, transition.to()));
            }
            TransitionLabel::Turing(TuringLabel::Tapes(ops)) => {
                let tapes = current.tapes();
                let matches = ops.len() == tapes.len()
                    && ops.iter().zip(tapes).all(|(op, tape)| op.read == tape.read());
                if !matches {
                    continue;
                }
                let mut next = current.successor(id, transition.to());
                let written: Vec<Tape> = ops.iter().zip(tapes).map(|(op, tape)| tape.apply(op)).collect();
                *next.tapes_mut() = written;
                successors.push(next);
            }
            _ => {}
        }
    }

    successors
}

fn transducer_successors(
    automaton: &Automaton,
    input: &[Symbol],
    id: ConfigId,
    current: &Configuration,
) -> Vec<Configuration> {
    let Some(&symbol) = current.remaining(input).first() else {
        return Vec::new();
    };

    automaton
        .transitions_from(current.state())
        .filter_map(|transition| {
            let emitted = match transition.label() {
                TransitionLabel::Mealy { input, output } if *input == symbol => output.as_str(),
                TransitionLabel::Moore { input } if *input == symbol => {
                    automaton.output(transition.to()).unwrap_or_default()
                }
                _ => return None,
            };
            let mut next = current.successor(id, transition.to()).consume(1);
            next.output_mut().push_str(emitted);
            Some(next)
        })
        .collect()
}
