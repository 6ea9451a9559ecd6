//! Transitions and their kind-specific labels.
//!
//! Every transition joins exactly one source state to one target state
//! and carries a [`TransitionLabel`]. The label is a closed union over the
//! machine kinds, so code that interprets a transition matches on it
//! exhaustively instead of downcasting.

use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An input, stack or tape symbol.
pub type Symbol = char;

/// Blank tape cell of a Turing machine.
pub const BLANK: Symbol = '□';

/// Stable integer identity of a transition within one automaton.
pub type TransitionId = u32;

/// Head movement of a Turing machine tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Stay,
}

/// What a Turing machine transition does to a single tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TapeOp {
    pub read: Symbol,
    pub write: Symbol,
    pub movement: Move,
}

impl TapeOp {
    pub fn new(read: Symbol, write: Symbol, movement: Move) -> Self {
        Self {
            read,
            write,
            movement,
        }
    }
}

/// Label of a Turing machine transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TuringLabel {
    /// One read/write/move triple per tape.
    Tapes(Vec<TapeOp>),
    /// A block (no-op) transition: fires without reading, leaves every
    /// tape untouched. The only silent kind of Turing transition.
    Block,
}

/// Kind-specific trigger and effect of a transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionLabel {
    /// Finite automaton: one input symbol, or `None` for a silent move.
    Finite { input: Option<Symbol> },

    /// Pushdown automaton. `push` is written so that its first symbol
    /// ends up on top of the stack.
    Pushdown {
        input: Option<Symbol>,
        pop: Option<Symbol>,
        push: Vec<Symbol>,
    },

    Turing(TuringLabel),

    /// Mealy machine: output is emitted by the transition.
    Mealy { input: Symbol, output: String },

    /// Moore machine: output belongs to the target state, not the label.
    Moore { input: Symbol },
}

/// Discriminant of [`TransitionLabel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Finite,
    Pushdown,
    Turing,
    Mealy,
    Moore,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Finite => "finite automaton",
            Self::Pushdown => "pushdown automaton",
            Self::Turing => "Turing machine",
            Self::Mealy => "Mealy machine",
            Self::Moore => "Moore machine",
        };
        f.write_str(name)
    }
}

impl TransitionLabel {
    /// Finite automaton transition on `symbol`.
    pub fn symbol(symbol: Symbol) -> Self {
        Self::Finite {
            input: Some(symbol),
        }
    }

    /// Silent finite automaton transition.
    pub fn epsilon() -> Self {
        Self::Finite { input: None }
    }

    /// Pushdown transition; `push` is read left to right, top first.
    pub fn pushdown(input: Option<Symbol>, pop: Option<Symbol>, push: &str) -> Self {
        Self::Pushdown {
            input,
            pop,
            push: push.chars().collect(),
        }
    }

    /// Single-tape Turing machine transition.
    pub fn turing(read: Symbol, write: Symbol, movement: Move) -> Self {
        Self::Turing(TuringLabel::Tapes(vec![TapeOp::new(read, write, movement)]))
    }

    /// Multi-tape Turing machine transition, one op per tape.
    pub fn turing_tapes(ops: Vec<TapeOp>) -> Self {
        Self::Turing(TuringLabel::Tapes(ops))
    }

    /// Turing machine block transition.
    pub fn block() -> Self {
        Self::Turing(TuringLabel::Block)
    }

    pub fn mealy(input: Symbol, output: &str) -> Self {
        Self::Mealy {
            input,
            output: output.to_string(),
        }
    }

    pub fn moore(input: Symbol) -> Self {
        Self::Moore { input }
    }

    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Finite { .. } => TransitionKind::Finite,
            Self::Pushdown { .. } => TransitionKind::Pushdown,
            Self::Turing(_) => TransitionKind::Turing,
            Self::Mealy { .. } => TransitionKind::Mealy,
            Self::Moore { .. } => TransitionKind::Moore,
        }
    }

    /// Symbols this label contributes to the automaton's alphabet.
    ///
    /// Input symbols for every kind except Turing machines, where the
    /// non-blank symbols read on any tape count.
    pub fn trigger_symbols(&self) -> Vec<Symbol> {
        match self {
            Self::Finite { input } | Self::Pushdown { input, .. } => input.iter().copied().collect(),
            Self::Turing(TuringLabel::Tapes(ops)) => ops
                .iter()
                .map(|op| op.read)
                .filter(|&read| read != BLANK)
                .collect(),
            Self::Turing(TuringLabel::Block) => Vec::new(),
            Self::Mealy { input, .. } | Self::Moore { input } => vec![*input],
        }
    }

    /// Tape count the label is written for, if it is a tape transition.
    pub(crate) fn tape_count(&self) -> Option<usize> {
        match self {
            Self::Turing(TuringLabel::Tapes(ops)) => Some(ops.len()),
            _ => None,
        }
    }
}

fn show(symbol: Option<Symbol>) -> String {
    symbol.map_or_else(|| "λ".to_string(), String::from)
}

impl fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite { input } => f.write_str(&show(*input)),
            Self::Pushdown { input, pop, push } => {
                let push: String = if push.is_empty() {
                    "λ".to_string()
                } else {
                    push.iter().collect()
                };
                write!(f, "{}, {}; {}", show(*input), show(*pop), push)
            }
            Self::Turing(TuringLabel::Block) => f.write_str("block"),
            Self::Turing(TuringLabel::Tapes(ops)) => {
                let parts: Vec<String> = ops
                    .iter()
                    .map(|op| {
                        let movement = match op.movement {
                            Move::Left => 'L',
                            Move::Right => 'R',
                            Move::Stay => 'S',
                        };
                        format!("{} ; {} , {}", op.read, op.write, movement)
                    })
                    .collect();
                f.write_str(&parts.join(" | "))
            }
            Self::Mealy { input, output } => write!(f, "{input} ; {output}"),
            Self::Moore { input } => write!(f, "{input}"),
        }
    }
}

/// A transition between two states of the same automaton.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    id: TransitionId,
    from: StateId,
    to: StateId,
    label: TransitionLabel,
}

impl Transition {
    pub(crate) fn new(id: TransitionId, from: StateId, to: StateId, label: TransitionLabel) -> Self {
        Self {
            id,
            from,
            to,
            label,
        }
    }

    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn from(&self) -> StateId {
        self.from
    }

    pub fn to(&self) -> StateId {
        self.to
    }

    pub fn label(&self) -> &TransitionLabel {
        &self.label
    }

    /// Input symbol consumed by a finite, Mealy or Moore transition.
    pub fn input(&self) -> Option<Symbol> {
        match &self.label {
            TransitionLabel::Finite { input } | TransitionLabel::Pushdown { input, .. } => *input,
            TransitionLabel::Mealy { input, .. } | TransitionLabel::Moore { input } => Some(*input),
            TransitionLabel::Turing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_kind_matches_variant() {
        assert_eq!(TransitionLabel::symbol('a').kind(), TransitionKind::Finite);
        assert_eq!(
            TransitionLabel::pushdown(None, Some('Z'), "aZ").kind(),
            TransitionKind::Pushdown
        );
        assert_eq!(TransitionLabel::block().kind(), TransitionKind::Turing);
        assert_eq!(TransitionLabel::mealy('a', "1").kind(), TransitionKind::Mealy);
        assert_eq!(TransitionLabel::moore('a').kind(), TransitionKind::Moore);
    }

    #[test]
    fn trigger_symbols_skip_silent_and_blank() {
        assert!(TransitionLabel::epsilon().trigger_symbols().is_empty());
        assert_eq!(TransitionLabel::symbol('x').trigger_symbols(), vec!['x']);

        let ops = vec![
            TapeOp::new('a', 'b', Move::Right),
            TapeOp::new(BLANK, 'c', Move::Stay),
        ];
        assert_eq!(TransitionLabel::turing_tapes(ops).trigger_symbols(), vec!['a']);
        assert!(TransitionLabel::block().trigger_symbols().is_empty());
    }

    #[test]
    fn pushdown_push_keeps_order() {
        match TransitionLabel::pushdown(Some('a'), Some('Z'), "AZ") {
            TransitionLabel::Pushdown { push, .. } => assert_eq!(push, vec!['A', 'Z']),
            other => panic!("unexpected label {other:?}"),
        }
    }

    #[test]
    fn display_uses_lambda_for_empty() {
        assert_eq!(TransitionLabel::epsilon().to_string(), "λ");
        assert_eq!(
            TransitionLabel::pushdown(None, Some('Z'), "").to_string(),
            "λ, Z; λ"
        );
        assert_eq!(
            TransitionLabel::turing('a', 'b', Move::Left).to_string(),
            "a ; b , L"
        );
    }

    #[test]
    fn transition_input_per_kind() {
        let t = Transition::new(0, 0, 1, TransitionLabel::mealy('a', "xy"));
        assert_eq!(t.input(), Some('a'));

        let t = Transition::new(1, 0, 1, TransitionLabel::turing('a', 'a', Move::Stay));
        assert_eq!(t.input(), None);
    }
}
