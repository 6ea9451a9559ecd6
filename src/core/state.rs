//! States of an automaton.
//!
//! A state carries no behavior of its own: it is an identity plus the
//! presentation data an editor needs (name, optional label, position).
//! Finality, initiality and Moore outputs are properties the owning
//! [`Automaton`](super::Automaton) records about a state.

use serde::{Deserialize, Serialize};

/// Stable integer identity of a state within one automaton.
///
/// Ids are handed out by [`Automaton::create_state`](super::Automaton::create_state)
/// and are never reused, even after the state is removed.
pub type StateId = u32;

/// Editor position of a state.
///
/// The engine never reads it; it is kept so that automata produced by
/// conversions can be laid out by whoever displays them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single state of an automaton.
///
/// # Example
///
/// ```rust
/// use automata_lab::core::{Automaton, Point};
///
/// let mut automaton = Automaton::finite();
/// let q0 = automaton.create_state(Point::new(10.0, 20.0));
///
/// let state = automaton.state(q0).unwrap();
/// assert_eq!(state.id(), q0);
/// assert_eq!(state.name(), "q0");
/// assert_eq!(state.label(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    name: String,
    label: Option<String>,
    position: Point,
}

impl State {
    pub(crate) fn new(id: StateId, name: String, position: Point) -> Self {
        Self {
            id,
            name,
            label: None,
            position,
        }
    }

    /// The state's stable id.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Display name, `q<id>` unless renamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form annotation, e.g. the subset a DFA state stands for.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }
}
