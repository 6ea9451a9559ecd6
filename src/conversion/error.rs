//! Conversion errors.

use crate::core::{MachineKind, ModelError};
use thiserror::Error;

/// Errors that can occur when converting or comparing automata.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("Expected a finite automaton, got a {0}")]
    NotFiniteAutomaton(MachineKind),

    #[error(transparent)]
    Model(#[from] ModelError),
}
