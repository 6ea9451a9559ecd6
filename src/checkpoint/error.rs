//! Checkpoint error types.

use crate::core::{MachineKind, StateId};
use crate::simulation::ConfigId;
use thiserror::Error;

/// Errors that can occur when saving or resuming a simulation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint was taken from a different kind of machine
    #[error("Checkpoint of a {found} cannot resume on a {expected}")]
    KindMismatch {
        expected: MachineKind,
        found: MachineKind,
    },

    /// A stored configuration sits in a state the automaton does not have
    #[error("Configuration {config} refers to unknown state {state}")]
    UnknownState { config: ConfigId, state: StateId },

    /// A stored configuration names a parent that is not stored before it
    #[error("Configuration {config} has invalid parent {parent}")]
    InvalidParent { config: ConfigId, parent: ConfigId },

    /// A stored Turing tape has its head off the stored cells
    #[error("Tape {tape} of configuration {config} has its head out of range")]
    TapeHeadOutOfRange { config: ConfigId, tape: usize },

    /// Frontier, frozen or accepted ids point outside the stored tree
    #[error("Configuration {0} is not in the checkpointed tree")]
    DanglingConfiguration(ConfigId),
}
