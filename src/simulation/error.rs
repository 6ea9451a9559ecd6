//! Simulation errors.

use super::configuration::ConfigId;
use thiserror::Error;

/// Errors that can occur when setting up or steering a simulation.
///
/// Rejection and non-termination are outcomes, not errors; see
/// [`SimulationStatus`](super::SimulationStatus).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Automaton has no initial state")]
    NoInitialState,

    #[error("Configuration {0} is not in the current frontier")]
    UnknownConfiguration(ConfigId),

    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),
}
