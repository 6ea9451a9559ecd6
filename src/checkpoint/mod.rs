//! Checkpoint and resume of paced simulations.
//!
//! A [`SimulationCheckpoint`] captures everything a paused
//! [`Simulator`](crate::simulation::Simulator) needs to continue: the
//! input, the configuration, the whole configuration tree and the
//! frontier. The automaton itself is not included; resuming validates the
//! checkpoint against the automaton it is resumed on.

use crate::core::MachineKind;
use crate::simulation::{ConfigId, ConfigurationTree, SimulationConfig, SimulationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a simulation in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Kind of the simulated machine
    pub kind: MachineKind,

    pub input: String,

    pub config: SimulationConfig,

    /// Every configuration created so far
    pub tree: ConfigurationTree,

    pub frontier: Vec<ConfigId>,

    pub frozen: Vec<ConfigId>,

    pub accepted: Vec<ConfigId>,

    pub status: SimulationStatus,

    pub steps: usize,
}

impl SimulationCheckpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
