//! Simulation configuration.
//!
//! Acceptance policies are per-call parameters, never process-wide
//! preferences: the same automaton can be run under different policies
//! side by side.

use super::error::SimulationError;
use crate::core::Symbol;
use serde::{Deserialize, Serialize};

/// When a pushdown automaton accepts. Input must be consumed in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushdownAcceptance {
    FinalState,
    EmptyStack,
    /// Final state and empty stack at the same time.
    Both,
}

/// When a Turing machine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuringAcceptance {
    /// As soon as a final state is entered.
    FinalState,
    /// When a configuration has no applicable transition.
    Halting,
    Either,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frontier steps before `run` gives up. `None` runs until the
    /// simulation accepts or rejects, which may never happen.
    pub max_steps: Option<usize>,

    pub pushdown_acceptance: PushdownAcceptance,

    pub turing_acceptance: TuringAcceptance,

    /// Symbol on the stack when a pushdown run starts.
    pub initial_stack_symbol: Option<Symbol>,

    /// Drop configurations identical to one already in the same frontier.
    pub deduplicate: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(1_000),
            pushdown_acceptance: PushdownAcceptance::FinalState,
            turing_acceptance: TuringAcceptance::FinalState,
            initial_stack_symbol: Some('Z'),
            deduplicate: true,
        }
    }
}

impl SimulationConfig {
    /// No step bound; only safe for machines known to terminate.
    pub fn unbounded() -> Self {
        Self {
            max_steps: None,
            ..Default::default()
        }
    }

    /// A short step bound for interactive use.
    pub fn quick() -> Self {
        Self {
            max_steps: Some(50),
            ..Default::default()
        }
    }

    /// A generous step bound for machines with long runs.
    pub fn thorough() -> Self {
        Self {
            max_steps: Some(100_000),
            ..Default::default()
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_pushdown_acceptance(mut self, acceptance: PushdownAcceptance) -> Self {
        self.pushdown_acceptance = acceptance;
        self
    }

    pub fn with_turing_acceptance(mut self, acceptance: TuringAcceptance) -> Self {
        self.turing_acceptance = acceptance;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bounded() {
        let config = SimulationConfig::default();
        assert_eq!(config.max_steps, Some(1_000));
        assert_eq!(config.pushdown_acceptance, PushdownAcceptance::FinalState);
        assert_eq!(config.turing_acceptance, TuringAcceptance::FinalState);
        assert!(config.deduplicate);
    }

    #[test]
    fn builders_override_fields() {
        let config = SimulationConfig::unbounded()
            .with_pushdown_acceptance(PushdownAcceptance::EmptyStack)
            .with_turing_acceptance(TuringAcceptance::Halting);
        assert_eq!(config.max_steps, None);
        assert_eq!(config.pushdown_acceptance, PushdownAcceptance::EmptyStack);
        assert_eq!(config.turing_acceptance, TuringAcceptance::Halting);

        assert_eq!(config.with_max_steps(5).max_steps, Some(5));
    }

    #[test]
    fn presets_only_change_the_bound() {
        assert_eq!(SimulationConfig::quick().max_steps, Some(50));
        assert_eq!(SimulationConfig::thorough().max_steps, Some(100_000));
        assert_eq!(
            SimulationConfig::thorough().pushdown_acceptance,
            SimulationConfig::default().pushdown_acceptance
        );
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config =
            SimulationConfig::from_json(r#"{"turing_acceptance": "Either", "max_steps": 20}"#)
                .unwrap();
        assert_eq!(config.turing_acceptance, TuringAcceptance::Either);
        assert_eq!(config.max_steps, Some(20));
        assert_eq!(config.initial_stack_symbol, Some('Z'));
    }

    #[test]
    fn from_json_reports_invalid_input() {
        let result = SimulationConfig::from_json(r#"{"turing_acceptance": "Sometimes"}"#);
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn config_serializes_correctly() {
        let config = SimulationConfig::default().with_max_steps(42);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
