//! Configuration-based simulation of every machine kind.
//!
//! A run is a breadth-first search over [`Configuration`]s. The caller
//! paces it: [`Simulator::step`] does a bounded amount of work and
//! returns, [`Simulator::run`] keeps stepping until the simulation
//! finishes or the configured step bound is hit. Acceptance policies for
//! pushdown automata and Turing machines are fields of
//! [`SimulationConfig`].

mod config;
mod configuration;
mod error;
mod simulator;
mod step;

pub use config::{PushdownAcceptance, SimulationConfig, TuringAcceptance};
pub use configuration::{ConfigId, Configuration, ConfigurationTree, Tape};
pub use error::SimulationError;
pub use simulator::{accepts, simulate, translate, SimulationReport, SimulationStatus, Simulator};
