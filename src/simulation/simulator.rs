//! The caller-paced simulation driver.

use super::config::SimulationConfig;
use super::configuration::{ConfigId, Configuration, ConfigurationTree};
use super::error::SimulationError;
use super::step::StepRules;
use crate::checkpoint::{CheckpointError, SimulationCheckpoint, CHECKPOINT_VERSION};
use crate::core::{Automaton, Symbol};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/// Where a simulation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// Active configurations remain and none has accepted yet.
    Running,
    Accepted,
    /// Every branch died without accepting.
    Rejected,
    /// `run` hit the step bound. Stepping may continue.
    Exhausted,
}

impl SimulationStatus {
    /// Accepted or rejected; further steps do nothing.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// Breadth-first simulation of an automaton on one input word.
///
/// The simulator keeps a frontier of live configurations inside a
/// [`ConfigurationTree`]. Each [`step`](Simulator::step) replaces every
/// active frontier member with its successors, so all branches advance in
/// lockstep. Frozen configurations stay in the frontier but are skipped
/// until thawed.
///
/// # Example
///
/// ```rust
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::simulation::{SimulationConfig, SimulationStatus, Simulator};
///
/// let nfa = AutomatonBuilder::finite()
///     .initial("q0")
///     .final_state("q1")
///     .on("q0", 'b', "q0")
///     .on("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// let mut sim = Simulator::new(&nfa, "bba", SimulationConfig::default()).unwrap();
/// sim.step();
/// assert_eq!(sim.status(), SimulationStatus::Running);
/// assert_eq!(sim.run(), SimulationStatus::Accepted);
/// assert_eq!(sim.steps(), 3);
/// ```
#[derive(Debug)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    rules: StepRules,
    config: SimulationConfig,
    input: Vec<Symbol>,
    tree: ConfigurationTree,
    frontier: Vec<ConfigId>,
    frozen: BTreeSet<ConfigId>,
    accepted: Vec<ConfigId>,
    status: SimulationStatus,
    steps: usize,
}

impl<'a> Simulator<'a> {
    /// Start a simulation of `automaton` on `input`.
    ///
    /// Root configurations that already accept (for instance an initial
    /// final state on empty input) are recorded immediately.
    pub fn new(
        automaton: &'a Automaton,
        input: &str,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        let initial = automaton
            .initial_state()
            .ok_or(SimulationError::NoInitialState)?;
        let rules = StepRules::for_kind(automaton.kind());
        let input: Vec<Symbol> = input.chars().collect();

        let mut tree = ConfigurationTree::new();
        let frontier: Vec<ConfigId> = (rules.initial)(automaton, initial, &input, &config)
            .into_iter()
            .map(|root| tree.push(root))
            .collect();

        let mut simulator = Self {
            automaton,
            rules,
            config,
            input,
            tree,
            frontier,
            frozen: BTreeSet::new(),
            accepted: Vec::new(),
            status: SimulationStatus::Running,
            steps: 0,
        };
        let roots = simulator.frontier.clone();
        simulator.record_accepting(&roots);
        simulator.update_status(0);

        info!(
            kind = %automaton.kind(),
            input_len = simulator.input.len(),
            roots = simulator.frontier.len(),
            "Started simulation"
        );
        Ok(simulator)
    }

    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn input(&self) -> &[Symbol] {
        &self.input
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    /// Number of frontier steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn tree(&self) -> &ConfigurationTree {
        &self.tree
    }

    /// Current frontier, frozen members included.
    pub fn frontier(&self) -> &[ConfigId] {
        &self.frontier
    }

    pub fn frozen(&self) -> &BTreeSet<ConfigId> {
        &self.frozen
    }

    /// Every accepting configuration found so far, in discovery order.
    pub fn accepted(&self) -> &[ConfigId] {
        &self.accepted
    }

    pub fn configuration(&self, id: ConfigId) -> Option<&Configuration> {
        self.tree.get(id)
    }

    /// The first accepting configuration, if any.
    pub fn accepting(&self) -> Option<&Configuration> {
        self.accepted.first().and_then(|&id| self.tree.get(id))
    }

    /// Frontier members that the next step will expand.
    pub fn active(&self) -> impl Iterator<Item = ConfigId> + '_ {
        self.frontier
            .iter()
            .copied()
            .filter(|id| !self.frozen.contains(id))
    }

    /// Successors of configuration `id` without adding them to the tree.
    pub fn successors(&self, id: ConfigId) -> Result<Vec<Configuration>, SimulationError> {
        let current = self
            .tree
            .get(id)
            .ok_or(SimulationError::UnknownConfiguration(id))?;
        Ok((self.rules.successors)(self.automaton, &self.input, id, current))
    }

    /// Advance every active configuration by one step.
    ///
    /// Does nothing once the simulation is accepted or rejected.
    pub fn step(&mut self) -> SimulationStatus {
        if self.status.is_finished() {
            return self.status;
        }

        let accepted_before = self.accepted.len();
        let mut next_frontier = Vec::new();
        let mut seen = HashSet::new();
        let mut created = Vec::new();

        for id in std::mem::take(&mut self.frontier) {
            if self.frozen.contains(&id) {
                next_frontier.push(id);
                continue;
            }
            let Some(current) = self.tree.get(id) else {
                continue;
            };

            let successors = (self.rules.successors)(self.automaton, &self.input, id, current);
            if successors.is_empty() && (self.rules.accepts_on_halt)(&self.config) {
                self.accepted.push(id);
            }

            for successor in successors {
                if self.config.deduplicate && !seen.insert(successor.detached()) {
                    continue;
                }
                let child = self.tree.push(successor);
                next_frontier.push(child);
                created.push(child);
            }
        }

        self.frontier = next_frontier;
        self.steps += 1;
        self.record_accepting(&created);
        self.update_status(accepted_before);

        debug!(
            step = self.steps,
            frontier = self.frontier.len(),
            created = created.len(),
            status = ?self.status,
            "Simulation step"
        );
        self.status
    }

    /// Step until the simulation accepts, rejects, runs out of active
    /// configurations or hits the configured step bound.
    ///
    /// The bound counts steps taken by this call, so a run that came back
    /// [`Exhausted`](SimulationStatus::Exhausted) can be continued.
    pub fn run(&mut self) -> SimulationStatus {
        let mut taken = 0;
        while self.status == SimulationStatus::Running || self.status == SimulationStatus::Exhausted
        {
            if self.active().next().is_none() {
                break;
            }
            if self.config.max_steps.is_some_and(|max| taken >= max) {
                warn!(
                    steps = self.steps,
                    frontier = self.frontier.len(),
                    "Simulation hit the step bound"
                );
                self.status = SimulationStatus::Exhausted;
                return self.status;
            }
            self.step();
            taken += 1;
        }

        info!(status = ?self.status, steps = self.steps, "Simulation finished");
        self.status
    }

    /// Take at most `steps` steps.
    pub fn run_for(&mut self, steps: usize) -> SimulationStatus {
        for _ in 0..steps {
            if self.status.is_finished() || self.active().next().is_none() {
                break;
            }
            self.step();
        }
        self.status
    }

    /// Keep configuration `id` in the frontier without expanding it.
    pub fn freeze(&mut self, id: ConfigId) -> Result<(), SimulationError> {
        self.require_frontier(id)?;
        self.frozen.insert(id);
        Ok(())
    }

    pub fn thaw(&mut self, id: ConfigId) -> Result<(), SimulationError> {
        if !self.frozen.remove(&id) {
            return Err(SimulationError::UnknownConfiguration(id));
        }
        Ok(())
    }

    /// Drop configuration `id` from the frontier.
    ///
    /// Removing the last frontier member of a running simulation rejects it.
    pub fn remove(&mut self, id: ConfigId) -> Result<(), SimulationError> {
        self.require_frontier(id)?;
        self.frontier.retain(|&member| member != id);
        self.frozen.remove(&id);
        if self.frontier.is_empty() && !self.status.is_finished() {
            self.status = SimulationStatus::Rejected;
        }
        Ok(())
    }

    /// Resume after an acceptance to look for further accepting runs.
    ///
    /// Accepting configurations leave the frontier; everything found so
    /// far stays in [`accepted`](Simulator::accepted).
    pub fn continue_search(&mut self) -> SimulationStatus {
        if self.status != SimulationStatus::Accepted {
            return self.status;
        }
        let accepted: HashSet<ConfigId> = self.accepted.iter().copied().collect();
        self.frontier.retain(|id| !accepted.contains(id));
        self.status = if self.frontier.is_empty() {
            SimulationStatus::Rejected
        } else {
            SimulationStatus::Running
        };
        self.status
    }

    /// Drop every configuration that is not an ancestor of the frontier or
    /// of an accepting configuration. Ids are renumbered.
    pub fn reclaim(&mut self) -> usize {
        let before = self.tree.len();
        let mut keep = self.frontier.clone();
        keep.extend(&self.accepted);
        let remap = self.tree.retain_ancestors(&keep);

        let renumber = |ids: &mut Vec<ConfigId>| {
            *ids = ids.iter().filter_map(|id| remap.get(id).copied()).collect();
        };
        renumber(&mut self.frontier);
        renumber(&mut self.accepted);
        self.frozen = self
            .frozen
            .iter()
            .filter_map(|id| remap.get(id).copied())
            .collect();

        let reclaimed = before - self.tree.len();
        debug!(reclaimed, remaining = self.tree.len(), "Reclaimed configurations");
        reclaimed
    }

    /// Capture the simulation so it can be resumed later.
    pub fn checkpoint(&self) -> SimulationCheckpoint {
        SimulationCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind: self.automaton.kind(),
            input: self.input.iter().collect(),
            config: self.config.clone(),
            tree: self.tree.clone(),
            frontier: self.frontier.clone(),
            frozen: self.frozen.iter().copied().collect(),
            accepted: self.accepted.clone(),
            status: self.status,
            steps: self.steps,
        }
    }

    /// Continue a checkpointed simulation of `automaton`.
    ///
    /// Fails if the checkpoint was written by another format version or
    /// taken from a different kind of machine. A tree that refers to
    /// unknown states, links a configuration to a parent not stored before
    /// it or holds a tape whose head is off its cells is rejected too, as
    /// are frontier, frozen or accepted ids outside the tree.
    pub fn resume(
        automaton: &'a Automaton,
        checkpoint: SimulationCheckpoint,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if checkpoint.kind != automaton.kind() {
            return Err(CheckpointError::KindMismatch {
                expected: automaton.kind(),
                found: checkpoint.kind,
            });
        }
        if let Some((config, node)) = checkpoint
            .tree
            .iter()
            .find(|(_, node)| !automaton.contains_state(node.state()))
        {
            return Err(CheckpointError::UnknownState {
                config,
                state: node.state(),
            });
        }
        if let Some((config, parent)) = checkpoint.tree.broken_parent() {
            return Err(CheckpointError::InvalidParent { config, parent });
        }
        let broken_tape = checkpoint.tree.iter().find_map(|(config, node)| {
            node.tapes()
                .iter()
                .position(|tape| !tape.is_consistent())
                .map(|tape| (config, tape))
        });
        if let Some((config, tape)) = broken_tape {
            return Err(CheckpointError::TapeHeadOutOfRange { config, tape });
        }
        let dangling = checkpoint
            .frontier
            .iter()
            .chain(&checkpoint.frozen)
            .chain(&checkpoint.accepted)
            .find(|&&id| checkpoint.tree.get(id).is_none());
        if let Some(&id) = dangling {
            return Err(CheckpointError::DanglingConfiguration(id));
        }

        info!(
            checkpoint = %checkpoint.id,
            steps = checkpoint.steps,
            "Resumed simulation"
        );
        Ok(Self {
            automaton,
            rules: StepRules::for_kind(automaton.kind()),
            config: checkpoint.config,
            input: checkpoint.input.chars().collect(),
            tree: checkpoint.tree,
            frontier: checkpoint.frontier,
            frozen: checkpoint.frozen.into_iter().collect(),
            accepted: checkpoint.accepted,
            status: checkpoint.status,
            steps: checkpoint.steps,
        })
    }

    /// Consume the simulator into a report of its outcome.
    pub fn into_report(self) -> SimulationReport {
        SimulationReport {
            status: self.status,
            steps: self.steps,
            accepting: self.accepted.first().copied(),
            tree: self.tree,
        }
    }

    fn record_accepting(&mut self, ids: &[ConfigId]) {
        for &id in ids {
            let accepts = self.tree.get(id).is_some_and(|current| {
                (self.rules.is_accept)(self.automaton, &self.input, &self.config, current)
            });
            if accepts {
                self.accepted.push(id);
            }
        }
    }

    fn update_status(&mut self, accepted_before: usize) {
        self.status = if self.accepted.len() > accepted_before {
            SimulationStatus::Accepted
        } else if self.frontier.is_empty() {
            SimulationStatus::Rejected
        } else {
            SimulationStatus::Running
        };
    }

    fn require_frontier(&self, id: ConfigId) -> Result<(), SimulationError> {
        if self.frontier.contains(&id) {
            Ok(())
        } else {
            Err(SimulationError::UnknownConfiguration(id))
        }
    }
}

/// Outcome of a complete [`simulate`] run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub status: SimulationStatus,
    pub steps: usize,
    /// First accepting configuration found.
    pub accepting: Option<ConfigId>,
    pub tree: ConfigurationTree,
}

impl SimulationReport {
    pub fn is_accepted(&self) -> bool {
        self.status == SimulationStatus::Accepted
    }

    /// Root-to-leaf trace of the accepting run.
    pub fn accepting_path(&self) -> Vec<&Configuration> {
        self.accepting
            .map(|id| self.tree.path(id))
            .unwrap_or_default()
    }

    /// Output of the accepting run of a transducer.
    pub fn output(&self) -> Option<&str> {
        self.accepting
            .and_then(|id| self.tree.get(id))
            .map(Configuration::output)
    }
}

/// Run `automaton` on `input` to completion or to the step bound.
pub fn simulate(
    automaton: &Automaton,
    input: &str,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    let mut simulator = Simulator::new(automaton, input, config.clone())?;
    simulator.run();
    Ok(simulator.into_report())
}

/// Whether some run of `automaton` accepts `input` within the step bound.
pub fn accepts(
    automaton: &Automaton,
    input: &str,
    config: &SimulationConfig,
) -> Result<bool, SimulationError> {
    simulate(automaton, input, config).map(|report| report.is_accepted())
}

/// Output of the first run of a Mealy or Moore machine that consumes all
/// of `input`, or `None` if the machine gets stuck.
///
/// # Example
///
/// ```rust
/// use automata_lab::builder::AutomatonBuilder;
/// use automata_lab::core::TransitionLabel;
/// use automata_lab::simulation::{translate, SimulationConfig};
///
/// let flip = AutomatonBuilder::mealy()
///     .initial("q")
///     .transition("q", "q", TransitionLabel::mealy('0', "1"))
///     .transition("q", "q", TransitionLabel::mealy('1', "0"))
///     .build()
///     .unwrap();
///
/// let output = translate(&flip, "0110", &SimulationConfig::default()).unwrap();
/// assert_eq!(output.as_deref(), Some("1001"));
/// ```
pub fn translate(
    automaton: &Automaton,
    input: &str,
    config: &SimulationConfig,
) -> Result<Option<String>, SimulationError> {
    let report = simulate(automaton, input, config)?;
    Ok(report.output().map(str::to_string))
}
