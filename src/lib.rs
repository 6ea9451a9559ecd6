//! Automata Lab: build, simulate and transform automata
//!
//! One model covers finite automata, pushdown automata, multi-tape Turing
//! machines and Mealy/Moore transducers. On top of it the crate provides
//! closure and nondeterminism analysis, a caller-paced breadth-first
//! simulator, subset construction, DFA minimization and language
//! equivalence of finite automata.
//!
//! # Core Concepts
//!
//! - **Automaton**: states, transitions and a [`MachineKind`] that fixes
//!   which transition labels are allowed and which of them are silent
//! - **Configuration**: one branch of a simulation, kept in an arena tree
//! - **Conversion**: pure transformations that build new automata
//!
//! # Example
//!
//! ```rust
//! use automata_lab::builder::AutomatonBuilder;
//! use automata_lab::conversion::{are_equivalent, convert_to_dfa, minimize};
//! use automata_lab::simulation::{accepts, SimulationConfig};
//!
//! // Accepts b*a.
//! let nfa = AutomatonBuilder::finite()
//!     .initial("q0")
//!     .state("q1")
//!     .final_state("q2")
//!     .on("q0", 'a', "q1")
//!     .epsilon("q1", "q2")
//!     .on("q0", 'b', "q0")
//!     .build()
//!     .unwrap();
//!
//! let config = SimulationConfig::default();
//! assert!(accepts(&nfa, "bba", &config).unwrap());
//! assert!(!accepts(&nfa, "ab", &config).unwrap());
//!
//! let minimal = minimize(&convert_to_dfa(&nfa).unwrap()).unwrap();
//! assert_eq!(minimal.num_states(), 2);
//! assert!(are_equivalent(&nfa, &minimal));
//! ```

pub mod analysis;
pub mod builder;
pub mod checkpoint;
pub mod conversion;
pub mod core;
pub mod simulation;
pub mod validation;

// Re-export commonly used types
pub use builder::AutomatonBuilder;
pub use core::{Automaton, MachineKind, StateId, StateSet, Symbol, TransitionLabel};
pub use simulation::{SimulationConfig, SimulationStatus, Simulator};
