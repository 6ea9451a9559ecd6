//! Well-formedness validation of automata.
//!
//! Checks are collected with Stillwater's `Validation` type, so a single
//! pass reports every problem instead of stopping at the first one.
//! Nothing here is required before simulating or converting an automaton;
//! validation is for callers that want to reject sloppy input early.
//!
//! # Example
//!
//! ```rust
//! use automata_lab::builder::AutomatonBuilder;
//! use automata_lab::validation::ValidatorBuilder;
//!
//! let nfa = AutomatonBuilder::finite()
//!     .initial("q0")
//!     .state("q1")
//!     .on("q0", 'a', "q0")
//!     .on("q0", 'a', "q1")
//!     .build()
//!     .unwrap();
//!
//! let validator = ValidatorBuilder::new()
//!     .require_final()
//!     .require_deterministic()
//!     .build();
//!
//! // No final state and one conflicting pair.
//! assert_eq!(validator.issues(&nfa).len(), 2);
//! ```

pub mod builder;
pub mod issues;
pub mod rules;

pub use builder::ValidatorBuilder;
pub use issues::{Severity, ValidationIssue};
pub use rules::{Validator, ValidationCheck};

use crate::core::Automaton;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Validate with the checks that make sense for the automaton's kind:
/// an initial state always, final states for acceptors and outputs for
/// Moore machines.
pub fn validate(automaton: &Automaton) -> Validation<(), NonEmptyVec<ValidationIssue>> {
    ValidatorBuilder::for_kind(automaton.kind())
        .build()
        .validate(automaton)
}
