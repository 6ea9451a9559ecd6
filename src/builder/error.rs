//! Build errors for the automaton builder.

use crate::core::ModelError;
use thiserror::Error;

/// Errors that can occur when building an automaton from names.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("State '{0}' is referenced but never declared")]
    UnknownState(String),

    #[error("State '{0}' is declared twice")]
    DuplicateState(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}
