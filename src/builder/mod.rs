//! Builder API for ergonomic automaton construction.
//!
//! [`Automaton`](crate::core::Automaton) itself is id based. The builder
//! lets tests and examples describe a machine by state names instead and
//! reports every structural mistake from [`AutomatonBuilder::build`].

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::AutomatonBuilder;
