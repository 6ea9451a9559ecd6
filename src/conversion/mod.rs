//! Transformations of finite automata.
//!
//! Every function here borrows its input immutably and builds a new
//! automaton:
//! - [`convert_to_dfa`] / [`subset_construction`]: powerset construction
//! - [`minimize`]: partition refinement over a completed DFA
//! - [`are_equivalent`]: lockstep comparison of minimal DFAs
//! - [`are_isomorphic`]: the same comparison without minimizing first
//!
//! [`complete_with_trap`] is the one exception; it completes an automaton
//! in place.

mod equivalence;
mod error;
mod minimize;
mod subset;

pub use equivalence::{are_equivalent, are_isomorphic};
pub use error::ConversionError;
pub use minimize::{complete_with_trap, minimize};
pub use subset::{convert_to_dfa, subset_construction, SubsetDfa};
