//! State machine primitives.
//!
//! - the `State` trait implemented by transaction states
//! - `Guard` predicates deciding where a command may start
//! - immutable `StateHistory` of committed transitions
//!
//! Nothing in this module has side effects.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
