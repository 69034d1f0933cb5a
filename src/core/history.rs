//! Transaction history.
//!
//! Every committed state change is appended as a timestamped
//! [`StateTransition`]. Histories are values: `record` returns a new
//! history and leaves the old one untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
///
/// # Example
///
/// ```rust
/// use vending_controller::controller::VendState;
/// use vending_controller::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: VendState::Idle,
///     to: VendState::WaitingForPayment,
///     command: "SelectProduct".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.command, "SelectProduct");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// State before the command ran
    pub from: S,
    /// State after the command ran
    pub to: S,
    /// Name of the command that caused the change
    pub command: String,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// A transition that left the machine in the same state, such as a
    /// partial payment.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use vending_controller::controller::VendState;
/// use vending_controller::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: VendState::Idle,
///         to: VendState::WaitingForPayment,
///         command: "SelectProduct".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: VendState::WaitingForPayment,
///         to: VendState::Canceled,
///         command: "Cancel".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&VendState::Idle, &VendState::WaitingForPayment, &VendState::Canceled]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Return a new history with `transition` appended.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States visited, in order, collapsing self-loops.
    ///
    /// The first entry is the `from` state of the first transition; each
    /// state change then contributes its `to` state.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            if !transition.is_self_loop() {
                path.push(&transition.to);
            }
        }
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
