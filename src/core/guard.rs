//! Guard predicates over states.
//!
//! A guard answers one question about a state without touching it. The
//! controller keeps its "may this command start here?" rules as guards so
//! they can be named, shared and tested on their own.

use super::state::State;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether an action is permitted in a state.
///
/// # Example
///
/// ```rust
/// use vending_controller::controller::VendState;
/// use vending_controller::core::Guard;
///
/// let idle_only = Guard::new("idle only", |s: &VendState| matches!(s, VendState::Idle));
///
/// assert!(idle_only.check(&VendState::Idle));
/// assert!(!idle_only.check(&VendState::PaymentReceived));
/// ```
pub struct Guard<S: State> {
    label: &'static str,
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a deterministic predicate.
    pub fn new<F>(label: &'static str, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            label,
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").field("label", &self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Phase {
        Ready,
        Busy,
        Done,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Ready => "Ready",
                Self::Busy => "Busy",
                Self::Done => "Done",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new("ready", |s: &Phase| matches!(s, Phase::Ready));

        assert!(guard.check(&Phase::Ready));
        assert!(!guard.check(&Phase::Busy));
    }

    #[test]
    fn clones_share_the_predicate() {
        let guard = Guard::new("busy", |s: &Phase| matches!(s, Phase::Busy));
        let copy = guard.clone();

        assert_eq!(copy.label(), "busy");
        assert_eq!(guard.check(&Phase::Busy), copy.check(&Phase::Busy));
        assert_eq!(guard.check(&Phase::Done), copy.check(&Phase::Done));
    }

    #[test]
    fn debug_shows_label() {
        let guard = Guard::new("ready", |s: &Phase| matches!(s, Phase::Ready));
        assert_eq!(format!("{guard:?}"), "Guard { label: \"ready\" }");
    }
}
