//! State trait shared by every machine in the crate.
//!
//! A state is a plain value: it can be named, compared, serialized and
//! asked whether it ends a transaction. None of these queries mutate.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for transaction states.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `PartialEq`: guards and tests compare states
/// - `Debug`: rejected commands are logged with their state
/// - `Serialize` + `Deserialize`: history can be dumped as JSON
///
/// # Example
///
/// ```rust
/// use vending_controller::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Open,
///     Jammed,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///             Self::Jammed => "Jammed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Jammed)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Jammed)
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// assert!(DoorState::Jammed.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used for display, logging and `current_state_name`.
    fn name(&self) -> &str;

    /// Whether no further command can move the machine out of this state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state records an aborted transaction.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
