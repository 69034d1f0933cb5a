//! The five states of a vending transaction.

use crate::core::{Guard, State};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a transaction in its lifecycle.
///
/// ```text
/// Idle --select--> WaitingForPayment --insert(total >= price)--> PaymentReceived --dispense--> Dispensed
///                  WaitingForPayment --cancel--> Canceled
///                  PaymentReceived   --cancel--> Canceled
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendState {
    /// No active selection
    #[default]
    Idle,
    /// Product selected, payment still short of the price
    WaitingForPayment,
    /// Accumulated payment covers the price
    PaymentReceived,
    /// Product handed out
    Dispensed,
    /// Transaction abandoned
    Canceled,
}

impl VendState {
    pub const ALL: [VendState; 5] = [
        VendState::Idle,
        VendState::WaitingForPayment,
        VendState::PaymentReceived,
        VendState::Dispensed,
        VendState::Canceled,
    ];

    /// Whether a selection has been made and the transaction is still open.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::WaitingForPayment | Self::PaymentReceived)
    }
}

impl State for VendState {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::WaitingForPayment => "WaitingForPayment",
            Self::PaymentReceived => "PaymentReceived",
            Self::Dispensed => "Dispensed",
            Self::Canceled => "Canceled",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Dispensed | Self::Canceled)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl fmt::Display for VendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A new transaction may only begin from Idle.
pub fn accepts_selection() -> Guard<VendState> {
    Guard::new("accepts selection", |s: &VendState| {
        matches!(s, VendState::Idle)
    })
}

/// No transaction is open, so the controller can be returned to Idle.
pub fn at_rest() -> Guard<VendState> {
    Guard::new("at rest", |s: &VendState| !s.is_in_progress())
}
