//! Pure transition function.
//!
//! Each command has its own decision function ([`select`], [`insert`],
//! [`cancel`], [`dispense`]) returning the next state and a typed result;
//! [`apply`] dispatches a [`Command`] to them. Nothing here mutates: the
//! controller commits the decision.

use super::command::{Command, Dispense, Outcome, PaymentNotice, Selection};
use super::error::VendError;
use super::state::VendState;
use crate::catalog::{Catalog, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-transaction data owned by the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Set on selection, cleared on dispense
    pub selected_product: Option<ProductId>,
    /// Price recorded together with the selection
    pub price: Decimal,
    /// Accumulated payment; left in place when the transaction is canceled
    pub inserted_amount: Decimal,
}

/// Decision produced by [`apply`]: the next state and what the caller
/// gets back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub to: VendState,
    pub outcome: Outcome,
}

/// Decide the effect of `command` in `state`.
pub fn apply(
    state: VendState,
    command: &Command,
    transaction: &Transaction,
    catalog: &Catalog,
) -> Result<Step, VendError> {
    match command {
        Command::SelectProduct(product) => {
            select(state, product, catalog).map(|(to, selection)| Step {
                to,
                outcome: Outcome::Selected(selection),
            })
        }
        Command::InsertMoney(amount) => {
            insert(state, *amount, transaction).map(|(to, notice)| Step {
                to,
                outcome: Outcome::Payment(notice),
            })
        }
        Command::Cancel => cancel(state).map(|to| Step {
            to,
            outcome: Outcome::Canceled,
        }),
        Command::DispenseProduct => dispense(state, transaction).map(|(to, dispense)| Step {
            to,
            outcome: Outcome::Dispensed(dispense),
        }),
    }
}

/// `SelectProduct`: only Idle starts a transaction, and only for stocked
/// products.
pub fn select(
    state: VendState,
    product: &ProductId,
    catalog: &Catalog,
) -> Result<(VendState, Selection), VendError> {
    match state {
        VendState::Idle => {
            if !catalog.is_available(product.as_str()) {
                return Err(VendError::ProductUnavailable {
                    product: product.clone(),
                });
            }
            let selection = Selection {
                product: product.clone(),
                price: catalog.price(product.as_str()),
            };
            Ok((VendState::WaitingForPayment, selection))
        }
        VendState::WaitingForPayment
        | VendState::PaymentReceived
        | VendState::Dispensed
        | VendState::Canceled => Err(VendError::AlreadySelected),
    }
}

/// `InsertMoney`: amounts are taken as-is. Totals saturate at the
/// `Decimal` bounds.
pub fn insert(
    state: VendState,
    amount: Decimal,
    transaction: &Transaction,
) -> Result<(VendState, PaymentNotice), VendError> {
    let total = transaction.inserted_amount.saturating_add(amount);
    match state {
        VendState::Idle => Err(VendError::NoSelection),
        VendState::WaitingForPayment if total >= transaction.price => {
            let notice = PaymentNotice::SufficientFunds {
                inserted: amount,
                total,
            };
            Ok((VendState::PaymentReceived, notice))
        }
        VendState::WaitingForPayment => {
            let notice = PaymentNotice::RunningTotal {
                inserted: amount,
                total,
                remaining: transaction.price.saturating_sub(total),
            };
            Ok((VendState::WaitingForPayment, notice))
        }
        VendState::PaymentReceived => {
            let notice = PaymentNotice::AdditionalFunds {
                inserted: amount,
                total,
            };
            Ok((VendState::PaymentReceived, notice))
        }
        VendState::Dispensed => Err(VendError::AlreadyDispensed),
        VendState::Canceled => Err(VendError::TransactionCanceled),
    }
}

/// `Cancel`: abandons an open transaction without touching the money.
pub fn cancel(state: VendState) -> Result<VendState, VendError> {
    match state {
        VendState::Idle => Err(VendError::NoActiveTransaction),
        VendState::WaitingForPayment | VendState::PaymentReceived => Ok(VendState::Canceled),
        VendState::Dispensed => Err(VendError::TransactionComplete),
        VendState::Canceled => Err(VendError::AlreadyCanceled),
    }
}

/// `DispenseProduct`: hands out the selected product once it is paid for.
pub fn dispense(
    state: VendState,
    transaction: &Transaction,
) -> Result<(VendState, Dispense), VendError> {
    match state {
        VendState::Idle => Err(VendError::NoPaidProduct),
        VendState::WaitingForPayment => Err(VendError::InsufficientFunds),
        VendState::PaymentReceived => {
            let product = transaction
                .selected_product
                .clone()
                .ok_or(VendError::NoSelection)?;
            let dispense = Dispense {
                product,
                price: transaction.price,
                paid: transaction.inserted_amount,
            };
            Ok((VendState::Dispensed, dispense))
        }
        VendState::Dispensed => Err(VendError::AlreadyDispensed),
        VendState::Canceled => Err(VendError::NoProductToDispense),
    }
}
