//! Rejected-command errors.

use crate::catalog::ProductId;
use thiserror::Error;

/// Why a command was refused in the current state.
///
/// Every variant is recoverable: the controller is left exactly as it was
/// and the caller picks the next command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendError {
    #[error("Product '{product}' is unavailable")]
    ProductUnavailable { product: ProductId },

    #[error("A product is already selected")]
    AlreadySelected,

    #[error("Please select a product first")]
    NoSelection,

    #[error("Product already dispensed")]
    AlreadyDispensed,

    #[error("Transaction canceled")]
    TransactionCanceled,

    #[error("No active transaction")]
    NoActiveTransaction,

    #[error("Transaction complete")]
    TransactionComplete,

    #[error("Transaction already canceled")]
    AlreadyCanceled,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("No paid product")]
    NoPaidProduct,

    #[error("No product to dispense")]
    NoProductToDispense,

    #[error("Cannot reset while a transaction is in progress (state '{state}')")]
    TransactionInProgress { state: String },
}
