//! Vending Controller: a finite-state transaction controller
//!
//! A customer selects a product, pays for it in as many insertions as they
//! like and receives it once the payment covers the price. Until then the
//! transaction can be canceled.
//!
//! The decision logic is a pure function over a closed set of states; the
//! [`TransactionController`] is the thin shell that owns the catalog and the
//! transaction data and commits each decision.
//!
//! # Core Concepts
//!
//! - **State**: [`VendState`] implements the [`State`] trait
//! - **Catalog**: inventory and prices owned by the controller
//! - **History**: every accepted command is recorded with a timestamp
//!
//! # Example
//!
//! ```rust
//! use vending_controller::{Catalog, TransactionController, VendError};
//! use rust_decimal_macros::dec;
//!
//! let mut machine = TransactionController::new(Catalog::ticket_office());
//!
//! machine.select_product("metro").unwrap();
//! machine.insert_money(dec!(100)).unwrap();
//! assert_eq!(machine.current_state_name(), "WaitingForPayment");
//! assert_eq!(machine.dispense_product(), Err(VendError::InsufficientFunds));
//!
//! machine.insert_money(dec!(250)).unwrap();
//! assert_eq!(machine.current_state_name(), "PaymentReceived");
//!
//! machine.cancel().unwrap();
//! assert_eq!(machine.current_state_name(), "Canceled");
//! assert_eq!(machine.catalog().stock("metro"), 10);
//! ```

pub mod catalog;
pub mod cli;
pub mod controller;
pub mod core;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, ProductId};
pub use controller::{
    Command, Dispense, Outcome, PaymentNotice, Selection, TransactionController, VendError,
    VendState,
};
pub use crate::core::{Guard, State, StateHistory, StateTransition};
