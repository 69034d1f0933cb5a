//! The vending transaction state machine.
//!
//! - [`VendState`]: the five lifecycle states
//! - [`Command`] and its outcomes ([`Selection`], [`PaymentNotice`], [`Dispense`])
//! - [`select`], [`insert`], [`cancel`], [`dispense`]: pure per-command decisions,
//!   with [`apply`] dispatching a [`Command`] to them
//! - [`TransactionController`]: owns the data and commits decisions

mod command;
mod error;
mod machine;
mod state;
mod transition;

pub use command::{Command, Dispense, Outcome, PaymentNotice, Selection};
pub use error::VendError;
pub use machine::TransactionController;
pub use state::{accepts_selection, at_rest, VendState};
pub use transition::{apply, cancel, dispense, insert, select, Step, Transaction};
