//! Transaction controller that commits pure transitions.

use super::command::{Command, Dispense, Outcome, PaymentNotice, Selection};
use super::error::VendError;
use super::state::{self, VendState};
use super::transition::{self, Step, Transaction};
use crate::catalog::{Catalog, ProductId};
use crate::core::{Guard, State, StateHistory, StateTransition};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Drives one vending transaction at a time.
///
/// Each public operation asks the matching pure decision function what
/// should happen and, only if the command was
/// accepted, writes the result back. A rejected command leaves the state,
/// the transaction data and the inventory untouched. New selections must
/// also pass the `accepts_selection` guard before they are decided.
///
/// The controller assumes a single caller. Stock is checked when a product
/// is selected and consumed when it is dispensed; nothing reserves it in
/// between.
///
/// # Example
///
/// ```rust
/// use vending_controller::catalog::Catalog;
/// use vending_controller::controller::{TransactionController, VendState};
/// use rust_decimal_macros::dec;
///
/// let mut machine = TransactionController::new(Catalog::ticket_office());
///
/// machine.select_product("metro").unwrap();
/// machine.insert_money(dec!(300)).unwrap();
/// machine.dispense_product().unwrap();
///
/// assert_eq!(machine.state(), VendState::Dispensed);
/// assert_eq!(machine.catalog().stock("metro"), 9);
/// ```
pub struct TransactionController {
    id: Uuid,
    state: VendState,
    transaction: Transaction,
    catalog: Catalog,
    history: StateHistory<VendState>,
    accepts_selection: Guard<VendState>,
    at_rest: Guard<VendState>,
}

impl TransactionController {
    /// Create an idle controller that owns `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        let id = Uuid::new_v4();
        debug!(transaction = %id, products = catalog.inventory().len(), "Controller created");
        Self {
            id,
            state: VendState::Idle,
            transaction: Transaction::default(),
            catalog,
            history: StateHistory::new(),
            accepts_selection: state::accepts_selection(),
            at_rest: state::at_rest(),
        }
    }

    pub fn select_product(
        &mut self,
        product: impl Into<ProductId>,
    ) -> Result<Selection, VendError> {
        let product = product.into();
        let command = Command::SelectProduct(product.clone());
        let decision = self
            .admit(&command)
            .and_then(|()| transition::select(self.state, &product, &self.catalog));
        let (to, selection) = self.settle(&command, decision)?;

        self.commit(
            &command,
            Step {
                to,
                outcome: Outcome::Selected(selection.clone()),
            },
        );
        Ok(selection)
    }

    /// Add `amount` to the running payment.
    ///
    /// Zero and negative amounts are accepted as-is; they only produce a
    /// warning in the log.
    pub fn insert_money(&mut self, amount: Decimal) -> Result<PaymentNotice, VendError> {
        if amount <= Decimal::ZERO {
            warn!(transaction = %self.id, %amount, "Non-positive payment accepted");
        }
        let command = Command::InsertMoney(amount);
        let decision = self
            .admit(&command)
            .and_then(|()| transition::insert(self.state, amount, &self.transaction));
        let (to, notice) = self.settle(&command, decision)?;

        self.commit(
            &command,
            Step {
                to,
                outcome: Outcome::Payment(notice.clone()),
            },
        );
        Ok(notice)
    }

    /// Abandon the transaction. Inserted money is not refunded.
    pub fn cancel(&mut self) -> Result<(), VendError> {
        let command = Command::Cancel;
        let decision = self
            .admit(&command)
            .and_then(|()| transition::cancel(self.state));
        let to = self.settle(&command, decision)?;

        self.commit(
            &command,
            Step {
                to,
                outcome: Outcome::Canceled,
            },
        );
        Ok(())
    }

    pub fn dispense_product(&mut self) -> Result<Dispense, VendError> {
        let command = Command::DispenseProduct;
        let decision = self
            .admit(&command)
            .and_then(|()| transition::dispense(self.state, &self.transaction));
        let (to, dispense) = self.settle(&command, decision)?;

        self.commit(
            &command,
            Step {
                to,
                outcome: Outcome::Dispensed(dispense.clone()),
            },
        );
        Ok(dispense)
    }

    /// Run any command against the current state.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, VendError> {
        let decision = self.admit(&command).and_then(|()| {
            transition::apply(self.state, &command, &self.transaction, &self.catalog)
        });
        let step = self.settle(&command, decision)?;
        Ok(self.commit(&command, step))
    }

    /// Controller-level checks run before a command is decided.
    fn admit(&self, command: &Command) -> Result<(), VendError> {
        debug!(
            transaction = %self.id,
            state = self.state.name(),
            command = command.name(),
            "Handling command"
        );

        if matches!(command, Command::SelectProduct(_))
            && !self.accepts_selection.check(&self.state)
        {
            return Err(VendError::AlreadySelected);
        }
        Ok(())
    }

    fn settle<T>(&self, command: &Command, decision: Result<T, VendError>) -> Result<T, VendError> {
        decision.map_err(|err| {
            warn!(
                transaction = %self.id,
                state = self.state.name(),
                command = command.name(),
                error = %err,
                "Command rejected"
            );
            err
        })
    }

    /// Return a finished (or untouched) controller to Idle for the next
    /// customer. Stock keeps any dispensed units removed; money left behind
    /// by a canceled transaction is discarded.
    pub fn reset(&mut self) -> Result<(), VendError> {
        if !self.at_rest.check(&self.state) {
            warn!(transaction = %self.id, state = self.state.name(), "Reset refused");
            return Err(VendError::TransactionInProgress {
                state: self.state.name().to_string(),
            });
        }

        let previous = std::mem::replace(&mut self.id, Uuid::new_v4());
        info!(previous = %previous, transaction = %self.id, from = self.state.name(), "Controller reset");
        self.state = VendState::Idle;
        self.transaction = Transaction::default();
        self.history = StateHistory::new();
        Ok(())
    }

    fn commit(&mut self, command: &Command, step: Step) -> Outcome {
        match &step.outcome {
            Outcome::Selected(selection) => {
                self.transaction.selected_product = Some(selection.product.clone());
                self.transaction.price = selection.price;
            }
            Outcome::Payment(notice) => {
                self.transaction.inserted_amount = notice.total();
            }
            Outcome::Canceled => {}
            Outcome::Dispensed(dispense) => {
                let remaining = self.catalog.take_one(dispense.product.as_str());
                self.transaction.inserted_amount = Decimal::ZERO;
                self.transaction.selected_product = None;
                debug!(transaction = %self.id, product = %dispense.product, remaining, "Stock updated");
            }
        }

        let from = std::mem::replace(&mut self.state, step.to);
        self.history = self.history.record(StateTransition {
            from,
            to: step.to,
            command: command.name().to_string(),
            timestamp: Utc::now(),
        });

        info!(
            transaction = %self.id,
            from = from.name(),
            to = step.to.name(),
            "{}",
            step.outcome
        );
        step.outcome
    }

    pub fn current_state_name(&self) -> &str {
        self.state.name()
    }

    pub fn state(&self) -> VendState {
        self.state
    }

    /// Whether a new selection would be accepted right now.
    pub fn can_select(&self) -> bool {
        self.accepts_selection.check(&self.state)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn history(&self) -> &StateHistory<VendState> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn machine() -> TransactionController {
        TransactionController::new(Catalog::ticket_office())
    }

    #[test]
    fn new_controller_is_idle() {
        let machine = machine();
        assert_eq!(machine.current_state_name(), "Idle");
        assert!(machine.can_select());
        assert!(!machine.is_finished());
        assert!(machine.history().is_empty());
        assert_eq!(machine.transaction(), &Transaction::default());
    }

    #[test]
    fn selection_records_product_and_price() {
        let mut machine = machine();

        let selection = machine.select_product("metro").unwrap();

        assert_eq!(selection.price, dec!(300));
        assert_eq!(machine.state(), VendState::WaitingForPayment);
        assert_eq!(
            machine.transaction().selected_product,
            Some(ProductId::from("metro"))
        );
        assert_eq!(machine.transaction().price, dec!(300));
        assert!(!machine.can_select());
    }

    #[test]
    fn out_of_stock_product_is_rejected() {
        let catalog = Catalog::new(
            [(ProductId::from("metro"), 0)],
            [(ProductId::from("metro"), dec!(300))],
        );
        let mut machine = TransactionController::new(catalog);

        let err = machine.select_product("metro").unwrap_err();

        assert_eq!(
            err,
            VendError::ProductUnavailable {
                product: "metro".into()
            }
        );
        assert_eq!(machine.state(), VendState::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn dispense_consumes_stock_and_clears_payment() {
        let mut machine = machine();
        machine.select_product("train").unwrap();
        machine.insert_money(dec!(1000)).unwrap();

        let dispense = machine.dispense_product().unwrap();

        assert_eq!(dispense.product, ProductId::from("train"));
        assert_eq!(machine.catalog().stock("train"), 4);
        assert_eq!(machine.transaction().inserted_amount, Decimal::ZERO);
        assert_eq!(machine.transaction().selected_product, None);
        assert!(machine.is_finished());
    }

    #[test]
    fn cancel_keeps_inserted_money() {
        let mut machine = machine();
        machine.select_product("bus").unwrap();
        machine.insert_money(dec!(100)).unwrap();

        machine.cancel().unwrap();

        assert_eq!(machine.state(), VendState::Canceled);
        assert_eq!(machine.transaction().inserted_amount, dec!(100));
        assert_eq!(machine.catalog().stock("bus"), 15);
    }

    #[test]
    fn rejected_command_changes_nothing() {
        let mut machine = machine();
        machine.select_product("metro").unwrap();
        machine.insert_money(dec!(50)).unwrap();
        let before = machine.transaction().clone();
        let history_len = machine.history().len();

        assert_eq!(
            machine.dispense_product(),
            Err(VendError::InsufficientFunds)
        );
        assert_eq!(
            machine.select_product("bus"),
            Err(VendError::AlreadySelected)
        );

        assert_eq!(machine.transaction(), &before);
        assert_eq!(machine.history().len(), history_len);
        assert_eq!(machine.catalog().stock("metro"), 10);
    }

    #[test]
    fn history_records_every_accepted_command() {
        let mut machine = machine();
        machine.select_product("metro").unwrap();
        machine.insert_money(dec!(100)).unwrap();
        machine.insert_money(dec!(200)).unwrap();
        machine.dispense_product().unwrap();

        let commands: Vec<&str> = machine
            .history()
            .transitions()
            .iter()
            .map(|t| t.command.as_str())
            .collect();
        assert_eq!(
            commands,
            vec!["SelectProduct", "InsertMoney", "InsertMoney", "DispenseProduct"]
        );
        assert_eq!(
            machine.history().get_path(),
            vec![
                &VendState::Idle,
                &VendState::WaitingForPayment,
                &VendState::PaymentReceived,
                &VendState::Dispensed
            ]
        );
    }

    #[test]
    fn reset_is_refused_mid_transaction() {
        let mut machine = machine();
        machine.select_product("metro").unwrap();

        let err = machine.reset().unwrap_err();

        assert_eq!(
            err,
            VendError::TransactionInProgress {
                state: "WaitingForPayment".to_string()
            }
        );
        assert_eq!(machine.state(), VendState::WaitingForPayment);
    }

    #[test]
    fn reset_starts_a_new_transaction() {
        let mut machine = machine();
        let first_id = machine.id();
        machine.select_product("metro").unwrap();
        machine.insert_money(dec!(300)).unwrap();
        machine.dispense_product().unwrap();

        machine.reset().unwrap();

        assert_eq!(machine.state(), VendState::Idle);
        assert_ne!(machine.id(), first_id);
        assert!(machine.history().is_empty());
        assert_eq!(machine.catalog().stock("metro"), 9);

        machine.select_product("metro").unwrap();
        assert_eq!(machine.state(), VendState::WaitingForPayment);
    }

    #[test]
    fn reset_after_cancel_discards_abandoned_money() {
        let mut machine = machine();
        machine.select_product("bus").unwrap();
        machine.insert_money(dec!(100)).unwrap();
        machine.cancel().unwrap();

        machine.reset().unwrap();

        assert_eq!(machine.transaction().inserted_amount, Decimal::ZERO);
    }

    #[test]
    fn execute_accepts_raw_commands() {
        let mut machine = machine();

        let outcome = machine
            .execute(Command::SelectProduct("bus".into()))
            .unwrap();

        assert!(matches!(outcome, Outcome::Selected(_)));
        assert_eq!(
            machine.execute(Command::Cancel).unwrap(),
            Outcome::Canceled
        );
    }

    #[test]
    fn execute_rejects_selection_outside_idle() {
        let mut machine = machine();
        machine.select_product("bus").unwrap();
        machine.insert_money(dec!(40)).unwrap();
        machine.cancel().unwrap();
        let before = machine.transaction().clone();
        let history_len = machine.history().len();
        assert!(!machine.can_select());

        let result = machine.execute(Command::SelectProduct("metro".into()));

        assert_eq!(result, Err(VendError::AlreadySelected));
        assert_eq!(machine.state(), VendState::Canceled);
        assert_eq!(machine.transaction(), &before);
        assert_eq!(machine.history().len(), history_len);
    }
}
