//! Reference transaction scenarios run by the demo binary.

use super::args::ScenarioChoice;
use crate::catalog::Catalog;
use crate::controller::{Command, Outcome, TransactionController, VendError, VendState};
use crate::core::StateHistory;
use rust_decimal_macros::dec;
use std::fmt;
use tracing::info_span;

/// A scripted sequence of commands against a fresh controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// metro, pay 300, dispense
    Purchase,
    /// bus, cancel
    CancelBeforePayment,
    /// train, pay 1000, cancel
    CancelAfterPayment,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Purchase,
        Scenario::CancelBeforePayment,
        Scenario::CancelAfterPayment,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Purchase => "Successful Purchase",
            Self::CancelBeforePayment => "Cancellation Before Payment",
            Self::CancelAfterPayment => "Cancellation After Payment",
        }
    }

    pub fn commands(&self) -> Vec<Command> {
        match self {
            Self::Purchase => vec![
                Command::SelectProduct("metro".into()),
                Command::InsertMoney(dec!(300)),
                Command::DispenseProduct,
            ],
            Self::CancelBeforePayment => {
                vec![Command::SelectProduct("bus".into()), Command::Cancel]
            }
            Self::CancelAfterPayment => vec![
                Command::SelectProduct("train".into()),
                Command::InsertMoney(dec!(1000)),
                Command::Cancel,
            ],
        }
    }

    /// Run against a fresh controller stocked with a copy of `catalog`.
    pub fn run(&self, catalog: &Catalog) -> ScenarioReport {
        let span = info_span!("scenario", name = self.title());
        let _guard = span.enter();

        let mut machine = TransactionController::new(catalog.clone());
        let steps = self
            .commands()
            .into_iter()
            .map(|command| {
                let name = command.name();
                StepReport {
                    command: name,
                    result: machine.execute(command),
                }
            })
            .collect();

        ScenarioReport {
            scenario: *self,
            steps,
            final_state: machine.state(),
            catalog: machine.catalog().clone(),
            history: machine.history().clone(),
        }
    }
}

impl From<ScenarioChoice> for Vec<Scenario> {
    fn from(choice: ScenarioChoice) -> Self {
        match choice {
            ScenarioChoice::All => Scenario::ALL.to_vec(),
            ScenarioChoice::Purchase => vec![Scenario::Purchase],
            ScenarioChoice::CancelBeforePayment => vec![Scenario::CancelBeforePayment],
            ScenarioChoice::CancelAfterPayment => vec![Scenario::CancelAfterPayment],
        }
    }
}

/// One command and what the controller answered.
#[derive(Clone, Debug)]
pub struct StepReport {
    pub command: &'static str,
    pub result: Result<Outcome, VendError>,
}

/// Everything a scenario run produced.
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub steps: Vec<StepReport>,
    pub final_state: VendState,
    pub catalog: Catalog,
    pub history: StateHistory<VendState>,
}

impl ScenarioReport {
    pub fn rejected(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| step.result.is_err())
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.scenario.title())?;
        for step in &self.steps {
            match &step.result {
                Ok(outcome) => writeln!(f, "{outcome}")?,
                Err(err) => writeln!(f, "{} failed: {err}", step.command)?,
            }
        }
        write!(f, "State: {}", self.final_state)
    }
}
