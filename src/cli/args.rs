use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run the reference vending scenarios against a fresh controller each
#[derive(Parser, Debug)]
#[command(name = "vending-demo")]
#[command(about = "Run the reference vending transaction scenarios", long_about = None)]
pub struct CliArgs {
    /// JSON catalog to stock the machine with
    #[arg(
        long = "catalog",
        value_name = "PATH",
        help = "JSON catalog with 'inventory' and 'prices' tables (default: metro/bus/train ticket office)"
    )]
    pub catalog: Option<PathBuf>,

    /// Which scenario to run
    #[arg(
        long = "scenario",
        value_name = "SCENARIO",
        default_value = "all",
        help = "Scenario to run: 'all', 'purchase', 'cancel-before-payment' or 'cancel-after-payment'"
    )]
    pub scenario: ScenarioChoice,

    /// Print each transaction history as JSON after its scenario
    #[arg(long = "history")]
    pub history: bool,
}

/// Scenario selection on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScenarioChoice {
    All,
    Purchase,
    CancelBeforePayment,
    CancelAfterPayment,
}
