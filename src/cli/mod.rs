// CLI module
// Argument parsing and the scripted scenarios behind the demo binary

mod args;
mod scenario;

pub use args::{CliArgs, ScenarioChoice};
pub use scenario::{Scenario, ScenarioReport, StepReport};

use crate::catalog::{Catalog, CatalogError};
use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

impl CliArgs {
    /// Load the catalog named on the command line, or the ticket office
    /// default when none was given.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::ticket_office()),
        }
    }

    pub fn scenarios(&self) -> Vec<Scenario> {
        self.scenario.into()
    }
}
