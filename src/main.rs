use std::process::ExitCode;
use tracing::{error, info};
use vending_controller::cli;

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

fn main() -> ExitCode {
    setup_tracing();
    let args = cli::parse_args();

    let catalog = match args.load_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, "Could not load catalog");
            return ExitCode::FAILURE;
        }
    };
    info!(products = catalog.inventory().len(), "Catalog loaded");

    for (index, scenario) in args.scenarios().into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        let report = scenario.run(&catalog);
        println!("{report}");

        if args.history {
            match serde_json::to_string_pretty(&report.history) {
                Ok(json) => println!("{json}"),
                Err(err) => error!(error = %err, "Could not serialize history"),
            }
        }
    }

    ExitCode::SUCCESS
}
