use std::io;
use std::process::ExitCode;

use clap::Parser;
use tripbudget::cli::{self, Args, Commands};
use tripbudget::{TripBudgetConfig, TripBudgetError, telemetry};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<TripBudgetError>() {
                Some(known) => eprintln!("Error: {}", known.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            tracing::debug!(error = ?err, "Exiting with failure");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = TripBudgetConfig::resolve_path(args.config.clone());
    let mut config = TripBudgetConfig::load_from_path(args.config.clone())?;
    cli::apply_overrides(&mut config, args)?;

    // The subscriber depends on the loaded logging settings
    telemetry::init_tracing(&config.logging, args.verbose);
    tracing::debug!(
        path = %source.display(),
        found = source.exists(),
        fallback_nights = config.defaults.fallback_nights,
        "Configuration loaded"
    );

    let mut stdout = io::stdout().lock();
    match args.command {
        Some(Commands::Config) => cli::print_config(&config, &source, &mut stdout)?,
        None => cli::run_report(args, &config, &mut stdout)?,
    }
    Ok(())
}
