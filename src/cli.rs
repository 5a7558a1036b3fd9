//! Command-line interface for `tripbudget`

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, instrument};

use crate::config::TripBudgetConfig;
use crate::payload::PlannerInput;
use crate::report::BudgetReport;
use crate::{Result, TripBudgetError};

/// Budget reconciliation for itinerary planning
#[derive(Parser, Debug)]
#[command(name = "tripbudget")]
#[command(version)]
#[command(
    about = "Reconcile an itinerary's budget allocation against its accommodation",
    long_about = None
)]
pub struct Args {
    /// Itinerary JSON file; reads stdin when omitted or "-"
    #[arg(value_name = "PAYLOAD")]
    pub payload: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Nights to assume when the payload has neither dates nor days
    #[arg(long, value_name = "N")]
    pub fallback_nights: Option<u32>,

    /// Verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the effective configuration
    Config,
}

/// How the report is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(config: &mut TripBudgetConfig, args: &Args) -> Result<()> {
    if let Some(nights) = args.fallback_nights {
        if nights == 0 {
            return Err(TripBudgetError::validation(
                "--fallback-nights must be at least 1",
            ));
        }
        config.defaults.fallback_nights = nights;
    }
    config
        .validate()
        .map_err(|err| TripBudgetError::validation(format!("{err:#}")))
}

/// Read the payload from a file, or stdin for `None` and `-`
#[instrument(level = "debug")]
pub fn read_input(path: Option<&PathBuf>) -> Result<PlannerInput> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            debug!(path = %path.display(), "Reading payload file");
            let file = File::open(path)?;
            PlannerInput::from_reader(BufReader::new(file))
        }
        _ => {
            debug!("Reading payload from stdin");
            PlannerInput::from_reader(io::stdin().lock())
        }
    }
}

/// Build the report and write it in the requested format
pub fn run_report<W: Write>(args: &Args, config: &TripBudgetConfig, out: &mut W) -> anyhow::Result<()> {
    let input = read_input(args.payload.as_ref())?;
    let report = BudgetReport::build(&input, &config.defaults);

    match args.format {
        OutputFormat::Text => write!(out, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Print the effective configuration as TOML-like key/value lines
pub fn print_config<W: Write>(config: &TripBudgetConfig, source: &Path, out: &mut W) -> io::Result<()> {
    if source.exists() {
        writeln!(out, "Using config from: {}", source.display())?;
    } else {
        writeln!(out, "Using defaults ({} not found)", source.display())?;
    }
    writeln!(out, "[defaults]")?;
    writeln!(out, "fallback_nights = {}", config.defaults.fallback_nights)?;
    writeln!(out, "currency = \"{}\"", config.defaults.currency)?;
    writeln!(out, "[logging]")?;
    writeln!(out, "level = \"{}\"", config.logging.level)?;
    writeln!(out, "format = \"{}\"", config.logging.format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from(["tripbudget", "-vv", "--format", "json", "--fallback-nights", "3", "trip.json"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.fallback_nights, Some(3));
        assert_eq!(args.payload, Some(PathBuf::from("trip.json")));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_config_subcommand() {
        let args = Args::parse_from(["tripbudget", "config"]);
        assert!(matches!(args.command, Some(Commands::Config)));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = TripBudgetConfig::default();
        let args = Args::parse_from(["tripbudget", "--fallback-nights", "4"]);
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.defaults.fallback_nights, 4);

        let args = Args::parse_from(["tripbudget", "--fallback-nights", "0"]);
        assert!(matches!(
            apply_overrides(&mut config, &args),
            Err(TripBudgetError::Validation { .. })
        ));
    }

    #[rstest]
    #[case("366")]
    #[case("100000")]
    fn test_apply_overrides_rejects_out_of_range(#[case] nights: &str) {
        let mut config = TripBudgetConfig::default();
        let args = Args::parse_from(["tripbudget", "--fallback-nights", nights]);

        let err = apply_overrides(&mut config, &args).unwrap_err();
        assert!(matches!(err, TripBudgetError::Validation { .. }));
        assert!(err.to_string().contains("cannot exceed 365"));
    }

    #[test]
    fn test_apply_overrides_accepts_upper_bound() {
        let mut config = TripBudgetConfig::default();
        let args = Args::parse_from(["tripbudget", "--fallback-nights", "365"]);
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.defaults.fallback_nights, 365);
    }

    #[test]
    fn test_print_config() {
        let mut out = Vec::new();
        let source = PathBuf::from("/nonexistent/tripbudget.toml");
        print_config(&TripBudgetConfig::default(), &source, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Using defaults (/nonexistent/tripbudget.toml not found)"));
        assert!(text.contains("fallback_nights = 7"));
        assert!(text.contains("currency = \"USD\""));
    }

    #[test]
    fn test_print_config_names_selected_file() {
        let source = std::env::temp_dir().join(format!("tripbudget-print-{}.toml", std::process::id()));
        std::fs::write(&source, "").unwrap();

        let mut out = Vec::new();
        print_config(&TripBudgetConfig::default(), &source, &mut out).unwrap();
        std::fs::remove_file(&source).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("Using config from: {}", source.display())));
    }

    #[test]
    fn test_missing_payload_file() {
        let err = read_input(Some(&PathBuf::from("/nonexistent/trip.json"))).unwrap_err();
        assert!(matches!(err, TripBudgetError::Io { .. }));
    }
}
