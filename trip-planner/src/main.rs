//! Command-line entry point for the trip planner.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use trip_planner::domain::{CityName, InvalidCityName};
use trip_planner::input::{InputError, TripPlan};
use trip_planner::planner::{Planner, SearchConfig, SearchError};
use trip_planner::report::{Itinerary, PlanReport};

/// Starting city when none is given.
const DEFAULT_START: &str = "London";

/// Find the cheapest journey that rides every required trip in a plan
#[derive(Parser, Debug)]
#[command(name = "trip-planner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Plan file to load
    plan: PathBuf,

    /// City the journey starts from
    #[arg(long, default_value = DEFAULT_START)]
    start: String,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Abort the search after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

/// Output format for the itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text summary
    Human,
    /// JSON report
    Json,
}

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid start city: {0}")]
    Start(#[from] InvalidCityName),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so itineraries on stdout stay clean. `RUST_LOG`
/// overrides the defaults.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let start = CityName::parse(&cli.start)?;
    let plan = TripPlan::from_path(&cli.plan)?;

    let config = match cli.max_expansions {
        Some(limit) => SearchConfig::new(Some(limit)),
        None => SearchConfig::default(),
    };
    let planner = Planner::new(&plan.network, &config);
    let outcome = planner.find_optimal_journey(&start, &plan.required_trips)?;
    let itinerary = Itinerary::from_outcome(&outcome);

    match cli.format {
        OutputFormat::Human => print!("{itinerary}"),
        OutputFormat::Json => {
            let report = PlanReport::from_itinerary(&itinerary);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
