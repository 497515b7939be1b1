//! nutrilog
//!
//! Summarizes a calorie-changes log against a food-nutrition table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutrilog::build_info;
use nutrilog::config::{Overrides, Settings};
use nutrilog::tools::summary::{self, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "nutrilog", version, about)]
struct Cli {
    /// JSON settings file (defaults to $NUTRILOG_SETTINGS, then settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Calorie-changes log (CSV)
    #[arg(long)]
    calorie_changes: Option<PathBuf>,

    /// Food-nutrition table (CSV)
    #[arg(long)]
    food_nutrition: Option<PathBuf>,

    /// ingredient, item, day, week, month, year, decade, century or eon
    #[arg(short, long)]
    granularity: Option<String>,

    /// strict or lenient handling of unknown amount units
    #[arg(long)]
    unit_policy: Option<String>,

    /// Daily calorie goal shown next to day totals
    #[arg(long)]
    daily_target: Option<f64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the granularity labels and exit
    #[arg(long)]
    list_granularities: bool,

    /// Skip the startup banner
    #[arg(short, long)]
    quiet: bool,
}

fn resolve_settings(cli: &Cli) -> Result<Settings, String> {
    let overrides = Overrides {
        calorie_changes_path: cli.calorie_changes.clone(),
        food_nutrition_path: cli.food_nutrition.clone(),
        granularity: cli.granularity.clone(),
        unit_policy: cli.unit_policy.clone(),
        daily_calorie_target: cli.daily_target,
    };

    Settings::load(cli.settings.as_deref())
        .and_then(|settings| settings.with_overrides(overrides))
        .map_err(|e| e.to_string())
}

fn run(cli: &Cli) -> Result<(), String> {
    if cli.list_granularities {
        println!("{}", summary::list_granularities());
        return Ok(());
    }

    let settings = resolve_settings(cli)?;
    tracing::info!(
        "Summarizing {} against {} by {} ({} units)",
        settings.calorie_changes_path.display(),
        settings.food_nutrition_path.display(),
        settings.granularity,
        settings.unit_policy.as_str()
    );

    let response = summary::run(&settings)?;
    print!("{}", summary::render(&response, cli.format)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the table
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "nutrilog=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !cli.quiet && cli.format == OutputFormat::Table {
        build_info::print_startup_banner();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
