mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use routewise::config::LoggingConfig;
use routewise::report::Report;
use routewise::{AnalysisError, Aggregator, RoutewiseConfig};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cli::{Args, OutputFormat};

fn main() {
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => RoutewiseConfig::load_from_path(Some(path.clone())),
        None => RoutewiseConfig::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging, args.verbose);
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args, &config) {
        error!("Analysis failed: {:#}", e);
        eprintln!("Error: {e}");
        if let Some(analysis_error) = e.downcast_ref::<AnalysisError>() {
            eprintln!("{}", analysis_error.user_message());
        }
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("routewise={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn run(args: &Args, config: &RoutewiseConfig) -> Result<()> {
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let hours = args.hours.unwrap_or(config.defaults.forecast_hours);

    let aggregator = Aggregator::from_config(config)?;

    let start = Instant::now();
    let analysis = aggregator.analyse(&args.origin, &args.destination, year, hours)?;
    info!("Analysis finished in {:.2}s", start.elapsed().as_secs_f64());

    let report = Report::new(&analysis);
    match args.format {
        OutputFormat::Text => {
            let from = preview_start(year, today);
            print!("{}", report.render_text(from, config.defaults.upcoming_holidays));
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Preview holidays from today for the current year, else from the year's start
fn preview_start(year: i32, today: NaiveDate) -> NaiveDate {
    if year == today.year() {
        today
    } else {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today)
    }
}
