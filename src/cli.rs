//! Command-line interface argument parsing

use clap::Parser;
use std::path::PathBuf;

/// routewise - delivery risk analysis for a driving route
///
/// Geocodes both locations, fetches the route, hourly weather, destination
/// country metadata and public holidays, then prints a risk report.
///
/// Examples:
///   routewise --origin London --destination Paris
///   routewise -o "Hamburg, Germany" -d Vienna --year 2026 --format json
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Origin location (city, address, landmark)
    #[arg(short, long)]
    pub origin: String,

    /// Destination location (city, address, landmark)
    #[arg(short, long)]
    pub destination: String,

    /// Year for the public holiday lookup (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Hourly weather samples per location (defaults to the configured value)
    #[arg(long, value_name = "HOURS", value_parser = clap::value_parser!(u32).range(1..=384))]
    pub hours: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for routewise/config.toml in the user config directory
    #[arg(short, long, value_name = "FILE", env = "ROUTEWISE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON with the analysis, histogram and risk assessment
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_minimal_arguments() {
        let args = Args::try_parse_from(["routewise", "-o", "London", "-d", "Paris"]).unwrap();
        assert_eq!(args.origin, "London");
        assert_eq!(args.destination, "Paris");
        assert_eq!(args.year, None);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_arguments() {
        let args = Args::try_parse_from([
            "routewise",
            "--origin",
            "Hamburg",
            "--destination",
            "Vienna",
            "--year",
            "2026",
            "--hours",
            "48",
            "--format",
            "json",
            "--config",
            "routewise.toml",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2026));
        assert_eq!(args.hours, Some(48));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("routewise.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_config_path_from_environment() {
        unsafe {
            std::env::set_var("ROUTEWISE_CONFIG_FILE", "/etc/routewise/config.toml");
        }
        let args = Args::try_parse_from(["routewise", "-o", "A", "-d", "B"]);
        unsafe {
            std::env::remove_var("ROUTEWISE_CONFIG_FILE");
        }

        assert_eq!(
            args.unwrap().config,
            Some(PathBuf::from("/etc/routewise/config.toml"))
        );
    }

    #[test]
    fn test_zero_hours_is_rejected() {
        let result =
            Args::try_parse_from(["routewise", "-o", "A", "-d", "B", "--hours", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_destination_is_required() {
        assert!(Args::try_parse_from(["routewise", "-o", "London"]).is_err());
    }
}
