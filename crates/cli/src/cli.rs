//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sensor Board - live readout of every motion, environment and position sensor
#[derive(Parser, Debug)]
#[command(
    name = "sensor-board",
    author,
    version,
    about = "Live raw readings of every device sensor",
    long_about = "Hosts the sensor readout screen in a terminal.\n\n\
                  Loads a device profile, simulates its sensors, and shows the \n\
                  latest raw values of all 19 sensor kinds, \"N/A\" for absent ones."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SENSOR_BOARD_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SENSOR_BOARD_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sensor screen
    Run(RunArgs),

    /// Validate a device profile without running
    Validate(ValidateArgs),

    /// List supported sensor kinds and their availability
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Device profile (TOML or JSON); built-in reference phone when omitted
    #[arg(short, long, env = "SENSOR_BOARD_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Run time in seconds (0 = until Ctrl+C)
    #[arg(long, default_value = "0", env = "SENSOR_BOARD_DURATION")]
    pub duration: u64,

    /// Display refresh interval in milliseconds
    #[arg(long, default_value = "100", env = "SENSOR_BOARD_REFRESH_MS")]
    pub refresh_ms: u64,

    /// Hide and re-show the screen every N seconds (0 = never)
    #[arg(long, default_value = "0", env = "SENSOR_BOARD_TOGGLE_SECS")]
    pub toggle_secs: u64,

    /// Capacity of the platform to UI queue
    #[arg(long, default_value = "256", env = "SENSOR_BOARD_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "SENSOR_BOARD_METRICS_PORT")]
    pub metrics_port: u16,

    /// Do not redraw the panel; logs and summary only
    #[arg(long)]
    pub no_render: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to device profile to validate
    #[arg(short, long)]
    pub profile: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Device profile; built-in reference phone when omitted
    #[arg(short, long, env = "SENSOR_BOARD_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<&LogFormat> for observability::LogFormat {
    fn from(format: &LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

impl From<&Cli> for observability::LoggingConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            format: (&cli.log_format).into(),
            verbosity: observability::Verbosity::from_flags(cli.verbose, cli.quiet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["sensor-board", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.profile.is_none());
        assert_eq!(args.refresh_ms, 100);
        assert_eq!(args.queue_capacity, 256);
        assert_eq!(args.metrics_port, 0);
    }

    #[test]
    fn test_validate_requires_profile() {
        assert!(Cli::try_parse_from(["sensor-board", "validate"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sensor-board", "-q", "-v", "info"]).is_err());
    }

    #[test]
    fn test_logging_config_from_flags() {
        use observability::{LoggingConfig, Verbosity};

        let cli = Cli::try_parse_from(["sensor-board", "-vv", "--log-format", "json", "info"])
            .unwrap();
        let config = LoggingConfig::from(&cli);
        assert_eq!(config.format, observability::LogFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Trace);

        let cli = Cli::try_parse_from(["sensor-board", "-q", "info"]).unwrap();
        let config = LoggingConfig::from(&cli);
        assert_eq!(config.format, observability::LogFormat::Pretty);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }
}
