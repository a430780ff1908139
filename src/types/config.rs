//! Configuration structures for the store visit simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the seed, the simulated year, the store's operating window and
//! where the generated table is written.

use super::OutputFormat;
use crate::simulation::OperatingHours;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Store operating window defaults
pub mod store_hours {
    /// First hour of the day (inclusive) a visit may be recorded at
    pub const OPENING_HOUR: u32 = 9;

    /// Last hour of the day (inclusive) a visit may be recorded at
    pub const CLOSING_HOUR: u32 = 21;

    /// Hours a visit arriving outside the window is pushed forward by
    pub const DEFERRAL_HOURS: u32 = 12;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "store-visit-simulator",
    version = "0.1.0",
    about = "Store Visit Simulator - Generates a one-year log of simulated retail visits",
    long_about = "Generates a time-ordered table of store visits for one calendar year. Visit gaps follow a seasonal Gamma distribution, visits outside opening hours are pushed forward by a fixed deferral, and every visit carries the purchased product, the buyer's age and the buyer's sex.

EXAMPLES:
    # Run with default settings (seed 1, year 2000, JSON Lines to stdout)
    store-visit-simulator

    # Use a configuration file
    store-visit-simulator --config config.json

    # Write CSV for another year
    store-visit-simulator --year 2024 --output-format csv --output visits.csv

    # Generate configuration template
    store-visit-simulator --print-config > my-config.json

    # Validate configuration without running
    store-visit-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Random seed for reproducible results
    #[arg(
        long,
        help = "Random seed for reproducible results",
        long_help = "Seed for the random generator. The same seed always yields the same table. Default: 1"
    )]
    pub seed: Option<u64>,

    /// Calendar year to simulate
    #[arg(long, help = "Calendar year to simulate (default: 2000)")]
    pub year: Option<i32>,

    /// First open hour of the store
    #[arg(long, help = "Opening hour, inclusive (0-23)")]
    pub opening_hour: Option<u32>,

    /// Last open hour of the store
    #[arg(long, help = "Closing hour, inclusive (0-23)")]
    pub closing_hour: Option<u32>,

    /// Hours an out-of-window visit is pushed forward by
    #[arg(long, help = "Hours to defer a visit arriving outside opening hours")]
    pub deferral_hours: Option<u32>,

    /// Output format for the visit table
    #[arg(
        long,
        help = "Output format (json or csv)",
        long_help = "Output format for the visit table. Supported formats: json (JSON Lines), csv. Default: json"
    )]
    pub output_format: Option<String>,

    /// Output path for the visit table
    #[arg(short, long, help = "Output file for the visit table (default: stdout)")]
    pub output: Option<String>,

    /// Output path for the statistics report
    #[arg(long, help = "Write the run statistics as JSON to this path")]
    pub statistics_output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Calendar year to simulate
    pub year: Option<i32>,

    /// First open hour of the store
    pub opening_hour: Option<u32>,

    /// Last open hour of the store
    pub closing_hour: Option<u32>,

    /// Hours an out-of-window visit is pushed forward by
    pub deferral_hours: Option<u32>,

    /// Output format for the visit table
    pub output_format: Option<String>,

    /// Output path for the visit table
    pub output_path: Option<String>,

    /// Output path for the statistics report
    pub statistics_output: Option<String>,
}

/// Configuration for the store visit simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducible results
    pub seed: u64,

    /// Calendar year to simulate
    pub year: i32,

    /// First open hour of the store (inclusive)
    pub opening_hour: u32,

    /// Last open hour of the store (inclusive)
    pub closing_hour: u32,

    /// Hours an out-of-window visit is pushed forward by
    pub deferral_hours: u32,

    /// Output format for the visit table
    pub output_format: String,

    /// Output path for the visit table, stdout when absent
    pub output_path: Option<String>,

    /// Output path for the statistics report
    pub statistics_output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// An hour is not a valid hour of the day
    #[error("Invalid {field}: {value} (must be between 0 and 23)")]
    InvalidHour {
        /// Name of the field with the invalid hour
        field: String,
        /// The invalid hour
        value: u32,
    },

    /// Opening hour is after closing hour
    #[error("Invalid operating window: opening hour ({0}) must be <= closing hour ({1})")]
    InvalidOperatingWindow(u32, u32),

    /// Deferral must move the clock but stay below one day
    #[error("Deferral hours must be between 1 and 23, got {0}")]
    InvalidDeferralHours(u32),

    /// The year or the one after it cannot be represented
    #[error("Year {0} cannot be simulated")]
    InvalidYear(i32),

    /// Output format is unknown
    #[error("{0}")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            year: 2000,
            opening_hour: store_hours::OPENING_HOUR,
            closing_hour: store_hours::CLOSING_HOUR,
            deferral_hours: store_hours::DEFERRAL_HOURS,
            output_format: "json".to_string(),
            output_path: None,
            statistics_output: None,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            seed: config_file.seed.unwrap_or(defaults.seed),
            year: config_file.year.unwrap_or(defaults.year),
            opening_hour: config_file.opening_hour.unwrap_or(defaults.opening_hour),
            closing_hour: config_file.closing_hour.unwrap_or(defaults.closing_hour),
            deferral_hours: config_file.deferral_hours.unwrap_or(defaults.deferral_hours),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            output_path: config_file.output_path.or(defaults.output_path),
            statistics_output: config_file.statistics_output.or(defaults.statistics_output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.seed {
            config.seed = value;
        }
        if let Some(value) = args.year {
            config.year = value;
        }
        if let Some(value) = args.opening_hour {
            config.opening_hour = value;
        }
        if let Some(value) = args.closing_hour {
            config.closing_hour = value;
        }
        if let Some(value) = args.deferral_hours {
            config.deferral_hours = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.output {
            config.output_path = Some(value);
        }
        if let Some(value) = args.statistics_output {
            config.statistics_output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_hour("opening_hour", self.opening_hour)?;
        self.validate_hour("closing_hour", self.closing_hour)?;

        if self.opening_hour > self.closing_hour {
            return Err(ConfigValidationError::InvalidOperatingWindow(
                self.opening_hour,
                self.closing_hour,
            ));
        }

        if self.deferral_hours == 0 || self.deferral_hours > 23 {
            return Err(ConfigValidationError::InvalidDeferralHours(self.deferral_hours));
        }

        self.start_time()?;
        // The rollover visit lands in the following year
        if self.year.checked_add(1).and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1)).is_none() {
            return Err(ConfigValidationError::InvalidYear(self.year));
        }

        self.get_output_format().map_err(ConfigValidationError::InvalidOutputFormat)?;

        Ok(())
    }

    /// Helper method to validate hour-of-day values
    fn validate_hour(&self, field: &str, value: u32) -> Result<(), ConfigValidationError> {
        if value > 23 {
            return Err(ConfigValidationError::InvalidHour { field: field.to_string(), value });
        }
        Ok(())
    }

    /// First instant of the simulated year
    pub fn start_time(&self) -> Result<NaiveDateTime, ConfigValidationError> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(ConfigValidationError::InvalidYear(self.year))
    }

    /// Operating window of the store
    pub fn operating_hours(&self) -> OperatingHours {
        OperatingHours::new(self.opening_hour, self.closing_hour, self.deferral_hours)
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}
