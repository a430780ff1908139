//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are parsed and layered over
//! configuration files and defaults.

use clap::Parser;
use std::io::Write;
use store_visit_simulator::types::config::{CliArgs, SimulationConfig};
use store_visit_simulator::OutputFormat;

fn parse(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["store-visit-simulator"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).unwrap()
}

/// Test parsing with no arguments
#[test]
fn test_no_arguments() {
    let args = parse(&[]);
    assert!(args.config.is_none());
    assert!(args.seed.is_none());
    assert!(args.year.is_none());
    assert!(!args.verbose);
    assert!(!args.debug);
    assert!(!args.dry_run);
    assert!(!args.print_config);

    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert_eq!(config.seed, 1);
    assert_eq!(config.year, 2000);
    config.validate().unwrap();
}

/// Test parsing of every value flag
#[test]
fn test_value_flags() {
    let args = parse(&[
        "--seed",
        "99",
        "--year",
        "2010",
        "--opening-hour",
        "8",
        "--closing-hour",
        "20",
        "--deferral-hours",
        "11",
        "--output-format",
        "csv",
        "-o",
        "out.csv",
        "--statistics-output",
        "stats.json",
    ]);
    let config = SimulationConfig::from_cli_args(args).unwrap();

    assert_eq!(config.seed, 99);
    assert_eq!(config.year, 2010);
    assert_eq!(config.opening_hour, 8);
    assert_eq!(config.closing_hour, 20);
    assert_eq!(config.deferral_hours, 11);
    assert_eq!(config.get_output_format().unwrap(), OutputFormat::Csv);
    assert_eq!(config.output_path.as_deref(), Some("out.csv"));
    assert_eq!(config.statistics_output.as_deref(), Some("stats.json"));
    config.validate().unwrap();
}

/// Test boolean flags with short forms
#[test]
fn test_boolean_flags() {
    let args = parse(&["-v", "-d", "--dry-run", "--print-config"]);
    assert!(args.verbose);
    assert!(args.debug);
    assert!(args.dry_run);
    assert!(args.print_config);
}

/// Test that malformed values are rejected by the parser
#[test]
fn test_invalid_values() {
    assert!(CliArgs::try_parse_from(["store-visit-simulator", "--seed", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(["store-visit-simulator", "--year", "soon"]).is_err());
    assert!(CliArgs::try_parse_from(["store-visit-simulator", "--unknown"]).is_err());
}

/// Test that values which parse but make no sense fail validation
#[test]
fn test_validation_after_parsing() {
    let config =
        SimulationConfig::from_cli_args(parse(&["--opening-hour", "22", "--closing-hour", "9"]))
            .unwrap();
    assert!(config.validate().is_err());

    let config = SimulationConfig::from_cli_args(parse(&["--output-format", "xml"])).unwrap();
    assert!(config.validate().is_err());
}

/// Test layering of file settings under CLI flags
#[test]
fn test_config_file_layering() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"seed": 5, "year": 2012, "output_format": "csv", "output_path": "from-file.csv"}}"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config =
        SimulationConfig::from_cli_args(parse(&["--config", &path, "--year", "2013"])).unwrap();
    assert_eq!(config.seed, 5);
    assert_eq!(config.year, 2013);
    assert_eq!(config.output_format, "csv");
    assert_eq!(config.output_path.as_deref(), Some("from-file.csv"));
}

/// Test that a broken config file is reported
#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{ not json").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    assert!(SimulationConfig::from_cli_args(parse(&["--config", &path])).is_err());
}

/// Test saving and reloading a configuration
#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = SimulationConfig { seed: 77, year: 2005, ..Default::default() };
    config.save_to_file(&path).unwrap();

    let loaded = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(loaded.seed, 77);
    assert_eq!(loaded.year, 2005);
    assert_eq!(loaded.closing_hour, 21);
}
