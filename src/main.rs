// Store Visit Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/store-visit-simulator > visits.jsonl
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/store-visit-simulator --seed 7 --year 2024 --output-format csv --output visits.csv --verbose
// ```

use anyhow::{anyhow, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::time::Instant;
use store_visit_simulator::simulation::{
    ArrivalSimulator, LoggingConfig, VisitModel, VisitStatistics,
};
use store_visit_simulator::types::config::CliArgs;
use store_visit_simulator::types::{RunId, SimulationConfig};
use store_visit_simulator::VisitWriter;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Store Visit Simulator");

    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_configuration_summary(&config);

    if let Err(e) = run_simulation(&config) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Store Visit Simulator completed successfully");
}

/// Simulate the configured year, write the table and report statistics
fn run_simulation(config: &SimulationConfig) -> anyhow::Result<()> {
    let run_id = RunId::new();
    let start_time = Instant::now();
    let start = config.start_time()?;
    let hours = config.operating_hours();
    let format = config.get_output_format().map_err(|e| anyhow!(e))?;

    info!(%run_id, seed = config.seed, year = config.year, "Running simulation");

    let simulator = ArrivalSimulator::new(hours, &VisitModel::standard())
        .context("Failed to build arrival simulator")?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let log = match simulator.run(start, &mut rng) {
        Ok(log) => log,
        Err(e) => {
            error!(category = e.category(), "Simulation run failed: {}", e);
            return Err(e).context("Simulation run failed");
        }
    };

    let sink: Box<dyn Write> = match &config.output_path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output file '{}'", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = VisitWriter::new(BufWriter::new(sink), format);
    let rows = writer.write_all(&log.events).context("Failed to write visit table")?;
    writer.finish().context("Failed to flush visit table")?;

    if let Some(path) = &config.output_path {
        info!(rows, path = %path, "Visit table written");
        eprintln!("Wrote {} visits to {}", rows, path);
    }

    let mut statistics = VisitStatistics::from_log(run_id, config.seed, &hours, &log);
    statistics.set_simulation_duration(start_time.elapsed());

    if let Some(path) = &config.statistics_output {
        let json = serde_json::to_string_pretty(&statistics)
            .context("Failed to serialize statistics")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write statistics to '{}'", path))?;
        info!(path = %path, "Statistics written");
    }

    eprintln!("{}", statistics.generate_report());
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Store Visit Simulator");
    eprintln!("=====================");
    eprintln!("Configuration:");
    eprintln!("  Seed: {}", config.seed);
    eprintln!("  Year: {}", config.year);
    eprintln!(
        "  Operating Hours: {:02}:00 - {:02}:59 (deferral {}h)",
        config.opening_hour, config.closing_hour, config.deferral_hours
    );
    eprintln!("  Output Format: {}", config.output_format);
    eprintln!("  Output: {}", config.output_path.as_deref().unwrap_or("stdout"));
    if let Some(path) = &config.statistics_output {
        eprintln!("  Statistics Output: {}", path);
    }
    eprintln!();
}
