//! Tests for writing the visit table and the run statistics
//!
//! A simulated year is written to temporary files and read back to check the
//! table keeps one raw row per visit with the expected columns.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::BufWriter;
use store_visit_simulator::events::columns;
use store_visit_simulator::simulation::{ArrivalSimulator, OperatingHours, VisitStatistics};
use store_visit_simulator::types::{OutputFormat, Product, RunId};
use store_visit_simulator::{to_table, VisitRecord, VisitWriter, YearLog};

fn simulated_log(seed: u64) -> YearLog {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    ArrivalSimulator::standard().unwrap().run(start, &mut StdRng::seed_from_u64(seed)).unwrap()
}

/// Test that JSON Lines output has one parseable row per visit
#[test]
fn test_json_lines_file() {
    let log = simulated_log(1);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.jsonl");

    let mut writer =
        VisitWriter::new(BufWriter::new(File::create(&path).unwrap()), OutputFormat::Json);
    writer.write_all(&log.events).unwrap();
    writer.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let records: Vec<VisitRecord> =
        content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();

    assert_eq!(records, to_table(&log.events));

    let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    for column in columns::ALL {
        assert!(first.get(column).is_some(), "missing column {}", column);
    }
}

/// Test that CSV output has a header and one line per visit
#[test]
fn test_csv_file() {
    let log = simulated_log(2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("visits.csv");

    let mut writer =
        VisitWriter::new(BufWriter::new(File::create(&path).unwrap()), OutputFormat::Csv);
    let rows = writer.write_all(&log.events).unwrap();
    writer.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(rows, log.events.len());
    assert_eq!(lines.len(), log.events.len() + 1);
    assert_eq!(lines[0], "来客時間,購入商品,年齢,性別");

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 4);
    assert!(fields[0].starts_with("2000-"));
    assert!(fields[1].parse::<Product>().is_ok());
    assert!(fields[2].parse::<i32>().is_ok());
}

/// Test that statistics agree with the raw table
#[test]
fn test_statistics_match_table() {
    let log = simulated_log(3);
    let stats = VisitStatistics::from_log(RunId::new(), 3, &OperatingHours::standard(), &log);

    assert_eq!(stats.total_visits, log.events.len());
    assert_eq!(stats.out_of_window_visits, 0);
    assert!(stats.deferred_visits > 0);

    let product_sum: usize = Product::ALL.iter().map(|p| stats.product_visits(*p)).sum();
    assert_eq!(product_sum, stats.total_visits);

    let monthly_sum: usize = (1..=12).map(|month| stats.month_total(month)).sum();
    assert_eq!(monthly_sum, stats.total_visits);

    for month in 1..=12 {
        let from_table = log.events.iter().filter(|e| e.month() == month).count();
        assert_eq!(stats.month_total(month), from_table);
    }
}

/// Test that winter months see more visits than summer months
#[test]
fn test_seasonality_in_monthly_counts() {
    let mut december = 0;
    let mut june = 0;
    for seed in 1..=5 {
        let log = simulated_log(seed);
        let stats = VisitStatistics::from_log(RunId::new(), seed, &OperatingHours::standard(), &log);
        december += stats.month_total(12);
        june += stats.month_total(6);
    }
    assert!(december > june, "december {} vs june {}", december, june);
}

/// Test that statistics can be written as JSON and read back
#[test]
fn test_statistics_json_file() {
    let log = simulated_log(4);
    let stats = VisitStatistics::from_log(RunId::new(), 4, &OperatingHours::standard(), &log);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    fs::write(&path, serde_json::to_string_pretty(&stats).unwrap()).unwrap();

    let loaded: VisitStatistics =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.run_id, stats.run_id);
    assert_eq!(loaded.total_visits, stats.total_visits);
    assert_eq!(loaded.visits_by_product, stats.visits_by_product);
}
