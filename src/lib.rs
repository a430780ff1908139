//! Store Visit Simulator
//!
//! Generates a reproducible, time-ordered log of retail store visits for one
//! calendar year, ready to be handed to a charting tool as a table.
//!
//! # Overview
//!
//! Customer arrivals are simulated by repeatedly drawing a whole-hour gap from a
//! Gamma distribution whose shape depends on the month, so visits are densest in
//! winter. Arrivals outside the store's 9:00-21:00 window are pushed forward by
//! twelve hours once. Each visit records the purchased product (商品A/B/C), the
//! buyer's age and the buyer's sex, with age and sex conditioned on the product.
//!
//! The simulation stops at the first visit that rolls into the following year;
//! that visit is drawn but not kept.
//!
//! ## Quick Start
//!
//! ```rust
//! use store_visit_simulator::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let visits = simulate_year(1, start)?;
//!
//! // Same seed, same table
//! assert_eq!(visits, simulate_year(1, start)?);
//!
//! let table = to_table(&visits);
//! println!("{} visits, first at {}", table.len(), table[0].visited_at);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Products, buyer sex, identifiers and configuration
//! - [`events`]: Visit events, table rows and table output
//! - [`simulation`]: Arrival simulator, operating hours, attribute model, statistics
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod events;
pub mod simulation;
pub mod types;

// Core types and configuration
pub use types::{
    ConfigError, ConfigValidationError, OutputFormat, Product, RunId, Sex, SimulationConfig,
};

// Events and table output
pub use events::{to_table, VisitEvent, VisitRecord, VisitWriter};

// Simulation types and functionality
pub use simulation::{
    simulate_year, ArrivalSimulator, ArrivalStep, LoggingConfig, OperatingHours,
    SimulationError, SimulationResult, VisitModel, VisitStatistics, YearLog,
};
