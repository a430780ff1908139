//! Simulation of the store's visit log
//!
//! This module contains the arrival simulator, the store's operating hours,
//! the per-visit attribute model, statistics collection and error handling.
//!
//! # Overview
//!
//! - **ArrivalSimulator**: Advances a clock by seasonal Gamma gaps and records visits
//! - **OperatingHours**: The 9:00-21:00 window and the single 12 hour deferral
//! - **VisitModel**: Product mix with per-product age and sex distributions
//! - **VisitStatistics**: Post-run summary for the operator
//! - **SimulationError**: Error handling around a run
//!
//! # Usage Example
//!
//! ```rust
//! use store_visit_simulator::simulation::*;
//! use chrono::{Datelike, NaiveDate, Timelike};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let simulator = ArrivalSimulator::standard().unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let visits = simulator.simulate_year(start, &mut rng).unwrap();
//! assert!(visits.iter().all(|visit| visit.timestamp.year() == 2000));
//! assert!(visits.iter().all(|visit| (9..=21).contains(&visit.timestamp.hour())));
//! ```

pub mod arrival;
pub mod error;
pub mod logging;
pub mod model;
pub mod operating_hours;
pub mod statistics;

// Re-export all public types for convenience
pub use arrival::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use operating_hours::*;
pub use statistics::*;
