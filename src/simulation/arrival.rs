//! Seasonal arrival simulator
//!
//! Generates one calendar year of store visits. The clock advances by Gamma
//! distributed whole-hour gaps whose shape follows the month, arrivals outside
//! opening hours are deferred once, and each visit gets product, age and sex
//! drawn from the [`VisitModel`].

use chrono::{Datelike, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma};
use tracing::{debug, info, instrument, warn};

use crate::events::VisitEvent;
use crate::simulation::{
    seasonal_shape, AttributeSampler, OperatingHours, SimulationError, SimulationResult,
    VisitModel,
};

/// Result of a single simulated arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalStep {
    /// The recorded visit
    pub event: VisitEvent,
    /// Whether the out-of-hours deferral fired for this visit
    pub deferred: bool,
}

/// Output of a full year run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearLog {
    /// Simulated calendar year
    pub year: i32,
    /// Visits inside the year, in time order
    pub events: Vec<VisitEvent>,
    /// First visit that rolled into the following year; drawn but not kept
    pub rollover: VisitEvent,
    /// Number of kept visits that were deferred
    pub deferred_visits: usize,
}

/// Arrival process with prebuilt monthly gap distributions
#[derive(Debug, Clone)]
pub struct ArrivalSimulator {
    hours: OperatingHours,
    /// Gap distribution per month, January first
    gaps: Vec<Gamma<f64>>,
    attributes: AttributeSampler,
}

impl ArrivalSimulator {
    /// Build a simulator for the given operating window and attribute model
    pub fn new(hours: OperatingHours, model: &VisitModel) -> SimulationResult<Self> {
        let gaps = (1..=12)
            .map(|month| {
                Gamma::new(seasonal_shape(month), 1.0).map_err(|e| {
                    SimulationError::model_error(format!(
                        "invalid gap distribution for month {}: {}",
                        month, e
                    ))
                })
            })
            .collect::<SimulationResult<Vec<_>>>()?;

        Ok(Self { hours, gaps, attributes: model.sampler()? })
    }

    /// Simulator with the standard window and model
    pub fn standard() -> SimulationResult<Self> {
        Self::new(OperatingHours::standard(), &VisitModel::standard())
    }

    /// Operating window used by this simulator
    pub fn operating_hours(&self) -> OperatingHours {
        self.hours
    }

    /// Draw the gap to the next arrival, in whole hours
    pub fn sample_gap_hours<R: Rng + ?Sized>(&self, clock: NaiveDateTime, rng: &mut R) -> i64 {
        self.gaps[clock.month0() as usize].sample(rng).round() as i64
    }

    /// Simulate one arrival after `clock`
    ///
    /// Fails only when the arrival would land past the last representable
    /// timestamp.
    pub fn next_visit<R: Rng + ?Sized>(
        &self,
        clock: NaiveDateTime,
        rng: &mut R,
    ) -> SimulationResult<ArrivalStep> {
        let gap_hours = self.sample_gap_hours(clock, rng);
        let (timestamp, deferred) = self
            .hours
            .advance(clock, gap_hours)
            .ok_or(SimulationError::ClockOverflow(clock))?;
        let attributes = self.attributes.sample(rng);

        Ok(ArrivalStep {
            event: VisitEvent::new(
                timestamp,
                attributes.product,
                attributes.buyer_age,
                attributes.buyer_sex,
            ),
            deferred,
        })
    }

    /// Run from `start` until the first visit outside `start`'s year
    ///
    /// The rollover visit is fully drawn, so the random stream matches a run that
    /// records it and trims it afterwards.
    #[instrument(skip(self, rng))]
    pub fn run<R: Rng + ?Sized>(
        &self,
        start: NaiveDateTime,
        rng: &mut R,
    ) -> SimulationResult<YearLog> {
        let year = start.year();
        let mut clock = start;
        let mut month = start.month();
        let mut events = Vec::new();
        let mut deferred_visits = 0;

        loop {
            let step = self.next_visit(clock, rng)?;
            clock = step.event.timestamp;

            if clock.year() != year {
                info!(
                    year,
                    visits = events.len(),
                    deferred_visits,
                    rollover = %clock,
                    "Year simulation complete"
                );
                return Ok(YearLog { year, events, rollover: step.event, deferred_visits });
            }

            if clock.month() != month {
                debug!(month, visits = events.len(), "Month complete");
                month = clock.month();
            }

            if step.deferred {
                deferred_visits += 1;
                if !self.hours.is_within(clock) {
                    warn!(timestamp = %clock, "Deferred visit still outside operating hours");
                }
            }

            events.push(step.event);
        }
    }

    /// Simulate a year of visits with a caller-owned random generator
    pub fn simulate_year<R: Rng + ?Sized>(
        &self,
        start: NaiveDateTime,
        rng: &mut R,
    ) -> SimulationResult<Vec<VisitEvent>> {
        Ok(self.run(start, rng)?.events)
    }
}

/// Simulate the visits of `start`'s year with the standard model
///
/// The same seed always produces the same sequence. Any year chrono can
/// represent together with the following one succeeds; the only error is
/// [`SimulationError::ClockOverflow`] for a `start` in the last representable
/// year, where the rollover visit cannot be drawn.
pub fn simulate_year(seed: u64, start: NaiveDateTime) -> SimulationResult<Vec<VisitEvent>> {
    let simulator = ArrivalSimulator::standard()?;
    let mut rng = StdRng::seed_from_u64(seed);
    simulator.simulate_year(start, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn new_year(year: i32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_standard_simulator_builds() {
        let simulator = ArrivalSimulator::standard().unwrap();
        assert_eq!(simulator.operating_hours(), OperatingHours::standard());
        assert_eq!(simulator.gaps.len(), 12);
    }

    #[test]
    fn test_gaps_are_non_negative() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for month in 1..=12 {
            let clock = NaiveDate::from_ymd_opt(2000, month, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
            for _ in 0..100 {
                assert!(simulator.sample_gap_hours(clock, &mut rng) >= 0);
            }
        }
    }

    #[test]
    fn test_winter_gaps_shorter_than_summer() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let december = NaiveDate::from_ymd_opt(2000, 12, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let june = NaiveDate::from_ymd_opt(2000, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();

        let mean = |clock, rng: &mut StdRng| {
            (0..5_000).map(|_| simulator.sample_gap_hours(clock, rng)).sum::<i64>() as f64 / 5_000.0
        };
        let december_mean = mean(december, &mut rng);
        let june_mean = mean(june, &mut rng);

        assert!((december_mean - 3.0).abs() < 0.2);
        assert!((june_mean - 6.0).abs() < 0.2);
    }

    #[test]
    fn test_next_visit_never_goes_backwards() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut clock = new_year(2000);
        for _ in 0..500 {
            let step = simulator.next_visit(clock, &mut rng).unwrap();
            assert!(step.event.timestamp >= clock);
            clock = step.event.timestamp;
        }
    }

    #[test]
    fn test_run_trims_rollover() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let log = simulator.run(new_year(2000), &mut rng).unwrap();

        assert_eq!(log.year, 2000);
        assert!(!log.events.is_empty());
        assert_eq!(log.events.last().unwrap().year(), 2000);
        assert_eq!(log.rollover.year(), 2001);
        assert!(log.rollover.timestamp > log.events.last().unwrap().timestamp);
        assert!(log.deferred_visits <= log.events.len());
    }

    #[test]
    fn test_run_keeps_hours_and_order() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let log = simulator.run(new_year(2000), &mut rng).unwrap();

        for pair in log.events.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for event in &log.events {
            assert!((9..=21).contains(&event.timestamp.hour()));
        }
    }

    #[test]
    fn test_simulate_year_matches_run() {
        let simulator = ArrivalSimulator::standard().unwrap();
        let log = simulator.run(new_year(2000), &mut StdRng::seed_from_u64(4)).unwrap();
        let events = simulator.simulate_year(new_year(2000), &mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(log.events, events);
    }

    #[test]
    fn test_seeded_function_is_deterministic() {
        let first = simulate_year(1, new_year(2000)).unwrap();
        let second = simulate_year(1, new_year(2000)).unwrap();
        assert_eq!(first, second);

        let other = simulate_year(2, new_year(2000)).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_last_representable_year_reports_overflow() {
        let last_year = NaiveDateTime::MAX.year();
        let result = simulate_year(1, new_year(last_year));
        assert!(matches!(result, Err(SimulationError::ClockOverflow(_))));

        // The year before still rolls over normally
        let events = simulate_year(1, new_year(last_year - 1)).unwrap();
        assert!(events.iter().all(|event| event.year() == last_year - 1));
    }

    #[test]
    fn test_leap_and_common_years() {
        for year in [2000, 2001, 2024] {
            let events = simulate_year(3, new_year(year)).unwrap();
            assert!(events.iter().all(|event| event.year() == year));
            // Roughly a thousand visits a year
            assert!(events.len() > 800, "only {} visits in {}", events.len(), year);
            assert!(events.len() < 1_300, "{} visits in {}", events.len(), year);
        }
    }
}
