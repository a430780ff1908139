//! Statistics collection and reporting
//!
//! Summarises a finished [`YearLog`] for the operator. The visit table itself
//! is never aggregated; these figures are a side report printed after a run.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::simulation::{OperatingHours, YearLog};
use crate::types::{Product, RunId, Sex};

/// Visit count and mean buyer age of one product in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProductSummary {
    /// Calendar month (1-12)
    pub month: u32,
    /// Product
    pub product: Product,
    /// Number of visits
    pub visits: usize,
    /// Mean buyer age, absent when there were no visits
    pub mean_age: Option<f64>,
}

/// Summary of one simulated year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitStatistics {
    /// Run this summary belongs to
    pub run_id: RunId,
    /// Seed the run used
    pub seed: u64,
    /// Simulated calendar year
    pub year: i32,
    /// Number of visits kept in the table
    pub total_visits: usize,
    /// Visits moved forward by the out-of-hours deferral
    pub deferred_visits: usize,
    /// Visits still outside the window after deferral
    pub out_of_window_visits: usize,
    /// Visits per product
    pub visits_by_product: BTreeMap<Product, usize>,
    /// Visits per buyer sex
    pub visits_by_sex: BTreeMap<Sex, usize>,
    /// Per month and product breakdown, months ascending
    pub monthly: Vec<MonthlyProductSummary>,
    /// Timestamp of the first visit
    pub first_visit: Option<NaiveDateTime>,
    /// Timestamp of the last visit
    pub last_visit: Option<NaiveDateTime>,
    /// Wall-clock duration of the run
    pub simulation_duration: Duration,
}

impl VisitStatistics {
    /// Compute statistics for a finished run
    pub fn from_log(run_id: RunId, seed: u64, hours: &OperatingHours, log: &YearLog) -> Self {
        let mut visits_by_product: BTreeMap<Product, usize> =
            Product::ALL.iter().map(|product| (*product, 0)).collect();
        let mut visits_by_sex: BTreeMap<Sex, usize> =
            Sex::ALL.iter().map(|sex| (*sex, 0)).collect();
        // (month, product) -> (visits, age sum)
        let mut monthly_totals: BTreeMap<(u32, Product), (usize, i64)> = BTreeMap::new();
        let mut out_of_window_visits = 0;

        for event in &log.events {
            *visits_by_product.entry(event.product).or_default() += 1;
            *visits_by_sex.entry(event.buyer_sex).or_default() += 1;

            let totals = monthly_totals.entry((event.month(), event.product)).or_default();
            totals.0 += 1;
            totals.1 += i64::from(event.buyer_age);

            if !hours.is_within(event.timestamp) {
                out_of_window_visits += 1;
            }
        }

        let monthly = (1..=12)
            .flat_map(|month| Product::ALL.iter().map(move |product| (month, *product)))
            .map(|(month, product)| {
                let (visits, age_sum) =
                    monthly_totals.get(&(month, product)).copied().unwrap_or((0, 0));
                MonthlyProductSummary {
                    month,
                    product,
                    visits,
                    mean_age: (visits > 0).then(|| age_sum as f64 / visits as f64),
                }
            })
            .collect();

        Self {
            run_id,
            seed,
            year: log.year,
            total_visits: log.events.len(),
            deferred_visits: log.deferred_visits,
            out_of_window_visits,
            visits_by_product,
            visits_by_sex,
            monthly,
            first_visit: log.events.first().map(|event| event.timestamp),
            last_visit: log.events.last().map(|event| event.timestamp),
            simulation_duration: Duration::from_secs(0),
        }
    }

    /// Set the wall-clock duration of the run
    pub fn set_simulation_duration(&mut self, duration: Duration) {
        self.simulation_duration = duration;
    }

    /// Days in the simulated year
    pub fn days_in_year(&self) -> i64 {
        let next_year = self.year.checked_add(1).and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        match (NaiveDate::from_ymd_opt(self.year, 1, 1), next_year) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 365,
        }
    }

    /// Average visits per day
    pub fn average_visits_per_day(&self) -> f64 {
        self.total_visits as f64 / self.days_in_year() as f64
    }

    /// Visits of one product
    pub fn product_visits(&self, product: Product) -> usize {
        self.visits_by_product.get(&product).copied().unwrap_or(0)
    }

    /// Share of visits for one product, in percent
    pub fn product_percentage(&self, product: Product) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            (self.product_visits(product) as f64 / self.total_visits as f64) * 100.0
        }
    }

    /// Share of visits by one buyer sex, in percent
    pub fn sex_percentage(&self, sex: Sex) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            let visits = self.visits_by_sex.get(&sex).copied().unwrap_or(0);
            (visits as f64 / self.total_visits as f64) * 100.0
        }
    }

    /// Share of visits that were deferred, in percent
    pub fn deferred_percentage(&self) -> f64 {
        if self.total_visits == 0 {
            0.0
        } else {
            (self.deferred_visits as f64 / self.total_visits as f64) * 100.0
        }
    }

    /// Visits of one product in one month
    pub fn monthly_visits(&self, month: u32, product: Product) -> usize {
        self.monthly
            .iter()
            .find(|row| row.month == month && row.product == product)
            .map(|row| row.visits)
            .unwrap_or(0)
    }

    /// Visits of all products in one month
    pub fn month_total(&self, month: u32) -> usize {
        self.monthly.iter().filter(|row| row.month == month).map(|row| row.visits).sum()
    }

    /// Mean buyer age of one product across the year
    pub fn mean_age(&self, product: Product) -> Option<f64> {
        let (visits, weighted) = self
            .monthly
            .iter()
            .filter(|row| row.product == product)
            .filter_map(|row| row.mean_age.map(|mean| (row.visits, mean * row.visits as f64)))
            .fold((0usize, 0.0), |(n, sum), (visits, weighted)| (n + visits, sum + weighted));

        (visits > 0).then(|| weighted / visits as f64)
    }

    /// Multi-line report for the terminal
    pub fn generate_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Store Visit Simulation Complete\n");
        output.push_str("===============================\n\n");

        output.push_str("Simulation Summary:\n");
        output.push_str(&format!("   Run: {}\n", self.run_id));
        output.push_str(&format!("   Seed: {}  Year: {}\n", self.seed, self.year));
        output.push_str(&format!(
            "   Duration: {:.3} seconds\n\n",
            self.simulation_duration.as_secs_f64()
        ));

        output.push_str("Visit Statistics:\n");
        output.push_str(&format!("   Total Visits: {}\n", self.total_visits));
        output.push_str(&format!(
            "   Daily Average: {:.2} visits/day\n",
            self.average_visits_per_day()
        ));
        output.push_str(&format!(
            "   Deferred Visits: {} ({:.1}%)\n",
            self.deferred_visits,
            self.deferred_percentage()
        ));
        if self.out_of_window_visits > 0 {
            output.push_str(&format!(
                "   Outside Operating Hours: {}\n",
                self.out_of_window_visits
            ));
        }
        if let (Some(first), Some(last)) = (self.first_visit, self.last_visit) {
            output.push_str(&format!("   First Visit: {}\n   Last Visit: {}\n", first, last));
        }
        output.push('\n');

        output.push_str("Products:\n");
        for product in Product::ALL {
            let mean_age = self
                .mean_age(product)
                .map(|age| format!("{:.1}", age))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "   {}: {} ({:.1}%), mean age {}\n",
                product,
                self.product_visits(product),
                self.product_percentage(product),
                mean_age
            ));
        }
        output.push_str("Buyers:\n");
        for sex in Sex::ALL {
            output.push_str(&format!("   {}: {:.1}%\n", sex, self.sex_percentage(sex)));
        }
        output.push('\n');

        output.push_str("Monthly Visits:\n");
        output.push_str("   Month   商品A   商品B   商品C   Total\n");
        for month in 1..=12 {
            output.push_str(&format!(
                "   {:>5} {:>7} {:>7} {:>7} {:>7}\n",
                month,
                self.monthly_visits(month, Product::A),
                self.monthly_visits(month, Product::B),
                self.monthly_visits(month, Product::C),
                self.month_total(month)
            ));
        }

        output
    }
}

impl fmt::Display for VisitStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_report())
    }
}
