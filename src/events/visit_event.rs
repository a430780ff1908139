//! Visit events and their table rows
//!
//! A [`VisitEvent`] is one simulated customer visit. The charting side consumes
//! visits as rows of a table with Japanese column names; [`VisitRecord`] is that
//! row shape.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{Product, Sex};

/// Column names of the visit table
pub mod columns {
    /// Visit timestamp
    pub const VISITED_AT: &str = "来客時間";
    /// Purchased product
    pub const PRODUCT: &str = "購入商品";
    /// Buyer age
    pub const AGE: &str = "年齢";
    /// Buyer sex
    pub const SEX: &str = "性別";

    /// All columns in table order
    pub const ALL: [&str; 4] = [VISITED_AT, PRODUCT, AGE, SEX];
}

/// One simulated customer visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    /// When the customer arrived
    pub timestamp: NaiveDateTime,
    /// What the customer bought
    pub product: Product,
    /// Buyer age; unbounded sampling means it can be implausible or negative
    pub buyer_age: i32,
    /// Buyer sex
    pub buyer_sex: Sex,
}

impl VisitEvent {
    /// Create a new visit event
    pub fn new(timestamp: NaiveDateTime, product: Product, buyer_age: i32, buyer_sex: Sex) -> Self {
        Self { timestamp, product, buyer_age, buyer_sex }
    }

    /// Calendar year of the visit
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Calendar month of the visit (1-12)
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// Convert into a table row
    pub fn to_record(&self) -> VisitRecord {
        VisitRecord::from(self)
    }
}

/// One row of the visit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// 来客時間
    #[serde(rename = "来客時間")]
    pub visited_at: NaiveDateTime,
    /// 購入商品
    #[serde(rename = "購入商品")]
    pub product: Product,
    /// 年齢
    #[serde(rename = "年齢")]
    pub age: i32,
    /// 性別
    #[serde(rename = "性別")]
    pub sex: Sex,
}

impl From<&VisitEvent> for VisitRecord {
    fn from(event: &VisitEvent) -> Self {
        Self {
            visited_at: event.timestamp,
            product: event.product,
            age: event.buyer_age,
            sex: event.buyer_sex,
        }
    }
}

/// Convert an ordered event sequence into the table handed to charting
pub fn to_table(events: &[VisitEvent]) -> Vec<VisitRecord> {
    events.iter().map(VisitRecord::from).collect()
}
