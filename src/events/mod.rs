//! Visit events and the visit table
//!
//! This module holds the simulated visit record and its serialised table form.
//!
//! # Overview
//!
//! - **VisitEvent**: One customer visit with timestamp, product, age and sex
//! - **VisitRecord**: The same visit as a table row (来客時間, 購入商品, 年齢, 性別)
//! - **VisitWriter**: Writes the table as JSON Lines or CSV
//!
//! # Usage Example
//!
//! ```rust
//! use store_visit_simulator::events::*;
//! use store_visit_simulator::types::*;
//! use chrono::NaiveDate;
//!
//! let at = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let event = VisitEvent::new(at, Product::A, 35, Sex::Male);
//!
//! let mut writer = VisitWriter::new(Vec::new(), OutputFormat::Csv);
//! writer.write_event(&event).unwrap();
//! let csv = String::from_utf8(writer.finish().unwrap()).unwrap();
//! assert!(csv.starts_with("来客時間,購入商品,年齢,性別"));
//! ```

pub mod visit_event;
pub mod writer;

// Re-export all public types for convenience
pub use visit_event::*;
pub use writer::*;
