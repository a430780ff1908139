//! Core types and identifiers for the store visit simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based run identifiers
//! - **Enums**: Type-safe products, buyer sex and output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use store_visit_simulator::types::*;
//!
//! let product: Product = "商品B".parse().unwrap();
//! assert_eq!(product, Product::B);
//!
//! let config = SimulationConfig {
//!     seed: 7,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
