//! Error types and handling
//!
//! This module contains error types and error handling for the simulation.
//! Errors come from building the model, running off the end of the calendar,
//! and writing output.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur around a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A model parameter does not describe a valid distribution
    #[error("Invalid visit model: {0}")]
    ModelError(String),

    /// The clock cannot advance past this timestamp
    #[error("Clock overflow advancing from {0}")]
    ClockOverflow(NaiveDateTime),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a model error
    pub fn model_error(msg: impl Into<String>) -> Self {
        Self::ModelError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ModelError(_) => "Model",
            SimulationError::ClockOverflow(_) => "Clock",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
