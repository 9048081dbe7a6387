//! Error types for the simulation engine.

use thiserror::Error;

/// Errors reported by the simulation.
///
/// Stepping never fails; only the viewport setup is validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("viewport dimensions must be positive and finite, got {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
