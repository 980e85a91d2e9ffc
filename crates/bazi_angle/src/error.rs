//! Error types for angle handling.

use thiserror::Error;

/// Errors from angle validation and coordinate transforms.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AngleError {
    /// Input angle is NaN or infinite.
    #[error("non-finite angle in {0}")]
    NonFinite(&'static str),
    /// Latitude or declination outside [-90, 90].
    #[error("{name} {value} outside [-90, 90]")]
    PolarOutOfRange { name: &'static str, value: f64 },
}
