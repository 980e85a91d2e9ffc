use thiserror::Error;

/// Rejected validator settings. Validation itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationConfigError {
    #[error("soft-weight tolerance must be finite and > 0, got {0}")]
    InvalidTolerance(f64),
    #[error("harmonic epsilon must be finite and > 0, got {0}")]
    InvalidEpsilon(f64),
}
