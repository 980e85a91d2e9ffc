//! Error types for branch mapping and pillar derivation.

use bazi_angle::AngleError;
use thiserror::Error;

/// Errors from discretization and pillar computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BranchError {
    /// Input longitude or hour value is not usable.
    #[error(transparent)]
    Angle(#[from] AngleError),
    /// Configuration parameter out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Longitudes were shifted without a matching boundary origin shift.
    #[error(
        "inconsistent branch origin for shifted longitudes: phase offset {phase_offset_deg}°, origin shift {origin_shift_deg:?}"
    )]
    InconsistentOrigin {
        phase_offset_deg: f64,
        origin_shift_deg: Option<f64>,
    },
    /// Soft-assignment concentration must be finite and positive.
    #[error("kappa must be finite and > 0, got {0}")]
    InvalidKappa(f64),
    /// Hard-assignment uncertainty must be finite and non-negative.
    #[error("uncertainty must be finite and >= 0, got {0}")]
    InvalidUncertainty(f64),
    /// The ruleset cannot answer this question without guessing.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(&'static str),
    /// Day pillar requested without an anchor or override.
    #[error("ruleset has no day-cycle anchor and no day pillar override was given")]
    MissingDayCycleAnchor,
    /// A cyclic index is outside its range.
    #[error("{what} index {index} out of range")]
    IndexOutOfRange { what: &'static str, index: usize },
}
