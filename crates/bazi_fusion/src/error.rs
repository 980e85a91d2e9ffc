//! Error types for harmonic fusion.

use bazi_angle::AngleError;
use thiserror::Error;

/// Configuration and input errors. Degeneracy is never an error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FusionError {
    #[error("no harmonic orders configured")]
    EmptyOrders,
    #[error("harmonic order must be >= 1")]
    ZeroOrder,
    #[error("harmonic order {0} listed more than once")]
    DuplicateOrder(u32),
    #[error("epsilon must be finite and > 0, got {0}")]
    InvalidEpsilon(f64),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("weight of `{label}` is not finite")]
    NonFiniteWeight { label: String },
    #[error("category `{label}` has index {index}, expected 0..12")]
    CategoryIndexOutOfRange { label: String, index: u8 },
    #[error(transparent)]
    Angle(#[from] AngleError),
}
