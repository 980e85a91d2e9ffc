use std::path::PathBuf;

use bazi_branch::BranchError;
use bazi_fusion::FusionError;
use bazi_time::TimeModelError;
use bazi_validate::ValidationConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter_set_id must not be empty")]
    MissingParameterSetId,
    #[error("fusion mode {0} requires a harmonic configuration")]
    MissingHarmonics(&'static str),
    #[error("kappa must be finite and > 0, got {0}")]
    InvalidKappa(f64),
    #[error("harmonic geometry (apex {harmonic_apex}°, width {harmonic_width}°) differs from branch geometry (apex {branch_apex}°, width {branch_width}°)")]
    GeometryMismatch {
        branch_apex: f64,
        branch_width: f64,
        harmonic_apex: f64,
        harmonic_width: f64,
    },
    #[error("time model: {0}")]
    Time(#[from] TimeModelError),
    #[error("branch: {0}")]
    Branch(#[from] BranchError),
    #[error("fusion: {0}")]
    Fusion(#[from] FusionError),
    #[error("validator: {0}")]
    Validation(#[from] ValidationConfigError),
}
