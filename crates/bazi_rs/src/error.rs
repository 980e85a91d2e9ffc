use bazi_branch::BranchError;
use bazi_config::ConfigError;
use bazi_fusion::FusionError;
use bazi_time::TimeModelError;
use thiserror::Error;

/// Failure of a whole-chart computation, wrapping the failing stage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("time model ({stage}): {0}", stage = .0.stage().name())]
    Time(#[from] TimeModelError),
    #[error("branch: {0}")]
    Branch(#[from] BranchError),
    #[error("fusion: {0}")]
    Fusion(#[from] FusionError),
    #[error("body `{0}` is required but was not supplied")]
    MissingBody(&'static str),
    #[error("body `{body}`: {reason}")]
    InvalidBody { body: String, reason: String },
    #[error("true local solar time unavailable; hour pillar cannot be derived")]
    TlstUnavailable,
}
