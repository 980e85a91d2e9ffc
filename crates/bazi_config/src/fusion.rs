use bazi_fusion::HarmonicConfig;
use serde::{Deserialize, Serialize};

/// Concentration used by the soft kernel when none is configured.
pub const DEFAULT_KAPPA: f64 = 4.0;

/// How branch structure and body positions are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Count bodies per hard sector.
    HardSegment,
    /// Sum von Mises kernel weights per sector.
    SoftKernel,
    /// Per-order phasor comparison.
    #[default]
    HarmonicPhasor,
}

impl FusionMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HardSegment => "hard_segment",
            Self::SoftKernel => "soft_kernel",
            Self::HarmonicPhasor => "harmonic_phasor",
        }
    }
}

fn default_kappa() -> f64 {
    DEFAULT_KAPPA
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSettings {
    #[serde(default)]
    pub mode: FusionMode,
    #[serde(default = "default_kappa")]
    pub kappa: f64,
    /// Required for [`FusionMode::HarmonicPhasor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmonic: Option<HarmonicConfig>,
}
