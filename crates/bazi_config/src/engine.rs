use std::path::Path;

use bazi_branch::{BranchCoordinateConfig, Ruleset, SOFT_WEIGHT_SUM_TOLERANCE};
use bazi_fusion::{DEFAULT_EPSILON, HarmonicConfig};
use bazi_time::TimeModelConfig;
use bazi_validate::ValidationConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ConfigError;
use crate::fusion::{FusionMode, FusionSettings};

/// Tolerance when comparing branch and harmonic geometry.
const GEOMETRY_TOLERANCE_DEG: f64 = 1e-9;

/// Complete parameter set for one engine run.
///
/// Every per-stage configuration is carried here by value; nothing is read
/// from globals. Two runs with equal configs produce equal fingerprints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub parameter_set_id: String,
    #[serde(default)]
    pub time: TimeModelConfig,
    #[serde(default)]
    pub branch: BranchCoordinateConfig,
    #[serde(default)]
    pub ruleset: Ruleset,
    pub fusion: FusionSettings,
}

impl EngineConfig {
    /// Defaults throughout, harmonic fusion with the given config.
    pub fn new(parameter_set_id: impl Into<String>, harmonic: HarmonicConfig) -> Self {
        Self {
            parameter_set_id: parameter_set_id.into(),
            time: TimeModelConfig::default(),
            branch: BranchCoordinateConfig::default(),
            ruleset: Ruleset::standard(),
            fusion: FusionSettings {
                mode: FusionMode::HarmonicPhasor,
                kappa: crate::fusion::DEFAULT_KAPPA,
                harmonic: Some(harmonic),
            },
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            parameter_set_id = %config.parameter_set_id,
            mode = config.fusion.mode.name(),
            "engine config loaded"
        );
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parameter_set_id.trim().is_empty() {
            return Err(ConfigError::MissingParameterSetId);
        }
        self.time.validate()?;
        self.branch.validate()?;
        self.ruleset.validate()?;

        let kappa = self.fusion.kappa;
        if !kappa.is_finite() || kappa <= 0.0 {
            return Err(ConfigError::InvalidKappa(kappa));
        }
        match &self.fusion.harmonic {
            Some(h) => {
                h.validate()?;
                let off = |a: f64, b: f64| (a - b).abs() > GEOMETRY_TOLERANCE_DEG;
                if off(h.apex_center_deg, self.branch.apex_center_deg)
                    || off(h.sector_width_deg, self.branch.sector_width_deg)
                {
                    return Err(ConfigError::GeometryMismatch {
                        branch_apex: self.branch.apex_center_deg,
                        branch_width: self.branch.sector_width_deg,
                        harmonic_apex: h.apex_center_deg,
                        harmonic_width: h.sector_width_deg,
                    });
                }
            }
            None if self.fusion.mode == FusionMode::HarmonicPhasor => {
                return Err(ConfigError::MissingHarmonics(self.fusion.mode.name()));
            }
            None => {}
        }
        self.validation_config().validate()?;
        Ok(())
    }

    pub fn time_model_config(&self) -> TimeModelConfig {
        self.time.clone()
    }

    pub fn branch_config(&self) -> BranchCoordinateConfig {
        self.branch
    }

    pub fn harmonic_config(&self) -> Option<&HarmonicConfig> {
        self.fusion.harmonic.as_ref()
    }

    /// Validator settings follow the time model's compliance mode.
    pub fn validation_config(&self) -> ValidationConfig {
        ValidationConfig {
            compliance_mode: self.time.compliance_mode,
            soft_weight_tolerance: SOFT_WEIGHT_SUM_TOLERANCE,
            harmonic_epsilon: self
                .fusion
                .harmonic
                .as_ref()
                .map_or(DEFAULT_EPSILON, |h| h.epsilon),
        }
    }

    /// SHA-256 of the canonical JSON form, lowercase hex.
    ///
    /// Canonical means object keys in sorted order with no whitespace, so
    /// field order in the source document does not matter.
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        let canonical = serde_json::to_string(&serde_json::to_value(self)?)?;
        Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
    }
}
