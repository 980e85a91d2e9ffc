//! Validator settings.

use bazi_branch::SOFT_WEIGHT_SUM_TOLERANCE;
use bazi_fusion::DEFAULT_EPSILON;
use bazi_time::ComplianceMode;
use serde::{Deserialize, Serialize};

use crate::error::ValidationConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Strict turns data-quality warnings into errors.
    pub compliance_mode: ComplianceMode,
    pub soft_weight_tolerance: f64,
    /// Used when no harmonic config accompanies the results.
    pub harmonic_epsilon: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            compliance_mode: ComplianceMode::Strict,
            soft_weight_tolerance: SOFT_WEIGHT_SUM_TOLERANCE,
            harmonic_epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ValidationConfig {
    pub fn with_mode(mut self, mode: ComplianceMode) -> Self {
        self.compliance_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationConfigError> {
        if !self.soft_weight_tolerance.is_finite() || self.soft_weight_tolerance <= 0.0 {
            return Err(ValidationConfigError::InvalidTolerance(
                self.soft_weight_tolerance,
            ));
        }
        if !self.harmonic_epsilon.is_finite() || self.harmonic_epsilon <= 0.0 {
            return Err(ValidationConfigError::InvalidEpsilon(self.harmonic_epsilon));
        }
        Ok(())
    }
}
