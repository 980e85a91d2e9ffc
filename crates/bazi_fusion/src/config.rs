//! Harmonic fusion settings.

use serde::{Deserialize, Serialize};

use crate::error::FusionError;

/// Orders evaluated when none are configured explicitly.
pub const DEFAULT_ORDERS: [u32; 5] = [2, 3, 4, 6, 12];
/// Magnitude below which a phasor counts as degenerate.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// How body longitudes are turned into object phases.
///
/// There is deliberately no default: the caller must state which frame the
/// longitudes are compared in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseConvention {
    /// Use longitudes as given.
    Raw,
    /// Use `wrap360(λ − offset_deg)`.
    ApexShifted { offset_deg: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConfig {
    #[serde(default = "default_orders")]
    pub orders: Vec<u32>,
    pub phase_convention: PhaseConvention,
    #[serde(default = "default_apex")]
    pub apex_center_deg: f64,
    #[serde(default = "default_width")]
    pub sector_width_deg: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_orders() -> Vec<u32> {
    DEFAULT_ORDERS.to_vec()
}

fn default_apex() -> f64 {
    270.0
}

fn default_width() -> f64 {
    30.0
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl HarmonicConfig {
    /// Default orders and geometry with an explicit phase convention.
    pub fn new(phase_convention: PhaseConvention) -> Self {
        Self {
            orders: default_orders(),
            phase_convention,
            apex_center_deg: default_apex(),
            sector_width_deg: default_width(),
            epsilon: default_epsilon(),
        }
    }

    pub fn with_orders(mut self, orders: &[u32]) -> Self {
        self.orders = orders.to_vec();
        self
    }

    pub fn validate(&self) -> Result<(), FusionError> {
        if self.orders.is_empty() {
            return Err(FusionError::EmptyOrders);
        }
        let mut seen = Vec::with_capacity(self.orders.len());
        for &k in &self.orders {
            if k == 0 {
                return Err(FusionError::ZeroOrder);
            }
            if seen.contains(&k) {
                return Err(FusionError::DuplicateOrder(k));
            }
            seen.push(k);
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(FusionError::InvalidEpsilon(self.epsilon));
        }
        if !self.apex_center_deg.is_finite() || !self.sector_width_deg.is_finite() {
            return Err(FusionError::InvalidConfig(
                "apex and width must be finite".into(),
            ));
        }
        if self.sector_width_deg <= 0.0 {
            return Err(FusionError::InvalidConfig(
                "sector width must be positive".into(),
            ));
        }
        if let PhaseConvention::ApexShifted { offset_deg } = self.phase_convention {
            if !offset_deg.is_finite() {
                return Err(FusionError::InvalidConfig(
                    "phase offset must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = HarmonicConfig::new(PhaseConvention::Raw);
        assert_eq!(c.orders, vec![2, 3, 4, 6, 12]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn order_checks() {
        let base = HarmonicConfig::new(PhaseConvention::Raw);
        assert_eq!(
            base.clone().with_orders(&[]).validate(),
            Err(FusionError::EmptyOrders)
        );
        assert_eq!(
            base.clone().with_orders(&[2, 0]).validate(),
            Err(FusionError::ZeroOrder)
        );
        assert_eq!(
            base.with_orders(&[2, 3, 2]).validate(),
            Err(FusionError::DuplicateOrder(2))
        );
    }

    #[test]
    fn epsilon_checks() {
        let mut c = HarmonicConfig::new(PhaseConvention::Raw);
        c.epsilon = 0.0;
        assert_eq!(c.validate(), Err(FusionError::InvalidEpsilon(0.0)));
    }

    #[test]
    fn phase_convention_is_required_in_json() {
        let r: Result<HarmonicConfig, _> = serde_json::from_str(r#"{"orders": [2, 3]}"#);
        assert!(r.is_err());

        let c: HarmonicConfig = serde_json::from_str(
            r#"{"phase_convention": {"kind": "apex_shifted", "offset_deg": 270.0}}"#,
        )
        .unwrap();
        assert_eq!(
            c.phase_convention,
            PhaseConvention::ApexShifted { offset_deg: 270.0 }
        );
        assert_eq!(c.orders, DEFAULT_ORDERS.to_vec());
        assert_eq!(c.epsilon, DEFAULT_EPSILON);
    }
}
