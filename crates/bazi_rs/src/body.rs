use bazi_fusion::WeightedBody;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

fn unit_weight() -> f64 {
    1.0
}

/// A body position from an external ephemeris, ecliptic degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: String,
    pub longitude_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_deg: Option<f64>,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

impl BodyPosition {
    pub fn new(body: impl Into<String>, longitude_deg: f64) -> Self {
        Self {
            body: body.into(),
            longitude_deg,
            latitude_deg: None,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub(crate) fn check(&self) -> Result<(), EngineError> {
        if !self.longitude_deg.is_finite() {
            return Err(EngineError::InvalidBody {
                body: self.body.clone(),
                reason: format!("longitude {} is not finite", self.longitude_deg),
            });
        }
        if !self.weight.is_finite() {
            return Err(EngineError::InvalidBody {
                body: self.body.clone(),
                reason: format!("weight {} is not finite", self.weight),
            });
        }
        Ok(())
    }
}

impl From<&BodyPosition> for WeightedBody {
    fn from(p: &BodyPosition) -> Self {
        WeightedBody::new(p.body.clone(), p.longitude_deg, p.weight)
    }
}

/// Longitude of the first body named `sun`, ignoring case.
pub fn sun_longitude(bodies: &[BodyPosition]) -> Result<f64, EngineError> {
    bodies
        .iter()
        .find(|b| b.body.eq_ignore_ascii_case("sun"))
        .map(|b| b.longitude_deg)
        .ok_or(EngineError::MissingBody("sun"))
}
