//! Equation of time (apparent − mean solar time), in minutes.

use serde::{Deserialize, Serialize};

use crate::utc_time::UtcTime;

/// Built-in equation-of-time approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EotMethod {
    /// Spencer (1971) Fourier series as published by NOAA, ~0.5 min accuracy.
    Spencer,
    /// Three-term day-of-year approximation, ~1 min accuracy.
    Approx,
}

impl EotMethod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spencer => "spencer",
            Self::Approx => "approx",
        }
    }

    /// EoT in minutes at a UTC instant.
    pub fn eot_minutes(self, utc: &UtcTime) -> f64 {
        let doy = utc.day_of_year() as f64;
        match self {
            Self::Spencer => {
                let gamma = std::f64::consts::TAU / 365.0
                    * (doy - 1.0 + (utc.hours_of_day() - 12.0) / 24.0);
                229.18
                    * (0.000_075 + 0.001_868 * gamma.cos()
                        - 0.032_077 * gamma.sin()
                        - 0.014_615 * (2.0 * gamma).cos()
                        - 0.040_849 * (2.0 * gamma).sin())
            }
            Self::Approx => {
                let b = (360.0 / 365.0 * (doy - 81.0)).to_radians();
                9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
            }
        }
    }
}
