//! Weighted unit phasors at harmonic order k.

use bazi_angle::wrap360;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A complex sum stored in cartesian form with its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phasor {
    pub re: f64,
    pub im: f64,
    pub magnitude: f64,
}

impl Phasor {
    pub const ZERO: Self = Self {
        re: 0.0,
        im: 0.0,
        magnitude: 0.0,
    };

    /// Argument in degrees, `[0, 360)`. Zero for a null phasor.
    pub fn phase_deg(&self) -> f64 {
        if self.magnitude == 0.0 {
            return 0.0;
        }
        wrap360(self.im.atan2(self.re).to_degrees())
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }
}

impl From<Complex64> for Phasor {
    fn from(z: Complex64) -> Self {
        Self {
            re: z.re,
            im: z.im,
            magnitude: z.norm(),
        }
    }
}

/// Phase of angle `theta_deg` at order `k`, reduced to `[0, 360)`.
///
/// Reducing before the radian conversion keeps precision for large k·θ.
pub fn harmonic_phase_deg(k: u32, theta_deg: f64) -> f64 {
    wrap360(f64::from(k) * wrap360(theta_deg))
}

/// `w · e^{i k θ}`.
pub fn weighted_unit(k: u32, theta_deg: f64, weight: f64) -> Complex64 {
    Complex64::from_polar(weight, harmonic_phase_deg(k, theta_deg).to_radians())
}

/// Sum of `w_j · e^{i k θ_j}` over `(θ_j, w_j)` pairs.
pub fn phasor_sum<I>(k: u32, terms: I) -> Complex64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    terms
        .into_iter()
        .map(|(theta, w)| weighted_unit(k, theta, w))
        .sum()
}
