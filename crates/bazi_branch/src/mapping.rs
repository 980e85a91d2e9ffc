//! Hard and soft assignment of angles to the twelve categories.
//!
//! Every sector is half-open, `[lower, upper)`: a value exactly on an edge
//! belongs to the sector that starts there.

use bazi_angle::{SectorBounds, checked_wrap360, circular_distance, wrap360};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BranchConvention, BranchCoordinateConfig, ConventionKind};
use crate::error::BranchError;

/// Degrees of arc per hour of time.
pub const DEG_PER_HOUR: f64 = 15.0;

/// Tolerance on the soft-weight sum.
pub const SOFT_WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// What is being discretized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BranchInput {
    /// Ecliptic longitude in degrees.
    Longitude(f64),
    /// Hours of (true local solar) time.
    Hours(f64),
}

/// Hard sector membership or a smooth distribution over sectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssignmentMode {
    /// `uncertainty_deg` feeds the `unstable` diagnostic.
    Hard { uncertainty_deg: f64 },
    /// von Mises–style kernel with concentration `kappa`.
    Soft { kappa: f64 },
}

/// One hard assignment. Built fresh for every input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BranchAssignment {
    /// Category index in 0..12.
    pub index: u8,
    pub convention: ConventionKind,
    pub center_deg: f64,
    pub lower_bound_deg: f64,
    pub upper_bound_deg: f64,
    pub distance_to_boundary_deg: f64,
    /// The input uncertainty reaches the nearest boundary.
    pub unstable: bool,
}

/// Normalized per-category weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftWeights {
    pub weights: [f64; 12],
    pub kappa: f64,
}

impl SoftWeights {
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Index of the largest weight.
    pub fn argmax(&self) -> u8 {
        self.weights
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bw), (i, &w)| {
                if w > bw { (i, w) } else { (bi, bw) }
            })
            .0 as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BranchOutput {
    Hard(BranchAssignment),
    Soft(SoftWeights),
}

/// Discretize a longitude or hour value under `config`.
///
/// Hours always use the canonical hour grid (category 0 centered on
/// midnight, edges on odd hours) and ignore the geometry in `config`; the
/// convention check still applies.
pub fn assign_branch(
    input: BranchInput,
    mode: AssignmentMode,
    config: &BranchCoordinateConfig,
) -> Result<BranchOutput, BranchError> {
    config.validate()?;
    let (value_deg, grid) = match input {
        BranchInput::Longitude(lon) => (checked_wrap360(lon, "longitude")?, *config),
        BranchInput::Hours(h) => (
            checked_wrap360(h * DEG_PER_HOUR, "hours")?,
            BranchCoordinateConfig {
                convention: config.convention,
                ..BranchCoordinateConfig::hours()
            },
        ),
    };

    match mode {
        AssignmentMode::Hard { uncertainty_deg } => {
            if !uncertainty_deg.is_finite() || uncertainty_deg < 0.0 {
                return Err(BranchError::InvalidUncertainty(uncertainty_deg));
            }
            let a = hard_assignment(value_deg, uncertainty_deg, &grid);
            debug!(
                value_deg,
                index = a.index,
                distance = a.distance_to_boundary_deg,
                "hard branch assignment"
            );
            Ok(BranchOutput::Hard(a))
        }
        AssignmentMode::Soft { kappa } => Ok(BranchOutput::Soft(soft_weights(
            value_deg, kappa, &grid,
        )?)),
    }
}

/// Category index for a longitude, `floor(wrap360(λ − origin) / width)`.
///
/// Under `ShiftLongitudes` both the longitude and the origin are rotated
/// first. Call [`BranchCoordinateConfig::validate`] beforehand.
pub fn sector_index(lon_deg: f64, config: &BranchCoordinateConfig) -> u8 {
    let width = config.sector_width_deg;
    let origin = config.origin_deg();
    let offset = match config.convention {
        BranchConvention::ShiftBoundaries => wrap360(lon_deg - origin),
        BranchConvention::ShiftLongitudes {
            phase_offset_deg,
            origin_shift_deg,
        } => {
            let shifted_lon = wrap360(lon_deg - phase_offset_deg);
            let shifted_origin = wrap360(origin - origin_shift_deg.unwrap_or(phase_offset_deg));
            wrap360(shifted_lon - shifted_origin)
        }
    };
    ((offset / width).floor() as u8).min(11)
}

fn hard_assignment(
    lon_deg: f64,
    uncertainty_deg: f64,
    config: &BranchCoordinateConfig,
) -> BranchAssignment {
    let index = sector_index(lon_deg, config);
    let width = config.sector_width_deg;
    let bounds = SectorBounds::from_start(config.origin_deg() + width * index as f64, width);
    let distance = bounds.distance_to_edge(lon_deg);
    BranchAssignment {
        index,
        convention: config.convention.kind(),
        center_deg: config.center_deg(index),
        lower_bound_deg: bounds.lower_deg,
        upper_bound_deg: bounds.upper_deg,
        distance_to_boundary_deg: distance,
        unstable: uncertainty_deg >= distance,
    }
}

/// Normalized `exp(κ·cos d_b)` weights, `d_b` the arc from `lon` to center b.
///
/// The largest exponent is subtracted before exponentiating, which leaves
/// the normalized result unchanged and keeps large κ finite.
pub fn soft_weights(
    lon_deg: f64,
    kappa: f64,
    config: &BranchCoordinateConfig,
) -> Result<SoftWeights, BranchError> {
    if !kappa.is_finite() || kappa <= 0.0 {
        return Err(BranchError::InvalidKappa(kappa));
    }
    let lon = checked_wrap360(lon_deg, "longitude")?;
    let exponents: [f64; 12] = std::array::from_fn(|b| {
        kappa
            * circular_distance(lon, config.center_deg(b as u8))
                .to_radians()
                .cos()
    });
    let max = exponents.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let raw = exponents.map(|e| (e - max).exp());
    let total: f64 = raw.iter().sum();
    Ok(SoftWeights {
        weights: raw.map(|w| w / total),
        kappa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard(lon: f64) -> BranchAssignment {
        match assign_branch(
            BranchInput::Longitude(lon),
            AssignmentMode::Hard {
                uncertainty_deg: 0.0,
            },
            &BranchCoordinateConfig::default(),
        )
        .unwrap()
        {
            BranchOutput::Hard(a) => a,
            BranchOutput::Soft(_) => unreachable!(),
        }
    }

    #[test]
    fn apex_sector_edges() {
        assert_eq!(hard(275.0).index, 0);
        assert_eq!(hard(284.9999).index, 0);
        assert_eq!(hard(285.0).index, 1);
        assert_eq!(hard(255.0).index, 0);
        assert_eq!(hard(254.9999).index, 11);
    }

    #[test]
    fn bounds_and_center() {
        let a = hard(275.0);
        assert_eq!(a.lower_bound_deg, 255.0);
        assert_eq!(a.upper_bound_deg, 285.0);
        assert_eq!(a.center_deg, 270.0);
        assert!((a.distance_to_boundary_deg - 10.0).abs() < 1e-9);
        assert_eq!(a.convention, ConventionKind::ShiftBoundaries);
    }

    #[test]
    fn wraps_across_zero() {
        // Category 3 spans [345, 15).
        assert_eq!(hard(350.0).index, 3);
        assert_eq!(hard(10.0).index, 3);
        assert_eq!(hard(-10.0).index, 3);
        assert_eq!(hard(370.0).index, 3);
    }

    #[test]
    fn unstable_flag() {
        let out = assign_branch(
            BranchInput::Longitude(284.5),
            AssignmentMode::Hard {
                uncertainty_deg: 0.5,
            },
            &BranchCoordinateConfig::default(),
        )
        .unwrap();
        let BranchOutput::Hard(a) = out else {
            panic!("expected hard output")
        };
        assert!(a.unstable);
    }

    #[test]
    fn shifted_longitudes_consistent_origin_matches() {
        let config = BranchCoordinateConfig {
            convention: BranchConvention::ShiftLongitudes {
                phase_offset_deg: 15.0,
                origin_shift_deg: Some(15.0),
            },
            ..BranchCoordinateConfig::default()
        };
        for lon in [0.0, 254.9999, 255.0, 275.0, 284.9999, 285.0, 359.0] {
            assert_eq!(
                sector_index(lon, &config),
                sector_index(lon, &BranchCoordinateConfig::default()),
                "lon {lon}"
            );
        }
    }

    #[test]
    fn nan_rejected() {
        let r = assign_branch(
            BranchInput::Longitude(f64::NAN),
            AssignmentMode::Hard {
                uncertainty_deg: 0.0,
            },
            &BranchCoordinateConfig::default(),
        );
        assert!(matches!(r, Err(BranchError::Angle(_))));
    }

    #[test]
    fn soft_sum_and_peak() {
        let w = soft_weights(270.0, 4.0, &BranchCoordinateConfig::default()).unwrap();
        assert!((w.sum() - 1.0).abs() < SOFT_WEIGHT_SUM_TOLERANCE);
        assert!(w.weights.iter().all(|&x| x >= 0.0));
        assert_eq!(w.argmax(), 0);
    }

    #[test]
    fn soft_large_kappa_stays_finite() {
        let w = soft_weights(270.0, 1e6, &BranchCoordinateConfig::default()).unwrap();
        assert!(w.weights.iter().all(|x| x.is_finite()));
        assert!((w.weights[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn soft_rejects_bad_kappa() {
        let c = BranchCoordinateConfig::default();
        assert_eq!(soft_weights(0.0, 0.0, &c), Err(BranchError::InvalidKappa(0.0)));
        assert!(soft_weights(0.0, -1.0, &c).is_err());
        assert!(soft_weights(0.0, f64::INFINITY, &c).is_err());
    }
}
