//! Per-order harmonic comparison of category structure and body longitudes.
//!
//! Each configured order k is evaluated on its own:
//!
//! - `R_k = Σ w_i · e^{i k θ_i}` with `θ_i = wrap360(apex + width · index_i)`
//! - `O_k = Σ v_p · e^{i k λ_p}` with `λ_p` taken per [`PhaseConvention`]
//! - intensity `|R + O|²`, cross term `Re(conj(R) · O)`
//! - alignment `cross / (|R||O| + ε)`, clamped to `[-1, 1]`
//!
//! When either magnitude is below ε the order is degenerate: cross term and
//! alignment are exactly 0 and the flag is set.

use bazi_angle::{checked_wrap360, wrap360};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{HarmonicConfig, PhaseConvention};
use crate::error::FusionError;
use crate::phasor::{Phasor, harmonic_phase_deg, phasor_sum};

/// A discrete category (e.g. a pillar branch) with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    pub label: String,
    pub index: u8,
    pub weight: f64,
}

impl WeightedCategory {
    pub fn new(label: impl Into<String>, index: u8, weight: f64) -> Self {
        Self {
            label: label.into(),
            index,
            weight,
        }
    }
}

/// A body longitude supplied by an external position provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedBody {
    pub body: String,
    pub longitude_deg: f64,
    pub weight: f64,
}

impl WeightedBody {
    pub fn new(body: impl Into<String>, longitude_deg: f64, weight: f64) -> Self {
        Self {
            body: body.into(),
            longitude_deg,
            weight,
        }
    }
}

/// Which side of the comparison a phase entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSide {
    Reference,
    Object,
}

/// Angle fed into an order, and the resulting `k·θ` phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub side: PhaseSide,
    pub label: String,
    pub base_deg: f64,
    pub phase_deg: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicResult {
    pub k: u32,
    pub reference: Phasor,
    pub object: Phasor,
    pub intensity: f64,
    pub cross_term: f64,
    pub alignment: f64,
    pub degenerate: bool,
    pub phases: Vec<PhaseEntry>,
}

/// Reference angle of a category: `wrap360(apex + width · index)`.
pub fn category_angle_deg(index: u8, config: &HarmonicConfig) -> f64 {
    wrap360(config.apex_center_deg + config.sector_width_deg * f64::from(index))
}

/// Object angle of a longitude under the configured phase convention.
pub fn object_angle_deg(longitude_deg: f64, convention: PhaseConvention) -> f64 {
    match convention {
        PhaseConvention::Raw => wrap360(longitude_deg),
        PhaseConvention::ApexShifted { offset_deg } => wrap360(longitude_deg - offset_deg),
    }
}

/// Number of sectors implied by the configured width.
fn sector_count(config: &HarmonicConfig) -> u32 {
    (360.0 / config.sector_width_deg).round() as u32
}

fn validate_inputs(
    categories: &[WeightedCategory],
    bodies: &[WeightedBody],
    config: &HarmonicConfig,
) -> Result<(), FusionError> {
    let n = sector_count(config);
    for c in categories {
        if !c.weight.is_finite() {
            return Err(FusionError::NonFiniteWeight {
                label: c.label.clone(),
            });
        }
        if u32::from(c.index) >= n {
            return Err(FusionError::CategoryIndexOutOfRange {
                label: c.label.clone(),
                index: c.index,
            });
        }
    }
    for b in bodies {
        if !b.weight.is_finite() {
            return Err(FusionError::NonFiniteWeight {
                label: b.body.clone(),
            });
        }
        checked_wrap360(b.longitude_deg, "body longitude")?;
    }
    Ok(())
}

/// Compare categories and bodies at every configured order.
///
/// Results come back in the configured order sequence. Degenerate orders are
/// reported, never rejected.
pub fn compute_harmonics(
    categories: &[WeightedCategory],
    bodies: &[WeightedBody],
    config: &HarmonicConfig,
) -> Result<Vec<HarmonicResult>, FusionError> {
    config.validate()?;
    validate_inputs(categories, bodies, config)?;

    let reference_angles: Vec<(f64, f64)> = categories
        .iter()
        .map(|c| (category_angle_deg(c.index, config), c.weight))
        .collect();
    let object_angles: Vec<(f64, f64)> = bodies
        .iter()
        .map(|b| (object_angle_deg(b.longitude_deg, config.phase_convention), b.weight))
        .collect();

    let results = config
        .orders
        .iter()
        .map(|&k| {
            let r = phasor_sum(k, reference_angles.iter().copied());
            let o = phasor_sum(k, object_angles.iter().copied());
            let (r_mag, o_mag) = (r.norm(), o.norm());
            let intensity = (r + o).norm_sqr();
            let degenerate = r_mag < config.epsilon || o_mag < config.epsilon;
            let (cross_term, alignment) = if degenerate {
                (0.0, 0.0)
            } else {
                let cross = (r.conj() * o).re;
                let a = cross / (r_mag * o_mag + config.epsilon);
                (cross, a.clamp(-1.0, 1.0))
            };
            if degenerate {
                debug!(k, r_mag, o_mag, "degenerate harmonic order");
            }

            let mut phases = Vec::with_capacity(categories.len() + bodies.len());
            for (c, &(theta, w)) in categories.iter().zip(&reference_angles) {
                phases.push(PhaseEntry {
                    side: PhaseSide::Reference,
                    label: c.label.clone(),
                    base_deg: theta,
                    phase_deg: harmonic_phase_deg(k, theta),
                    weight: w,
                });
            }
            for (b, &(lambda, w)) in bodies.iter().zip(&object_angles) {
                phases.push(PhaseEntry {
                    side: PhaseSide::Object,
                    label: b.body.clone(),
                    base_deg: lambda,
                    phase_deg: harmonic_phase_deg(k, lambda),
                    weight: w,
                });
            }

            HarmonicResult {
                k,
                reference: Phasor::from(r),
                object: Phasor::from(o),
                intensity,
                cross_term,
                alignment,
                degenerate,
                phases,
            }
        })
        .collect();

    Ok(results)
}

/// Aggregate view over a set of per-order results.
///
/// This is a reporting convenience; it never feeds back into any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionSummary {
    /// Mean of `|alignment|` over every order; degenerate orders count as 0.
    /// `None` when no orders were computed.
    pub mean_abs_alignment: Option<f64>,
    pub degenerate_orders: Vec<u32>,
    /// Order with the largest intensity.
    pub dominant_order: Option<u32>,
}

pub fn summarize(results: &[HarmonicResult]) -> FusionSummary {
    let mean_abs_alignment = if results.is_empty() {
        None
    } else {
        Some(results.iter().map(|r| r.alignment.abs()).sum::<f64>() / results.len() as f64)
    };
    // First maximum wins so ties resolve in configured order.
    let mut dominant: Option<&HarmonicResult> = None;
    for r in results {
        match dominant {
            Some(d) if d.intensity >= r.intensity => {}
            _ => dominant = Some(r),
        }
    }
    FusionSummary {
        mean_abs_alignment,
        degenerate_orders: results
            .iter()
            .filter(|r| r.degenerate)
            .map(|r| r.k)
            .collect(),
        dominant_order: dominant.map(|r| r.k),
    }
}
