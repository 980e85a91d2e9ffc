//! The three ways of combining pillar branches with body positions.

use bazi_branch::{
    AssignmentMode, BranchAssignment, BranchCoordinateConfig, BranchError, BranchInput,
    BranchOutput, FourPillars, SoftWeights, assign_branch,
};
use bazi_config::{EngineConfig, FusionMode};
use bazi_fusion::{
    FusionSummary, HarmonicResult, WeightedBody, WeightedCategory, compute_harmonics, summarize,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::BodyPosition;
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyAssignment {
    pub body: String,
    pub assignment: BranchAssignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeights {
    pub body: String,
    pub weights: SoftWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FusionOutput {
    HardSegment {
        assignments: Vec<BodyAssignment>,
    },
    SoftKernel {
        weights: Vec<BodyWeights>,
    },
    HarmonicPhasor {
        harmonics: Vec<HarmonicResult>,
        summary: FusionSummary,
    },
}

impl FusionOutput {
    pub fn mode(&self) -> FusionMode {
        match self {
            Self::HardSegment { .. } => FusionMode::HardSegment,
            Self::SoftKernel { .. } => FusionMode::SoftKernel,
            Self::HarmonicPhasor { .. } => FusionMode::HarmonicPhasor,
        }
    }
}

pub(crate) fn hard_assignment(
    input: BranchInput,
    uncertainty_deg: f64,
    config: &BranchCoordinateConfig,
) -> Result<BranchAssignment, EngineError> {
    match assign_branch(input, AssignmentMode::Hard { uncertainty_deg }, config)? {
        BranchOutput::Hard(a) => Ok(a),
        BranchOutput::Soft(_) => Err(BranchError::UnsupportedConfiguration(
            "hard assignment produced soft weights",
        )
        .into()),
    }
}

fn soft_assignment(
    lon_deg: f64,
    kappa: f64,
    config: &BranchCoordinateConfig,
) -> Result<SoftWeights, EngineError> {
    match assign_branch(
        BranchInput::Longitude(lon_deg),
        AssignmentMode::Soft { kappa },
        config,
    )? {
        BranchOutput::Soft(w) => Ok(w),
        BranchOutput::Hard(_) => Err(BranchError::UnsupportedConfiguration(
            "soft assignment produced a hard sector",
        )
        .into()),
    }
}

/// Pillar branches as weighted categories, weights from the ruleset.
pub fn pillar_categories(pillars: &FourPillars, config: &EngineConfig) -> Vec<WeightedCategory> {
    let w = &config.ruleset.pillar_weights;
    let [year, month, day, hour] = pillars.branch_indices();
    vec![
        WeightedCategory::new("year", year, w.year),
        WeightedCategory::new("month", month, w.month),
        WeightedCategory::new("day", day, w.day),
        WeightedCategory::new("hour", hour, w.hour),
    ]
}

/// Run the configured fusion mode.
pub fn apply_fusion(
    pillars: &FourPillars,
    bodies: &[BodyPosition],
    config: &EngineConfig,
) -> Result<FusionOutput, EngineError> {
    for b in bodies {
        b.check()?;
    }
    let branch = config.branch_config();
    let output = match config.fusion.mode {
        FusionMode::HardSegment => {
            let assignments = bodies
                .iter()
                .map(|b| {
                    Ok(BodyAssignment {
                        body: b.body.clone(),
                        assignment: hard_assignment(
                            BranchInput::Longitude(b.longitude_deg),
                            0.0,
                            &branch,
                        )?,
                    })
                })
                .collect::<Result<Vec<_>, EngineError>>()?;
            FusionOutput::HardSegment { assignments }
        }
        FusionMode::SoftKernel => {
            let weights = bodies
                .iter()
                .map(|b| {
                    Ok(BodyWeights {
                        body: b.body.clone(),
                        weights: soft_assignment(b.longitude_deg, config.fusion.kappa, &branch)?,
                    })
                })
                .collect::<Result<Vec<_>, EngineError>>()?;
            FusionOutput::SoftKernel { weights }
        }
        FusionMode::HarmonicPhasor => {
            let harmonic = config
                .harmonic_config()
                .ok_or(bazi_config::ConfigError::MissingHarmonics(
                    FusionMode::HarmonicPhasor.name(),
                ))?;
            let categories = pillar_categories(pillars, config);
            let weighted: Vec<WeightedBody> = bodies.iter().map(WeightedBody::from).collect();
            let harmonics = compute_harmonics(&categories, &weighted, harmonic)?;
            let summary = summarize(&harmonics);
            FusionOutput::HarmonicPhasor { harmonics, summary }
        }
    };
    debug!(mode = config.fusion.mode.name(), bodies = bodies.len(), "fusion applied");
    Ok(output)
}
