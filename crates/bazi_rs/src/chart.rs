//! Whole-chart pipeline: time scales, pillars, fusion, compliance.

use bazi_branch::{
    BranchAssignment, BranchInput, FourPillars, HOUR_UNSTABLE_MIN, MONTH_UNSTABLE_DEG,
    PillarInput, PillarOverrides, SoftWeights, compute_pillars,
};
use bazi_config::EngineConfig;
use bazi_fusion::{HarmonicResult, WeightedBody};
use bazi_time::{BirthEvent, ReferenceData, TimeScaleSet, compute_time_scales, julian_day_number};
use bazi_validate::{ComplianceReport, ValidationInputs, validate};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::{BodyPosition, sun_longitude};
use crate::error::EngineError;
use crate::fusion::{FusionOutput, apply_fusion, hard_assignment};

/// Minutes of time per degree on the hour grid.
const MIN_PER_HOUR_GRID_DEG: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub parameter_set_id: String,
    pub config_fingerprint: String,
    pub time_scales: TimeScaleSet,
    pub pillars: FourPillars,
    /// Sun longitude on the configured sector grid.
    pub sun_assignment: BranchAssignment,
    /// TLST on the hour grid.
    pub hour_assignment: BranchAssignment,
    pub fusion: FusionOutput,
    pub report: ComplianceReport,
}

/// Compute a full chart for one birth event.
///
/// Body positions come from an external provider; a `sun` entry is
/// required for the year and month pillars. The compliance report is part
/// of the result and never turns into an error.
pub fn compute_chart(
    event: &BirthEvent,
    refdata: &ReferenceData,
    bodies: &[BodyPosition],
    overrides: &PillarOverrides,
    config: &EngineConfig,
) -> Result<Chart, EngineError> {
    config.validate()?;
    for b in bodies {
        b.check()?;
    }
    let sun_lon = sun_longitude(bodies)?;

    let time_scales = compute_time_scales(event, refdata, &config.time_model_config())?;
    let tlst = time_scales
        .tlst_hours
        .ok_or(EngineError::TlstUnavailable)?;

    // Day boundaries follow the local civil date.
    let date = event.local_datetime.date();
    let input = PillarInput {
        civil_year: date.year(),
        civil_month: date.month(),
        day_jdn: julian_day_number(date.year(), date.month(), date.day()),
        sun_longitude_deg: sun_lon,
        tlst_hours: tlst,
    };
    let pillars = compute_pillars(&input, &config.ruleset, overrides)?;

    let branch = config.branch_config();
    let sun_assignment =
        hard_assignment(BranchInput::Longitude(sun_lon), MONTH_UNSTABLE_DEG, &branch)?;
    let hour_assignment = hard_assignment(
        BranchInput::Hours(tlst),
        HOUR_UNSTABLE_MIN / MIN_PER_HOUR_GRID_DEG,
        &branch,
    )?;

    let fusion = apply_fusion(&pillars, bodies, config)?;

    let mut assignments = vec![sun_assignment, hour_assignment];
    let mut soft: Vec<SoftWeights> = Vec::new();
    let mut harmonics: &[HarmonicResult] = &[];
    match &fusion {
        FusionOutput::HardSegment { assignments: a } => {
            assignments.extend(a.iter().map(|x| x.assignment));
        }
        FusionOutput::SoftKernel { weights } => {
            soft.extend(weights.iter().map(|w| w.weights));
        }
        FusionOutput::HarmonicPhasor { harmonics: h, .. } => harmonics = h.as_slice(),
    }
    let weighted: Vec<WeightedBody> = bodies.iter().map(WeightedBody::from).collect();

    let report = validate(
        &ValidationInputs {
            birth_event: Some(event),
            time_scales: Some(&time_scales),
            branch_config: Some(&branch),
            assignments: &assignments,
            soft_weights: &soft,
            ruleset: Some(&config.ruleset),
            pillars: Some(&pillars),
            day_override_supplied: overrides.day.is_some(),
            bodies: &weighted,
            harmonic_config: config.harmonic_config(),
            harmonics,
        },
        &config.validation_config(),
    );
    debug!(status = ?report.status, "chart computed");

    Ok(Chart {
        parameter_set_id: config.parameter_set_id.clone(),
        config_fingerprint: config.fingerprint()?,
        time_scales,
        pillars,
        sun_assignment,
        hour_assignment,
        fusion,
        report,
    })
}
