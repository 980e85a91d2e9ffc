//! Year, month, day and hour pillars.
//!
//! - Year: changes at LiChun (solar longitude 315°), `(year − 4) mod 60`.
//! - Month: jieqi sectors of 30° from LiChun; stem by the Five Tigers rule.
//! - Day: continuous 60-day count from the ruleset's anchor.
//! - Hour: two-hour TLST sectors; stem by the Five Rats rule.

use bazi_angle::{SectorBounds, checked_wrap360, wrap360};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BranchCoordinateConfig;
use crate::cycle::Sexagenary;
use crate::error::BranchError;
use crate::mapping::{DEG_PER_HOUR, sector_index};
use crate::ruleset::{HiddenStem, LICHUN_DEG, MonthSegmentation, Ruleset};

/// Month boundary proximity, degrees of solar longitude, that marks the
/// month pillar as unstable.
pub const MONTH_UNSTABLE_DEG: f64 = 0.5;
/// Hour boundary proximity, minutes of time, that marks the hour pillar as
/// unstable.
pub const HOUR_UNSTABLE_MIN: f64 = 2.0;

const JIEQI_STEP_DEG: f64 = 30.0;

/// Inputs to pillar derivation, already reduced to plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarInput {
    /// Civil year and month of the birth, local calendar.
    pub civil_year: i32,
    pub civil_month: u32,
    /// Julian Day Number of the civil birth date.
    pub day_jdn: i64,
    /// Apparent solar ecliptic longitude, degrees.
    pub sun_longitude_deg: f64,
    /// True local solar time, hours.
    pub tlst_hours: f64,
}

/// Pillars supplied by the caller instead of being derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillarOverrides {
    pub month: Option<Sexagenary>,
    pub day: Option<Sexagenary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenStems {
    pub year: Vec<HiddenStem>,
    pub month: Vec<HiddenStem>,
    pub day: Vec<HiddenStem>,
    pub hour: Vec<HiddenStem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDiagnostics {
    /// Solar-longitude distance to the nearest month boundary.
    pub month_boundary_distance_deg: f64,
    pub month_unstable: bool,
    /// Time distance to the nearest hour-pillar boundary.
    pub hour_boundary_distance_min: f64,
    pub hour_unstable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourPillars {
    pub ruleset_id: String,
    pub year: Sexagenary,
    pub month: Sexagenary,
    pub day: Sexagenary,
    pub hour: Sexagenary,
    /// The day pillar came from an override rather than the anchor.
    pub day_overridden: bool,
    pub hidden_stems: HiddenStems,
    pub diagnostics: BoundaryDiagnostics,
}

impl FourPillars {
    /// Branch indices in year, month, day, hour order.
    pub fn branch_indices(&self) -> [u8; 4] {
        [self.year, self.month, self.day, self.hour].map(|p| p.branch().index())
    }
}

/// Year pillar. January and February dates before LiChun belong to the
/// previous solar year.
pub fn year_pillar(civil_year: i32, civil_month: u32, sun_longitude_deg: f64) -> Sexagenary {
    let before_lichun = civil_month <= 2 && wrap360(sun_longitude_deg - LICHUN_DEG) > 180.0;
    let solar_year = if before_lichun {
        civil_year - 1
    } else {
        civil_year
    };
    Sexagenary::from_cycle(solar_year as i64 - 4)
}

/// Jieqi month number, 0 = Yin month starting at LiChun.
pub fn jieqi_month_index(sun_longitude_deg: f64) -> u8 {
    ((wrap360(sun_longitude_deg - LICHUN_DEG) / JIEQI_STEP_DEG).floor() as u8).min(11)
}

/// Month pillar for the given year pillar.
pub fn month_pillar(
    sun_longitude_deg: f64,
    year: Sexagenary,
    segmentation: MonthSegmentation,
) -> Result<Sexagenary, BranchError> {
    match segmentation {
        MonthSegmentation::JieqiCrossing => {
            let index = jieqi_month_index(sun_longitude_deg);
            let branch = (index + 2) % 12;
            let stem = (year.stem().index() * 2 + 2 + index) % 10;
            stem_branch(stem, branch)
        }
        MonthSegmentation::ApexCentered => Err(BranchError::UnsupportedConfiguration(
            "month stems are not defined for apex-centered month segmentation",
        )),
    }
}

/// Month branch under either segmentation.
pub fn month_branch_index(sun_longitude_deg: f64, segmentation: MonthSegmentation) -> u8 {
    match segmentation {
        MonthSegmentation::JieqiCrossing => (jieqi_month_index(sun_longitude_deg) + 2) % 12,
        MonthSegmentation::ApexCentered => {
            sector_index(wrap360(sun_longitude_deg), &BranchCoordinateConfig::default())
        }
    }
}

/// Day pillar from the ruleset's anchor.
pub fn day_pillar(day_jdn: i64, ruleset: &Ruleset) -> Result<Sexagenary, BranchError> {
    let anchor = ruleset
        .day_cycle_anchor
        .ok_or(BranchError::MissingDayCycleAnchor)?;
    Ok(Sexagenary::from_cycle(
        day_jdn - anchor.anchor_jdn + anchor.anchor_sexagenary_index as i64,
    ))
}

/// Hour branch index from TLST: category 0 spans 23:00–01:00.
pub fn hour_branch_index(tlst_hours: f64) -> Result<u8, BranchError> {
    let deg = checked_wrap360(tlst_hours * DEG_PER_HOUR, "tlst_hours")?;
    Ok(sector_index(deg, &BranchCoordinateConfig::hours()))
}

/// Hour pillar for the given day pillar.
pub fn hour_pillar(tlst_hours: f64, day: Sexagenary) -> Result<Sexagenary, BranchError> {
    let branch = hour_branch_index(tlst_hours)?;
    let stem = (day.stem().index() * 2 + branch) % 10;
    stem_branch(stem, branch)
}

fn stem_branch(stem: u8, branch: u8) -> Result<Sexagenary, BranchError> {
    use crate::cycle::{Branch, Stem};
    Sexagenary::from_parts(
        Stem::from_index(stem as usize)?,
        Branch::from_index(branch as usize)?,
    )
}

/// Distances of the sun and TLST to their nearest pillar boundaries.
pub fn boundary_diagnostics(sun_longitude_deg: f64, tlst_hours: f64) -> BoundaryDiagnostics {
    let index = jieqi_month_index(sun_longitude_deg);
    let month = SectorBounds::from_start(
        LICHUN_DEG + JIEQI_STEP_DEG * index as f64,
        JIEQI_STEP_DEG,
    );
    let month_distance = month.distance_to_edge(sun_longitude_deg);

    let x = (tlst_hours + 1.0).rem_euclid(2.0);
    let hour_distance = x.min(2.0 - x) * 60.0;

    BoundaryDiagnostics {
        month_boundary_distance_deg: month_distance,
        month_unstable: month_distance < MONTH_UNSTABLE_DEG,
        hour_boundary_distance_min: hour_distance,
        hour_unstable: hour_distance < HOUR_UNSTABLE_MIN,
    }
}

/// Derive all four pillars with hidden stems and boundary diagnostics.
pub fn compute_pillars(
    input: &PillarInput,
    ruleset: &Ruleset,
    overrides: &PillarOverrides,
) -> Result<FourPillars, BranchError> {
    ruleset.validate()?;
    let sun = checked_wrap360(input.sun_longitude_deg, "sun_longitude_deg")?;
    if !input.tlst_hours.is_finite() {
        return Err(bazi_angle::AngleError::NonFinite("tlst_hours").into());
    }

    let year = year_pillar(input.civil_year, input.civil_month, sun);
    let month = match overrides.month {
        Some(m) => m,
        None => month_pillar(sun, year, ruleset.month_segmentation)?,
    };
    let (day, day_overridden) = match overrides.day {
        Some(d) => (d, true),
        None => (day_pillar(input.day_jdn, ruleset)?, false),
    };
    let hour = hour_pillar(input.tlst_hours, day)?;
    debug!(%year, %month, %day, %hour, ruleset = %ruleset.id, "pillars derived");

    let hidden = |p: Sexagenary| ruleset.hidden_stems_of(p.branch().index());
    Ok(FourPillars {
        ruleset_id: ruleset.id.clone(),
        year,
        month,
        day,
        hour,
        day_overridden,
        hidden_stems: HiddenStems {
            year: hidden(year),
            month: hidden(month),
            day: hidden(day),
            hour: hidden(hour),
        },
        diagnostics: boundary_diagnostics(sun, input.tlst_hours),
    })
}
