//! BaZodiac engine facade.
//!
//! Runs the whole chain for one birth event: civil time to UTC, UT1, TT
//! and true local solar time; four pillars; fusion of pillar branches with
//! externally supplied body positions; and a compliance report over every
//! intermediate result.
//!
//! # Quick start
//!
//! ```rust
//! use bazi_rs::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig::from_json_str(r#"{
//!     "parameter_set_id": "default",
//!     "fusion": { "harmonic": { "phase_convention": { "kind": "raw" } } }
//! }"#)?;
//!
//! // Strict compliance needs TAI-UTC; a NAIF LSK file works as well via
//! // `LeapSecondTable::load`.
//! let leap = LeapSecondTable::from_entries(vec![LeapEntry {
//!     jd_utc: 2_457_754.5,
//!     tai_minus_utc_s: 37.0,
//! }])?;
//! let refdata = ReferenceData::default().with_leap_seconds(leap, "IERS Bulletin C");
//!
//! let event = BirthEvent::from_civil(
//!     2024, 2, 10, 10, 0, 0, TimezoneSpec::named("Asia/Shanghai"), 116.4, 39.9,
//! )?
//! .with_overrides(TimeOverrides { dut1_s: Some(-0.01), ..TimeOverrides::default() });
//!
//! let bodies = [BodyPosition::new("sun", 321.0), BodyPosition::new("moon", 12.5)];
//! let chart = compute_chart(&event, &refdata, &bodies, &PillarOverrides::default(), &config)?;
//! assert_eq!(chart.pillars.year.to_string(), "JiaChen");
//! assert_eq!(chart.report.status, ComplianceStatus::Compliant);
//! # Ok(())
//! # }
//! ```
//!
//! Every computation is a pure function of its arguments; there is no
//! global engine state.

pub mod body;
pub mod chart;
pub mod error;
pub mod fusion;

pub use body::{BodyPosition, sun_longitude};
pub use chart::{Chart, compute_chart};
pub use error::EngineError;
pub use fusion::{BodyAssignment, BodyWeights, FusionOutput, apply_fusion, pillar_categories};

// Re-export the per-stage crates so callers need only this one.
pub use bazi_angle;
pub use bazi_branch;
pub use bazi_config;
pub use bazi_fusion;
pub use bazi_time;
pub use bazi_validate;

pub use bazi_branch::{
    BranchAssignment, BranchConvention, BranchCoordinateConfig, FourPillars, PillarOverrides,
    Ruleset, Sexagenary,
};
pub use bazi_config::{ConfigError, EngineConfig, FusionMode, FusionSettings};
pub use bazi_fusion::{HarmonicConfig, HarmonicResult, PhaseConvention};
pub use bazi_time::{
    BirthEvent, ComplianceMode, DstPolicy, EopData, LeapEntry, LeapSecondTable, ReferenceData,
    TimeModelConfig, TimeOverrides, TimeScaleSet, TimezoneSpec,
};
pub use bazi_validate::{ComplianceReport, ComplianceStatus, IssueCode};
