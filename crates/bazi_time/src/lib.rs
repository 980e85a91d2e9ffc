//! Time-scale chain for the BaZodiac engine.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions and a `UtcTime` calendar type
//! - NAIF LSK leap-second and IERS finals2000A EOP parsing
//! - Local civil time → UTC with explicit DST fold/gap policies
//! - UTC → UT1 → TT → LMST → TLST with per-stage quality and provenance
//!
//! The entry point is [`compute_time_scales`]. Missing reference data never
//! becomes a silent zero: each stage either computes its value or records
//! why it could not.

pub mod delta_t;
pub mod eop;
pub mod eot;
pub mod error;
pub mod julian;
pub mod lsk;
pub mod model;
pub mod refdata;
pub mod timezone;
pub mod utc_time;

pub use eop::{Dut1Sample, EopData};
pub use eot::EotMethod;
pub use error::{TimeError, TimeModelError, TimeStage};
pub use julian::{
    J2000_JD, MJD_OFFSET, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, jd_to_centuries,
    julian_day_number,
};
pub use lsk::{LeapEntry, LeapSecondTable, TT_MINUS_TAI_S};
pub use model::{
    BirthEvent, ComplianceMode, CorrectionRecord, CorrectionSource, TimeModelConfig,
    TimeOverrides, TimeProvenance, TimeQuality, TimeScaleSet, TlstQuality, TtQuality, Ut1Quality,
    compute_time_scales, compute_time_scales_with, hour_boundary_distance_min,
};
pub use refdata::{RefValue, ReferenceData};
pub use timezone::{
    ChronoTzResolver, DstPolicy, LocalResolution, TimezoneResolver, TimezoneSpec,
    resolve_local_time,
};
pub use utc_time::UtcTime;
