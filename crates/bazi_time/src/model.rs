//! The birth-event time-scale chain: local → UTC → UT1 → TT → TLST.
//!
//! Each stage either produces its value or degrades to a recorded quality
//! flag. Only strict compliance turns a missing TT or TLST into an error.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::delta_t::{decimal_year, delta_t_seconds};
use crate::eot::EotMethod;
use crate::error::TimeModelError;
use crate::julian::SECONDS_PER_DAY;
use crate::lsk::TT_MINUS_TAI_S;
use crate::refdata::{RefValue, ReferenceData};
use crate::timezone::{
    ChronoTzResolver, DstPolicy, TimezoneResolver, TimezoneSpec, resolve_local_time,
};
use crate::utc_time::UtcTime;

/// How missing reference data is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceMode {
    /// Missing TT/TLST is an error; quality flags are reported as errors.
    #[default]
    Strict,
    /// Missing data degrades with warnings.
    Relaxed,
    /// Like relaxed, for development runs.
    Dev,
}

impl ComplianceMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Relaxed => "relaxed",
            Self::Dev => "dev",
        }
    }
}

/// Settings for [`compute_time_scales`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeModelConfig {
    pub compliance_mode: ComplianceMode,
    /// Permit TT = UT1 + ΔT when the leap-second path is unavailable.
    pub allow_delta_t_fallback: bool,
    /// Built-in equation of time used when no override is given.
    pub eot_method: Option<EotMethod>,
    /// Without UT1, report TLST as missing instead of degrading to UTC.
    pub require_ut1_for_tlst: bool,
    /// Current UTC Julian Date, for leap-table expiry checks.
    pub now_jd_utc: Option<f64>,
}

impl Default for TimeModelConfig {
    fn default() -> Self {
        Self {
            compliance_mode: ComplianceMode::Strict,
            allow_delta_t_fallback: false,
            eot_method: Some(EotMethod::Spencer),
            require_ut1_for_tlst: false,
            now_jd_utc: None,
        }
    }
}

impl TimeModelConfig {
    pub fn validate(&self) -> Result<(), TimeModelError> {
        if self.now_jd_utc.is_some_and(|now| !now.is_finite()) {
            return Err(TimeModelError::InvalidInput {
                field: "now_jd_utc",
                reason: "must be finite".into(),
            });
        }
        Ok(())
    }
}

/// Caller-supplied corrections that take precedence over reference data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOverrides {
    /// UT1 − UTC, seconds.
    pub dut1_s: Option<f64>,
    /// Equation of time, minutes.
    pub eot_minutes: Option<f64>,
    /// TT − UT1, seconds.
    pub delta_t_s: Option<f64>,
}

/// A civil birth event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthEvent {
    pub local_datetime: NaiveDateTime,
    pub timezone: TimezoneSpec,
    #[serde(default)]
    pub dst_policy: DstPolicy,
    /// Geographic longitude, east positive.
    pub geo_lon_deg: f64,
    pub geo_lat_deg: f64,
    #[serde(default)]
    pub overrides: TimeOverrides,
}

impl BirthEvent {
    /// Build from calendar fields, rejecting impossible dates and times.
    #[allow(clippy::too_many_arguments)]
    pub fn from_civil(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        timezone: TimezoneSpec,
        geo_lon_deg: f64,
        geo_lat_deg: f64,
    ) -> Result<Self, TimeModelError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            TimeModelError::InvalidInput {
                field: "date",
                reason: format!("{year:04}-{month:02}-{day:02} is not a calendar date"),
            }
        })?;
        let local_datetime = date.and_hms_opt(hour, minute, second).ok_or_else(|| {
            TimeModelError::InvalidInput {
                field: "time",
                reason: format!("{hour:02}:{minute:02}:{second:02} is not a valid time"),
            }
        })?;
        let event = Self {
            local_datetime,
            timezone,
            dst_policy: DstPolicy::default(),
            geo_lon_deg,
            geo_lat_deg,
            overrides: TimeOverrides::default(),
        };
        event.validate()?;
        Ok(event)
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn with_overrides(mut self, overrides: TimeOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn validate(&self) -> Result<(), TimeModelError> {
        let year = self.local_datetime.year();
        if !(-4000..=9999).contains(&year) {
            return Err(TimeModelError::InvalidInput {
                field: "local_datetime",
                reason: format!("year {year} outside -4000..=9999"),
            });
        }
        check_range("geo_lon_deg", self.geo_lon_deg, -180.0, 180.0)?;
        check_range("geo_lat_deg", self.geo_lat_deg, -90.0, 90.0)?;
        if let Some(dut1) = self.overrides.dut1_s {
            check_range("overrides.dut1_s", dut1, -1.0, 1.0)?;
        }
        if let Some(eot) = self.overrides.eot_minutes {
            check_range("overrides.eot_minutes", eot, -30.0, 30.0)?;
        }
        if self.overrides.delta_t_s.is_some_and(|dt| !dt.is_finite()) {
            return Err(TimeModelError::InvalidInput {
                field: "overrides.delta_t_s",
                reason: "must be finite".into(),
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, v: f64, lo: f64, hi: f64) -> Result<(), TimeModelError> {
    if !v.is_finite() || v < lo || v > hi {
        return Err(TimeModelError::InvalidInput {
            field,
            reason: format!("{v} outside [{lo}, {hi}]"),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ut1Quality {
    Ok,
    /// Interpolated from IERS predictions.
    Predicted,
    Missing,
}

impl Ut1Quality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Predicted => "predicted",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtQuality {
    Ok,
    /// Derived from UT1 + ΔT.
    Degraded,
    Missing,
}

impl TtQuality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlstQuality {
    Ok,
    /// UTC stood in for UT1, or no equation of time was applied.
    Degraded,
    Missing,
}

impl TlstQuality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeQuality {
    pub ut1: Ut1Quality,
    pub tt: TtQuality,
    pub tlst: TlstQuality,
}

/// Where a correction value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSource {
    Override,
    Provider,
    Computed,
    Missing,
}

impl CorrectionSource {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Provider => "provider",
            Self::Computed => "computed",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    pub source: CorrectionSource,
    pub detail: String,
}

impl CorrectionRecord {
    fn new(source: CorrectionSource, detail: impl Into<String>) -> Self {
        Self {
            source,
            detail: detail.into(),
        }
    }
}

/// Per-stage correction sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeProvenance {
    pub tz: CorrectionRecord,
    pub dut1: CorrectionRecord,
    pub leap: CorrectionRecord,
    pub delta_t: CorrectionRecord,
    pub eot: CorrectionRecord,
}

/// Every time scale derived for one birth event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleSet {
    pub utc: UtcTime,
    /// Offset applied to the local time, seconds east of UTC.
    pub utc_offset_s: i32,
    pub jd_utc: f64,
    pub jd_ut1: Option<f64>,
    pub jd_tt: Option<f64>,
    /// Local mean solar time, hours in [0, 24).
    pub lmst_hours: Option<f64>,
    /// True local solar time, hours in [0, 24).
    pub tlst_hours: Option<f64>,
    pub eot_minutes: Option<f64>,
    /// Minutes of time from TLST to the nearest two-hour category boundary.
    pub hour_boundary_distance_min: Option<f64>,
    pub leap_table_expired: bool,
    pub quality: TimeQuality,
    pub provenance: TimeProvenance,
}

impl TimeScaleSet {
    /// Whether any stage fell short of full quality.
    pub fn is_degraded(&self) -> bool {
        self.quality.ut1 != Ut1Quality::Ok
            || self.quality.tt != TtQuality::Ok
            || self.quality.tlst != TlstQuality::Ok
            || self.leap_table_expired
    }
}

/// Compute the time-scale chain with the built-in IANA timezone database.
pub fn compute_time_scales(
    event: &BirthEvent,
    refdata: &ReferenceData,
    config: &TimeModelConfig,
) -> Result<TimeScaleSet, TimeModelError> {
    compute_time_scales_with(event, refdata, config, &ChronoTzResolver)
}

/// Compute the time-scale chain with a caller-supplied timezone resolver.
pub fn compute_time_scales_with(
    event: &BirthEvent,
    refdata: &ReferenceData,
    config: &TimeModelConfig,
    resolver: &dyn TimezoneResolver,
) -> Result<TimeScaleSet, TimeModelError> {
    config.validate()?;
    event.validate()?;

    let resolved = resolve_local_time(
        event.local_datetime,
        &event.timezone,
        event.dst_policy,
        resolver,
    )?;
    let tz_source = match event.timezone {
        TimezoneSpec::FixedOffset { .. } => CorrectionSource::Override,
        TimezoneSpec::Named { .. } => CorrectionSource::Provider,
    };
    let utc = UtcTime::from(resolved.utc);
    let jd_utc = utc.to_jd();
    debug!(utc = %utc, offset_s = resolved.offset_s, "local time resolved");

    let ut1 = ut1_stage(event, refdata, jd_utc);
    let jd_ut1 = ut1.dut1_s.map(|d| jd_utc + d / SECONDS_PER_DAY);

    let tt = tt_stage(event, refdata, config, &utc, jd_utc, jd_ut1);
    if tt.quality == TtQuality::Missing && config.compliance_mode == ComplianceMode::Strict {
        return Err(TimeModelError::MissingTt {
            reason: tt.leap.detail.clone(),
        });
    }

    let (eot_minutes, eot_record) = match (event.overrides.eot_minutes, config.eot_method) {
        (Some(eot), _) => (Some(eot), CorrectionRecord::new(CorrectionSource::Override, "caller")),
        (None, Some(method)) => (
            Some(method.eot_minutes(&utc)),
            CorrectionRecord::new(CorrectionSource::Computed, method.name()),
        ),
        (None, None) => (
            None,
            CorrectionRecord::new(CorrectionSource::Missing, "no equation of time configured"),
        ),
    };

    // UT1 hours of day; UTC stands in when DUT1 is unknown.
    let ut_hours = wrap_hours(utc.hours_of_day() + ut1.dut1_s.unwrap_or(0.0) / 3600.0);
    let lmst = wrap_hours(ut_hours + event.geo_lon_deg / 15.0);

    let (tlst_hours, tlst_quality) = if ut1.dut1_s.is_none() && config.require_ut1_for_tlst {
        (None, TlstQuality::Missing)
    } else {
        let tlst = wrap_hours(lmst + eot_minutes.unwrap_or(0.0) / 60.0);
        let quality = if ut1.dut1_s.is_none() || eot_minutes.is_none() {
            TlstQuality::Degraded
        } else {
            TlstQuality::Ok
        };
        (Some(tlst), quality)
    };

    match tlst_quality {
        TlstQuality::Missing if config.compliance_mode == ComplianceMode::Strict => {
            return Err(TimeModelError::MissingTlst {
                reason: "UT1 unavailable and required for TLST".into(),
            });
        }
        TlstQuality::Ok => {}
        q => warn!(quality = ?q, "true local solar time is not at full quality"),
    }

    let hour_boundary_distance_min = tlst_hours.map(hour_boundary_distance_min);
    debug!(?tlst_hours, ?hour_boundary_distance_min, "time chain complete");

    Ok(TimeScaleSet {
        utc,
        utc_offset_s: resolved.offset_s,
        jd_utc,
        jd_ut1,
        jd_tt: tt.jd_tt,
        lmst_hours: Some(lmst),
        tlst_hours,
        eot_minutes,
        hour_boundary_distance_min,
        leap_table_expired: tt.leap_table_expired,
        quality: TimeQuality {
            ut1: ut1.quality,
            tt: tt.quality,
            tlst: tlst_quality,
        },
        provenance: TimeProvenance {
            tz: CorrectionRecord::new(tz_source, resolved.detail),
            dut1: ut1.record,
            leap: tt.leap,
            delta_t: tt.delta_t,
            eot: eot_record,
        },
    })
}

struct Ut1Stage {
    dut1_s: Option<f64>,
    quality: Ut1Quality,
    record: CorrectionRecord,
}

fn ut1_stage(event: &BirthEvent, refdata: &ReferenceData, jd_utc: f64) -> Ut1Stage {
    if let Some(dut1) = event.overrides.dut1_s {
        return Ut1Stage {
            dut1_s: Some(dut1),
            quality: Ut1Quality::Ok,
            record: CorrectionRecord::new(CorrectionSource::Override, "caller"),
        };
    }
    let Some((eop, provenance)) = refdata.eop.get() else {
        warn!("no EOP data; UT1 unavailable");
        return Ut1Stage {
            dut1_s: None,
            quality: Ut1Quality::Missing,
            record: CorrectionRecord::new(CorrectionSource::Missing, "no EOP data"),
        };
    };
    match eop.dut1_at_jd(jd_utc) {
        Ok(sample) => {
            let quality = if sample.predicted {
                Ut1Quality::Predicted
            } else {
                Ut1Quality::Ok
            };
            debug!(dut1_s = sample.dut1_s, predicted = sample.predicted, "DUT1 from EOP");
            Ut1Stage {
                dut1_s: Some(sample.dut1_s),
                quality,
                record: CorrectionRecord::new(CorrectionSource::Provider, provenance),
            }
        }
        Err(e) => {
            warn!(error = %e, "EOP lookup failed; UT1 unavailable");
            Ut1Stage {
                dut1_s: None,
                quality: Ut1Quality::Missing,
                record: CorrectionRecord::new(CorrectionSource::Missing, e.to_string()),
            }
        }
    }
}

struct TtStage {
    jd_tt: Option<f64>,
    quality: TtQuality,
    leap: CorrectionRecord,
    delta_t: CorrectionRecord,
    leap_table_expired: bool,
}

fn tt_stage(
    event: &BirthEvent,
    refdata: &ReferenceData,
    config: &TimeModelConfig,
    utc: &UtcTime,
    jd_utc: f64,
    jd_ut1: Option<f64>,
) -> TtStage {
    let mut leap_table_expired = false;
    let leap = match refdata.leap_seconds.get() {
        Some((table, provenance)) => {
            leap_table_expired = table.expires_jd_utc.is_some_and(|exp| {
                jd_utc > exp || config.now_jd_utc.is_some_and(|now| now > exp)
            });
            if leap_table_expired {
                warn!(provenance, "leap-second table has expired");
            }
            match table.tai_minus_utc(jd_utc) {
                Ok(tai_minus_utc) => {
                    return TtStage {
                        jd_tt: Some(jd_utc + (tai_minus_utc + TT_MINUS_TAI_S) / SECONDS_PER_DAY),
                        quality: TtQuality::Ok,
                        leap: CorrectionRecord::new(
                            CorrectionSource::Provider,
                            format!("{provenance}: TAI-UTC = {tai_minus_utc}s"),
                        ),
                        delta_t: CorrectionRecord::new(CorrectionSource::Missing, "not needed"),
                        leap_table_expired,
                    };
                }
                Err(e) => CorrectionRecord::new(CorrectionSource::Missing, e.to_string()),
            }
        }
        None => CorrectionRecord::new(CorrectionSource::Missing, "no leap-second table"),
    };

    let fallback = match jd_ut1 {
        Some(jd_ut1) if config.allow_delta_t_fallback => {
            let (delta_t, record) = match (event.overrides.delta_t_s, &refdata.delta_t_s) {
                (Some(dt), _) => (dt, CorrectionRecord::new(CorrectionSource::Override, "caller")),
                (None, RefValue::Available { value, provenance }) => (
                    *value,
                    CorrectionRecord::new(CorrectionSource::Provider, provenance.clone()),
                ),
                (None, RefValue::Missing) => (
                    delta_t_seconds(decimal_year(utc.year, utc.month)),
                    CorrectionRecord::new(CorrectionSource::Computed, "espenak-meeus"),
                ),
            };
            Some((jd_ut1 + delta_t / SECONDS_PER_DAY, record))
        }
        _ => None,
    };

    match fallback {
        Some((jd_tt, delta_t)) => {
            warn!(detail = %delta_t.detail, "TT derived from UT1 + ΔT");
            TtStage {
                jd_tt: Some(jd_tt),
                quality: TtQuality::Degraded,
                leap,
                delta_t,
                leap_table_expired,
            }
        }
        None => {
            warn!(reason = %leap.detail, "TT unavailable");
            TtStage {
                jd_tt: None,
                quality: TtQuality::Missing,
                leap,
                delta_t: CorrectionRecord::new(
                    CorrectionSource::Missing,
                    if config.allow_delta_t_fallback {
                        "UT1 unavailable"
                    } else {
                        "fallback disabled"
                    },
                ),
                leap_table_expired,
            }
        }
    }
}

/// Fold hours into [0, 24).
fn wrap_hours(h: f64) -> f64 {
    let r = h.rem_euclid(24.0);
    if r >= 24.0 { 0.0 } else { r }
}

/// Minutes from `tlst_hours` to the nearest boundary of the two-hour
/// categories, whose edges fall on odd hours.
pub fn hour_boundary_distance_min(tlst_hours: f64) -> f64 {
    let x = (tlst_hours + 1.0).rem_euclid(2.0);
    x.min(2.0 - x) * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsk::{LeapEntry, LeapSecondTable};

    fn shanghai_event() -> BirthEvent {
        BirthEvent::from_civil(
            2024,
            2,
            10,
            8,
            0,
            0,
            TimezoneSpec::FixedOffset { seconds: 8 * 3600 },
            121.47,
            31.23,
        )
        .unwrap()
    }

    fn leap_table() -> LeapSecondTable {
        LeapSecondTable::from_entries(vec![
            LeapEntry {
                jd_utc: 2_441_317.5,
                tai_minus_utc_s: 10.0,
            },
            LeapEntry {
                jd_utc: 2_457_754.5,
                tai_minus_utc_s: 37.0,
            },
        ])
        .unwrap()
    }

    #[test]
    fn boundary_distance() {
        assert!((hour_boundary_distance_min(0.0) - 60.0).abs() < 1e-9);
        assert!(hour_boundary_distance_min(1.0).abs() < 1e-9);
        assert!((hour_boundary_distance_min(22.75) - 15.0).abs() < 1e-9);
        assert!((hour_boundary_distance_min(23.5) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_hours_range() {
        assert_eq!(wrap_hours(24.0), 0.0);
        assert!((wrap_hours(-0.5) - 23.5).abs() < 1e-12);
        assert!(wrap_hours(-1e-18) < 24.0);
    }

    #[test]
    fn invalid_calendar() {
        let r = BirthEvent::from_civil(
            2023,
            2,
            29,
            0,
            0,
            0,
            TimezoneSpec::FixedOffset { seconds: 0 },
            0.0,
            0.0,
        );
        assert!(matches!(
            r,
            Err(TimeModelError::InvalidInput { field: "date", .. })
        ));
    }

    #[test]
    fn invalid_longitude() {
        let mut e = shanghai_event();
        e.geo_lon_deg = 181.0;
        let r = compute_time_scales(&e, &ReferenceData::default(), &TimeModelConfig::default());
        assert!(matches!(
            r,
            Err(TimeModelError::InvalidInput {
                field: "geo_lon_deg",
                ..
            })
        ));
    }

    #[test]
    fn full_quality_chain() {
        let event = shanghai_event().with_overrides(TimeOverrides {
            dut1_s: Some(0.0),
            eot_minutes: Some(-14.0),
            delta_t_s: None,
        });
        let refdata = ReferenceData::default().with_leap_seconds(leap_table(), "test");
        let ts = compute_time_scales(&event, &refdata, &TimeModelConfig::default()).unwrap();

        assert_eq!(ts.utc, UtcTime::new(2024, 2, 10, 0, 0, 0.0));
        assert_eq!(ts.jd_utc, 2_460_350.5);
        let jd_tt = ts.jd_tt.unwrap();
        assert!(((jd_tt - ts.jd_utc) * SECONDS_PER_DAY - 69.184).abs() < 1e-4);
        // LMST = 0 + 121.47/15 = 8.098 h; TLST = LMST − 14 min.
        let lmst = ts.lmst_hours.unwrap();
        assert!((lmst - 121.47 / 15.0).abs() < 1e-9);
        assert!((ts.tlst_hours.unwrap() - (lmst - 14.0 / 60.0)).abs() < 1e-9);
        assert_eq!(
            ts.quality,
            TimeQuality {
                ut1: Ut1Quality::Ok,
                tt: TtQuality::Ok,
                tlst: TlstQuality::Ok,
            }
        );
        assert!(!ts.is_degraded());
        assert_eq!(ts.provenance.eot.source, CorrectionSource::Override);
    }

    #[test]
    fn missing_ut1_degrades_tlst() {
        let refdata = ReferenceData::default().with_leap_seconds(leap_table(), "test");
        let ts =
            compute_time_scales(&shanghai_event(), &refdata, &TimeModelConfig::default()).unwrap();
        assert_eq!(ts.quality.ut1, Ut1Quality::Missing);
        assert_eq!(ts.jd_ut1, None);
        assert_eq!(ts.quality.tlst, TlstQuality::Degraded);
        assert!(ts.tlst_hours.is_some());
        assert_eq!(ts.provenance.eot.source, CorrectionSource::Computed);
    }

    #[test]
    fn require_ut1_strict_errors() {
        let refdata = ReferenceData::default().with_leap_seconds(leap_table(), "test");
        let config = TimeModelConfig {
            require_ut1_for_tlst: true,
            ..TimeModelConfig::default()
        };
        let r = compute_time_scales(&shanghai_event(), &refdata, &config);
        assert!(matches!(r, Err(TimeModelError::MissingTlst { .. })));

        let relaxed = TimeModelConfig {
            compliance_mode: ComplianceMode::Relaxed,
            ..config
        };
        let ts = compute_time_scales(&shanghai_event(), &refdata, &relaxed).unwrap();
        assert_eq!(ts.quality.tlst, TlstQuality::Missing);
        assert_eq!(ts.tlst_hours, None);
        assert_eq!(ts.hour_boundary_distance_min, None);
    }

    #[test]
    fn no_eot_degrades_tlst_to_lmst() {
        let event = shanghai_event().with_overrides(TimeOverrides {
            dut1_s: Some(0.1),
            ..TimeOverrides::default()
        });
        let refdata = ReferenceData::default().with_leap_seconds(leap_table(), "test");
        let config = TimeModelConfig {
            eot_method: None,
            ..TimeModelConfig::default()
        };
        let ts = compute_time_scales(&event, &refdata, &config).unwrap();
        assert_eq!(ts.quality.tlst, TlstQuality::Degraded);
        assert_eq!(ts.tlst_hours, ts.lmst_hours);
        assert_eq!(ts.provenance.eot.source, CorrectionSource::Missing);
    }

    #[test]
    fn delta_t_fallback() {
        let event = shanghai_event().with_overrides(TimeOverrides {
            dut1_s: Some(0.0),
            eot_minutes: Some(0.0),
            delta_t_s: Some(69.0),
        });
        let config = TimeModelConfig {
            allow_delta_t_fallback: true,
            ..TimeModelConfig::default()
        };
        let ts = compute_time_scales(&event, &ReferenceData::default(), &config).unwrap();
        assert_eq!(ts.quality.tt, TtQuality::Degraded);
        assert!(((ts.jd_tt.unwrap() - ts.jd_utc) * SECONDS_PER_DAY - 69.0).abs() < 1e-4);
        assert_eq!(ts.provenance.delta_t.source, CorrectionSource::Override);
        assert_eq!(ts.provenance.leap.source, CorrectionSource::Missing);
    }

    #[test]
    fn expired_leap_table_flagged() {
        let refdata = ReferenceData::default()
            .with_leap_seconds(leap_table().with_expiry(2_460_000.5), "test");
        let config = TimeModelConfig {
            compliance_mode: ComplianceMode::Relaxed,
            ..TimeModelConfig::default()
        };
        let ts = compute_time_scales(&shanghai_event(), &refdata, &config).unwrap();
        assert!(ts.leap_table_expired);
        assert!(ts.is_degraded());
    }
}
