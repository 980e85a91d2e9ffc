//! Individual checks. Each appends findings in a fixed order so reports are
//! reproducible for identical inputs.

use bazi_branch::{
    BranchAssignment, BranchConvention, BranchCoordinateConfig, BranchError, FourPillars, Ruleset,
    SoftWeights,
};
use bazi_fusion::{FusionError, HarmonicConfig, HarmonicResult, WeightedBody};
use bazi_time::{
    BirthEvent, ComplianceMode, CorrectionSource, TimeScaleSet, TlstQuality, TtQuality, Ut1Quality,
};

use crate::issue::{Issue, IssueCode, Severity};
use crate::report::{Evidence, OrderEvidence};

pub(crate) struct Collector {
    mode: ComplianceMode,
    pub(crate) issues: Vec<Issue>,
}

impl Collector {
    pub(crate) fn new(mode: ComplianceMode) -> Self {
        Self {
            mode,
            issues: Vec::new(),
        }
    }

    fn push(&mut self, code: IssueCode, severity: Severity, path: String, message: String) {
        self.issues.push(Issue {
            code,
            severity,
            message,
            path,
        });
    }

    fn error(&mut self, code: IssueCode, path: impl Into<String>, message: impl Into<String>) {
        self.push(code, Severity::Error, path.into(), message.into());
    }

    fn warning(&mut self, code: IssueCode, path: impl Into<String>, message: impl Into<String>) {
        self.push(code, Severity::Warning, path.into(), message.into());
    }

    /// Data-quality finding: an error under strict compliance, else a warning.
    fn quality(&mut self, code: IssueCode, path: impl Into<String>, message: impl Into<String>) {
        let severity = match self.mode {
            ComplianceMode::Strict => Severity::Error,
            ComplianceMode::Relaxed | ComplianceMode::Dev => Severity::Warning,
        };
        self.push(code, severity, path.into(), message.into());
    }
}

fn in_hours(h: f64) -> bool {
    h.is_finite() && (0.0..24.0).contains(&h)
}

fn in_circle(deg: f64) -> bool {
    deg.is_finite() && (0.0..360.0).contains(&deg)
}

pub(crate) fn birth_event(c: &mut Collector, event: &BirthEvent) {
    let lon = event.geo_lon_deg;
    if !(lon.is_finite() && (-180.0..=180.0).contains(&lon)) {
        c.error(
            IssueCode::InvalidGeoLon,
            "/birth_event/geo_lon_deg",
            format!("longitude {lon} not in [-180, 180]"),
        );
    }
    let lat = event.geo_lat_deg;
    if !(lat.is_finite() && (-90.0..=90.0).contains(&lat)) {
        c.error(
            IssueCode::InvalidGeoLat,
            "/birth_event/geo_lat_deg",
            format!("latitude {lat} not in [-90, 90]"),
        );
    }
}

pub(crate) fn time_scales(c: &mut Collector, ts: &TimeScaleSet, evidence: &mut Evidence) {
    if let Some(h) = ts.tlst_hours {
        if !in_hours(h) {
            c.error(
                IssueCode::InvalidTlst,
                "/time_scales/tlst_hours",
                format!("TLST {h} not in [0, 24)"),
            );
        }
    }
    if let Some(h) = ts.lmst_hours {
        if !in_hours(h) {
            c.error(
                IssueCode::InvalidLmst,
                "/time_scales/lmst_hours",
                format!("LMST {h} not in [0, 24)"),
            );
        }
    }
    if let Some(d) = ts.hour_boundary_distance_min {
        if !(d.is_finite() && (0.0..=60.0).contains(&d)) {
            c.error(
                IssueCode::InvalidHourBoundaryDistance,
                "/time_scales/hour_boundary_distance_min",
                format!("boundary distance {d} min not in [0, 60]"),
            );
        }
    }

    let q = ts.quality;
    match q.tlst {
        TlstQuality::Ok => {
            let reason = if ts.tlst_hours.is_none() {
                Some("TLST absent")
            } else if ts.provenance.eot.source == CorrectionSource::Missing {
                Some("no equation of time applied")
            } else if ts.jd_ut1.is_none() {
                Some("UTC used in place of UT1")
            } else {
                None
            };
            if let Some(reason) = reason {
                c.error(
                    IssueCode::TlstDegradedWithoutFlag,
                    "/time_scales/quality/tlst",
                    format!("TLST marked ok but {reason}"),
                );
            }
        }
        TlstQuality::Degraded => c.quality(
            IssueCode::TlstDegraded,
            "/time_scales/quality/tlst",
            "TLST computed with degraded precision",
        ),
        TlstQuality::Missing => c.quality(
            IssueCode::TlstMissing,
            "/time_scales/quality/tlst",
            "TLST unavailable",
        ),
    }

    match q.tt {
        TtQuality::Missing => c.quality(
            IssueCode::MissingTt,
            "/time_scales/jd_tt",
            format!("TT unavailable: {}", ts.provenance.leap.detail),
        ),
        TtQuality::Degraded => c.warning(
            IssueCode::TtDegraded,
            "/time_scales/jd_tt",
            "TT derived from UT1 + ΔT",
        ),
        TtQuality::Ok => {}
    }
    if q.tt != TtQuality::Missing && ts.jd_tt.is_none() {
        c.error(
            IssueCode::QualityFlagMismatch,
            "/time_scales/quality/tt",
            "TT absent but not flagged missing",
        );
    }

    match q.ut1 {
        Ut1Quality::Missing => c.quality(
            IssueCode::EopMissing,
            "/time_scales/jd_ut1",
            "Earth orientation data unavailable; UT1 unknown",
        ),
        Ut1Quality::Predicted => c.quality(
            IssueCode::EopPredicted,
            "/time_scales/jd_ut1",
            "UT1 interpolated from predicted EOP rows",
        ),
        Ut1Quality::Ok => {}
    }
    if q.ut1 != Ut1Quality::Missing && ts.jd_ut1.is_none() {
        c.error(
            IssueCode::QualityFlagMismatch,
            "/time_scales/quality/ut1",
            "UT1 absent but not flagged missing",
        );
    }

    if ts.leap_table_expired {
        c.quality(
            IssueCode::LeapSecondsFileExpired,
            "/time_scales/leap_table_expired",
            "leap-second table is past its expiry",
        );
    }

    let t = &mut evidence.time;
    t.insert("utc".into(), ts.utc.to_string());
    t.insert("ut1_quality".into(), q.ut1.name().into());
    t.insert("tt_quality".into(), q.tt.name().into());
    t.insert("tlst_quality".into(), q.tlst.name().into());
    let p = &ts.provenance;
    t.insert("tz_source".into(), p.tz.source.name().into());
    t.insert("dut1_source".into(), p.dut1.source.name().into());
    t.insert("leap_source".into(), p.leap.source.name().into());
    t.insert("delta_t_source".into(), p.delta_t.source.name().into());
    t.insert("eot_source".into(), p.eot.source.name().into());
    t.insert(
        "leap_table_expired".into(),
        ts.leap_table_expired.to_string(),
    );
}

pub(crate) fn branch_config(
    c: &mut Collector,
    config: &BranchCoordinateConfig,
    evidence: &mut Evidence,
) {
    match config.validate() {
        Ok(()) => {}
        Err(e @ BranchError::InconsistentOrigin { .. }) => c.error(
            IssueCode::InconsistentBranchOriginForShiftedLongitudes,
            "/branch_config/convention",
            e.to_string(),
        ),
        Err(e) => c.error(
            IssueCode::InvalidBranchConfig,
            "/branch_config",
            e.to_string(),
        ),
    }

    let d = &mut evidence.discretization;
    d.insert("interval_convention".into(), "half_open".into());
    d.insert(
        "branch_convention".into(),
        config.convention.kind().name().into(),
    );
    d.insert("apex_center_deg".into(), config.apex_center_deg.to_string());
    d.insert("sector_width_deg".into(), config.sector_width_deg.to_string());
    if let BranchConvention::ShiftLongitudes {
        phase_offset_deg,
        origin_shift_deg,
    } = config.convention
    {
        d.insert("phase_offset_deg".into(), phase_offset_deg.to_string());
        d.insert(
            "origin_shift_deg".into(),
            origin_shift_deg.map_or_else(|| "none".into(), |o| o.to_string()),
        );
    }
}

pub(crate) fn assignments(
    c: &mut Collector,
    assignments: &[BranchAssignment],
    config: Option<&BranchCoordinateConfig>,
) {
    let expected = config
        .map(|cfg| cfg.convention.kind())
        .or_else(|| assignments.first().map(|a| a.convention));
    for (i, a) in assignments.iter().enumerate() {
        if let Some(kind) = expected {
            if a.convention != kind {
                c.error(
                    IssueCode::BranchConventionMixed,
                    format!("/assignments/{i}/convention"),
                    format!(
                        "assignment uses {} but the computation uses {}",
                        a.convention.name(),
                        kind.name()
                    ),
                );
            }
        }
        if a.index >= 12 {
            c.error(
                IssueCode::InvalidBranchIndex,
                format!("/assignments/{i}/index"),
                format!("branch index {} not in [0, 11]", a.index),
            );
        }
        for (field, v) in [
            ("center_deg", a.center_deg),
            ("lower_bound_deg", a.lower_bound_deg),
            ("upper_bound_deg", a.upper_bound_deg),
        ] {
            if !in_circle(v) {
                c.error(
                    IssueCode::InvalidBranchBounds,
                    format!("/assignments/{i}/{field}"),
                    format!("{field} {v} not in [0, 360)"),
                );
            }
        }
        let d = a.distance_to_boundary_deg;
        if !(d.is_finite() && d >= 0.0) {
            c.error(
                IssueCode::InvalidBranchBounds,
                format!("/assignments/{i}/distance_to_boundary_deg"),
                format!("boundary distance {d} is negative or not finite"),
            );
        }
    }
}

pub(crate) fn soft_weights(
    c: &mut Collector,
    all: &[SoftWeights],
    tolerance: f64,
    evidence: &mut Evidence,
) {
    for (i, w) in all.iter().enumerate() {
        if let Some(b) = w.weights.iter().position(|x| !x.is_finite() || *x < 0.0) {
            c.error(
                IssueCode::SoftWeightNegative,
                format!("/soft_weights/{i}/weights/{b}"),
                format!("weight {} is negative or not finite", w.weights[b]),
            );
        }
        let sum = w.sum();
        let normalized = (sum - 1.0).abs() <= tolerance;
        if !normalized {
            c.error(
                IssueCode::SoftWeightsNotNormalized,
                format!("/soft_weights/{i}"),
                format!("weights sum to {sum}, expected 1 ± {tolerance:e}"),
            );
        }
        evidence.soft_weight_sums.push(sum);
    }
}

pub(crate) fn pillars(
    c: &mut Collector,
    pillars: Option<&FourPillars>,
    ruleset: Option<&Ruleset>,
    day_override_supplied: bool,
) {
    if let Some(p) = pillars {
        for (name, s) in [
            ("year", p.year),
            ("month", p.month),
            ("day", p.day),
            ("hour", p.hour),
        ] {
            if s.index() >= 60 {
                c.error(
                    IssueCode::InvalidPillarIndex,
                    format!("/pillars/{name}"),
                    format!("{name} cycle index {} not in [0, 59]", s.index()),
                );
            }
        }
    }

    let anchor_missing = ruleset.is_some_and(|r| r.day_cycle_anchor.is_none());
    let overridden = day_override_supplied || pillars.is_some_and(|p| p.day_overridden);
    if anchor_missing && !overridden {
        c.error(
            IssueCode::MissingDayCycleAnchor,
            "/ruleset/day_cycle_anchor",
            "ruleset has no day-cycle anchor and no day pillar override was supplied",
        );
    }
}

pub(crate) fn bodies(c: &mut Collector, bodies: &[WeightedBody]) {
    for b in bodies {
        if !in_circle(b.longitude_deg) {
            c.error(
                IssueCode::InvalidLambda,
                format!("/bodies/{}/longitude_deg", b.body),
                format!("body {}: longitude {} not in [0, 360)", b.body, b.longitude_deg),
            );
        }
    }
}

pub(crate) fn harmonics(
    c: &mut Collector,
    results: &[HarmonicResult],
    config: Option<&HarmonicConfig>,
    default_epsilon: f64,
    evidence: &mut Evidence,
) {
    if let Some(cfg) = config {
        match cfg.validate() {
            Ok(()) => {}
            Err(FusionError::EmptyOrders) => c.error(
                IssueCode::MissingHarmonics,
                "/harmonic_config/orders",
                "harmonic fusion requires at least one order",
            ),
            Err(e) => c.error(
                IssueCode::InvalidHarmonicConfig,
                "/harmonic_config",
                e.to_string(),
            ),
        }
    }
    let epsilon = config
        .map(|cfg| cfg.epsilon)
        .filter(|e| e.is_finite() && *e > 0.0)
        .unwrap_or(default_epsilon);

    for (i, r) in results.iter().enumerate() {
        if !(r.alignment.is_finite() && (-1.0..=1.0).contains(&r.alignment)) {
            c.error(
                IssueCode::InvalidAlignment,
                format!("/harmonics/{i}/alignment"),
                format!("k={}: alignment {} not in [-1, 1]", r.k, r.alignment),
            );
        }
        if !(r.intensity.is_finite() && r.intensity >= 0.0) {
            c.error(
                IssueCode::InvalidIntensity,
                format!("/harmonics/{i}/intensity"),
                format!("k={}: intensity {} is negative or not finite", r.k, r.intensity),
            );
        }
        let sub_epsilon =
            r.reference.magnitude < epsilon || r.object.magnitude < epsilon;
        if sub_epsilon && !r.degenerate {
            c.error(
                IssueCode::HarmonicDegeneracyUnflagged,
                format!("/harmonics/{i}/degenerate"),
                format!("k={}: magnitude below {epsilon:e} but not flagged", r.k),
            );
        }
        if r.degenerate && r.alignment != 0.0 {
            c.error(
                IssueCode::DegenerateAlignmentNonzero,
                format!("/harmonics/{i}/alignment"),
                format!("k={}: degenerate order reports alignment {}", r.k, r.alignment),
            );
        }
        evidence.harmonic_magnitudes.insert(
            r.k,
            OrderEvidence {
                reference_magnitude: r.reference.magnitude,
                object_magnitude: r.object.magnitude,
                degenerate: r.degenerate,
            },
        );
    }
}
