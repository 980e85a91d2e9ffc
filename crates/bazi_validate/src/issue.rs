//! Issue codes and severities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed catalog of findings. The string forms are stable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Birth event
    InvalidGeoLon,
    InvalidGeoLat,

    // Time chain
    InvalidTlst,
    InvalidLmst,
    InvalidHourBoundaryDistance,
    TlstDegraded,
    TlstDegradedWithoutFlag,
    TlstMissing,
    MissingTt,
    TtDegraded,
    EopMissing,
    EopPredicted,
    QualityFlagMismatch,
    LeapSecondsFileExpired,

    // Discretization
    InvalidBranchConfig,
    InconsistentBranchOriginForShiftedLongitudes,
    BranchConventionMixed,
    InvalidBranchIndex,
    InvalidBranchBounds,
    SoftWeightsNotNormalized,
    SoftWeightNegative,
    InvalidPillarIndex,
    MissingDayCycleAnchor,

    // Fusion
    InvalidLambda,
    MissingHarmonics,
    InvalidHarmonicConfig,
    InvalidAlignment,
    InvalidIntensity,
    HarmonicDegeneracyUnflagged,
    DegenerateAlignmentNonzero,
}

impl IssueCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidGeoLon => "INVALID_GEO_LON",
            Self::InvalidGeoLat => "INVALID_GEO_LAT",
            Self::InvalidTlst => "INVALID_TLST",
            Self::InvalidLmst => "INVALID_LMST",
            Self::InvalidHourBoundaryDistance => "INVALID_HOUR_BOUNDARY_DISTANCE",
            Self::TlstDegraded => "TLST_DEGRADED",
            Self::TlstDegradedWithoutFlag => "TLST_DEGRADED_WITHOUT_FLAG",
            Self::TlstMissing => "TLST_MISSING",
            Self::MissingTt => "MISSING_TT",
            Self::TtDegraded => "TT_DEGRADED",
            Self::EopMissing => "EOP_MISSING",
            Self::EopPredicted => "EOP_PREDICTED",
            Self::QualityFlagMismatch => "QUALITY_FLAG_MISMATCH",
            Self::LeapSecondsFileExpired => "LEAP_SECONDS_FILE_EXPIRED",
            Self::InvalidBranchConfig => "INVALID_BRANCH_CONFIG",
            Self::InconsistentBranchOriginForShiftedLongitudes => {
                "INCONSISTENT_BRANCH_ORIGIN_FOR_SHIFTED_LONGITUDES"
            }
            Self::BranchConventionMixed => "BRANCH_CONVENTION_MIXED",
            Self::InvalidBranchIndex => "INVALID_BRANCH_INDEX",
            Self::InvalidBranchBounds => "INVALID_BRANCH_BOUNDS",
            Self::SoftWeightsNotNormalized => "SOFT_WEIGHTS_NOT_NORMALIZED",
            Self::SoftWeightNegative => "SOFT_WEIGHT_NEGATIVE",
            Self::InvalidPillarIndex => "INVALID_PILLAR_INDEX",
            Self::MissingDayCycleAnchor => "MISSING_DAY_CYCLE_ANCHOR",
            Self::InvalidLambda => "INVALID_LAMBDA",
            Self::MissingHarmonics => "MISSING_HARMONICS",
            Self::InvalidHarmonicConfig => "INVALID_HARMONIC_CONFIG",
            Self::InvalidAlignment => "INVALID_ALIGNMENT",
            Self::InvalidIntensity => "INVALID_INTENSITY",
            Self::HarmonicDegeneracyUnflagged => "HARMONIC_DEGENERACY_UNFLAGGED",
            Self::DegenerateAlignmentNonzero => "DEGENERATE_ALIGNMENT_NONZERO",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, located by a JSON-pointer style path into the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    pub path: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.path, self.message)
    }
}
