//! Error types for reference-data parsing and the time-scale chain.

use thiserror::Error;

/// Errors from LSK parsing or EOP lookup.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// LSK file parsing failed.
    #[error("LSK parse error: {0}")]
    LskParse(String),
    /// IERS EOP file parsing failed.
    #[error("EOP parse error: {0}")]
    EopParse(String),
    /// Requested epoch is outside the EOP table range.
    #[error("epoch outside EOP table range")]
    EopOutOfRange,
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
    /// UTC epoch precedes the first leap-second table entry (1972-Jan-01).
    #[error("UTC before the first leap-second table entry is not supported")]
    Pre1972Utc,
}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Stage of the time-scale chain that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeStage {
    /// Birth-event validation and local civil time → UTC.
    LocalToUtc,
    /// UTC → UT1.
    UtcToUt1,
    /// UTC/UT1 → TT.
    Tt,
    /// → true local solar time.
    Tlst,
}

impl TimeStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::LocalToUtc => "local_to_utc",
            Self::UtcToUt1 => "utc_to_ut1",
            Self::Tt => "tt",
            Self::Tlst => "tlst",
        }
    }
}

/// Failures of [`crate::compute_time_scales`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeModelError {
    /// A birth-event field is malformed or out of range.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    /// Timezone identifier is not known to the resolver.
    #[error("unknown timezone identifier `{0}`")]
    InvalidTimezone(String),
    /// Local time occurs twice (DST fold) and the policy is `error`.
    #[error(
        "ambiguous local time {local}: offsets {earlier_offset_s}s and {later_offset_s}s both apply"
    )]
    AmbiguousLocalTime {
        local: String,
        earlier_offset_s: i32,
        later_offset_s: i32,
    },
    /// Local time falls in a DST gap and the policy is `error`.
    #[error("local time {local} does not exist (DST gap)")]
    NonexistentLocalTime { local: String },
    /// TT could not be derived and strict compliance forbids degrading.
    #[error("TT unavailable under strict compliance: {reason}")]
    MissingTt { reason: String },
    /// TLST could not be derived and strict compliance forbids degrading.
    #[error("TLST unavailable under strict compliance: {reason}")]
    MissingTlst { reason: String },
    /// Reference data could not be used.
    #[error("reference data: {0}")]
    Reference(#[from] TimeError),
}

impl TimeModelError {
    /// The stage of the chain this error belongs to.
    pub fn stage(&self) -> TimeStage {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidTimezone(_)
            | Self::AmbiguousLocalTime { .. }
            | Self::NonexistentLocalTime { .. } => TimeStage::LocalToUtc,
            Self::Reference(TimeError::EopOutOfRange | TimeError::EopParse(_)) => {
                TimeStage::UtcToUt1
            }
            Self::MissingTt { .. } | Self::Reference(_) => TimeStage::Tt,
            Self::MissingTlst { .. } => TimeStage::Tlst,
        }
    }
}
