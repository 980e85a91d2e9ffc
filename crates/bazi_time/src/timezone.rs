//! Local civil time → UTC.
//!
//! Named zones go through a [`TimezoneResolver`]; the default
//! [`ChronoTzResolver`] uses the IANA database compiled into `chrono-tz`.
//! DST folds and gaps are never resolved silently: [`DstPolicy::Error`]
//! rejects them, the other policies pick a documented branch.

use chrono::{LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TimeModelError;

/// Largest accepted fixed UTC offset, ±18 h.
pub const MAX_FIXED_OFFSET_S: i32 = 18 * 3600;

/// How the birth event's civil time relates to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimezoneSpec {
    /// Fixed offset east of Greenwich, in seconds.
    FixedOffset { seconds: i32 },
    /// IANA zone identifier such as `Europe/Berlin`.
    Named { id: String },
}

impl TimezoneSpec {
    pub fn named(id: impl Into<String>) -> Self {
        Self::Named { id: id.into() }
    }
}

/// Resolution of ambiguous (fold) and nonexistent (gap) local times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Fail on folds and gaps.
    #[default]
    Error,
    /// Fold: the earlier UTC instant. Gap: the pre-transition offset.
    Earlier,
    /// Fold: the later UTC instant. Gap: the post-transition offset.
    Later,
}

/// Offsets (seconds east of UTC) that apply to a local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalResolution {
    Single { offset_s: i32 },
    /// The wall-clock time occurs twice.
    Ambiguous { first_offset_s: i32, second_offset_s: i32 },
    /// The wall-clock time is skipped by a forward transition.
    Gap { before_offset_s: i32, after_offset_s: i32 },
}

/// Source of UTC offsets for named zones.
pub trait TimezoneResolver: Send + Sync {
    /// Short identifier recorded in provenance.
    fn name(&self) -> &str;

    fn resolve(&self, tz_id: &str, local: NaiveDateTime)
    -> Result<LocalResolution, TimeModelError>;
}

/// Resolver backed by the `chrono-tz` IANA database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzResolver;

impl TimezoneResolver for ChronoTzResolver {
    fn name(&self) -> &str {
        "chrono-tz"
    }

    fn resolve(
        &self,
        tz_id: &str,
        local: NaiveDateTime,
    ) -> Result<LocalResolution, TimeModelError> {
        let tz: Tz = tz_id
            .parse()
            .map_err(|_| TimeModelError::InvalidTimezone(tz_id.to_string()))?;

        Ok(match tz.offset_from_local_datetime(&local) {
            LocalResult::Single(off) => LocalResolution::Single {
                offset_s: off.fix().local_minus_utc(),
            },
            LocalResult::Ambiguous(a, b) => LocalResolution::Ambiguous {
                first_offset_s: a.fix().local_minus_utc(),
                second_offset_s: b.fix().local_minus_utc(),
            },
            LocalResult::None => {
                // Transitions are at least a day apart in every IANA zone.
                let day = TimeDelta::days(1);
                let before = tz.offset_from_utc_datetime(&(local - day));
                let after = tz.offset_from_utc_datetime(&(local + day));
                LocalResolution::Gap {
                    before_offset_s: before.fix().local_minus_utc(),
                    after_offset_s: after.fix().local_minus_utc(),
                }
            }
        })
    }
}

/// A local time mapped onto UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocal {
    pub utc: NaiveDateTime,
    /// Offset actually applied, seconds east of UTC.
    pub offset_s: i32,
    /// Human-readable record of how the offset was chosen.
    pub detail: String,
}

/// Convert a local wall-clock time to UTC under a DST policy.
pub fn resolve_local_time(
    local: NaiveDateTime,
    spec: &TimezoneSpec,
    policy: DstPolicy,
    resolver: &dyn TimezoneResolver,
) -> Result<ResolvedLocal, TimeModelError> {
    let (offset_s, detail) = match spec {
        TimezoneSpec::FixedOffset { seconds } => {
            if seconds.abs() > MAX_FIXED_OFFSET_S {
                return Err(TimeModelError::InvalidInput {
                    field: "timezone.seconds",
                    reason: format!("offset {seconds}s exceeds ±{MAX_FIXED_OFFSET_S}s"),
                });
            }
            (*seconds, format!("fixed offset {seconds:+}s"))
        }
        TimezoneSpec::Named { id } => {
            let choice = match resolver.resolve(id, local)? {
                LocalResolution::Single { offset_s } => (offset_s, "unique"),
                LocalResolution::Ambiguous {
                    first_offset_s,
                    second_offset_s,
                } => {
                    // The larger offset east of UTC yields the earlier instant.
                    let earlier = first_offset_s.max(second_offset_s);
                    let later = first_offset_s.min(second_offset_s);
                    match policy {
                        DstPolicy::Error => {
                            return Err(TimeModelError::AmbiguousLocalTime {
                                local: local.to_string(),
                                earlier_offset_s: earlier,
                                later_offset_s: later,
                            });
                        }
                        DstPolicy::Earlier => (earlier, "fold, earlier instant"),
                        DstPolicy::Later => (later, "fold, later instant"),
                    }
                }
                LocalResolution::Gap {
                    before_offset_s,
                    after_offset_s,
                } => match policy {
                    DstPolicy::Error => {
                        return Err(TimeModelError::NonexistentLocalTime {
                            local: local.to_string(),
                        });
                    }
                    DstPolicy::Earlier => (before_offset_s, "gap, pre-transition offset"),
                    DstPolicy::Later => (after_offset_s, "gap, post-transition offset"),
                },
            };
            let (offset_s, how) = choice;
            (
                offset_s,
                format!("{}:{id} {offset_s:+}s ({how})", resolver.name()),
            )
        }
    };

    let utc = local
        .checked_sub_signed(TimeDelta::seconds(offset_s as i64))
        .ok_or_else(|| TimeModelError::InvalidInput {
            field: "local_datetime",
            reason: "out of representable range".into(),
        })?;

    Ok(ResolvedLocal {
        utc,
        offset_s,
        detail,
    })
}
