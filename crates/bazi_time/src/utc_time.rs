//! UTC calendar date/time with sub-second precision.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Hours elapsed since 00:00 of the civil day.
    pub fn hours_of_day(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0
    }

    /// UTC Julian Date.
    pub fn to_jd(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day as f64 + self.hours_of_day() / 24.0)
    }

    /// Calendar form of a UTC Julian Date.
    pub fn from_jd(jd_utc: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd_utc);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * SECONDS_PER_DAY;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Ordinal day of the year, 1-based.
    pub fn day_of_year(&self) -> u32 {
        let jan1 = calendar_to_jd(self.year, 1, 1.0);
        let this = calendar_to_jd(self.year, self.month, self.day as f64);
        (this - jan1).round() as u32 + 1
    }
}

impl From<NaiveDateTime> for UtcTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second() as f64 + dt.nanosecond() as f64 * 1e-9,
        }
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_whole_seconds() {
        let t = UtcTime::new(2024, 1, 15, 0, 0, 0.0);
        assert_eq!(t.to_string(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn display_fractional_seconds() {
        let t = UtcTime::new(2024, 1, 15, 12, 30, 45.5);
        assert_eq!(t.to_string(), "2024-01-15T12:30:45.500000Z");
    }

    #[test]
    fn j2000_noon() {
        let t = UtcTime::new(2000, 1, 1, 12, 0, 0.0);
        assert_eq!(t.to_jd(), 2_451_545.0);
        assert!((t.hours_of_day() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn jd_roundtrip_minutes() {
        let t = UtcTime::new(1985, 6, 30, 18, 45, 0.0);
        let back = UtcTime::from_jd(t.to_jd());
        assert_eq!((back.year, back.month, back.day), (1985, 6, 30));
        assert!((back.hours_of_day() - t.hours_of_day()).abs() < 1e-6);
    }

    #[test]
    fn from_naive() {
        let dt = NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_milli_opt(8, 15, 30, 250)
            .unwrap();
        let t = UtcTime::from(dt);
        assert_eq!((t.year, t.month, t.day, t.hour, t.minute), (2024, 2, 10, 8, 15));
        assert!((t.second - 30.25).abs() < 1e-9);
    }

    #[test]
    fn ordinal_days() {
        assert_eq!(UtcTime::new(2024, 1, 1, 0, 0, 0.0).day_of_year(), 1);
        assert_eq!(UtcTime::new(2024, 3, 1, 0, 0, 0.0).day_of_year(), 61);
        assert_eq!(UtcTime::new(2023, 12, 31, 0, 0, 0.0).day_of_year(), 365);
    }
}
