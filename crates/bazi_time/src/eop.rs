//! IERS Earth Orientation Parameters: UT1−UTC lookup with prediction flags.
//!
//! Parses the IERS finals2000A.all fixed-width format. Each row keeps its
//! DUT1 value and whether IERS marked it as a prediction (`P`) rather than
//! a final/rapid value (`I`). Interpolated samples are `predicted` when
//! either bracketing row is.
//!
//! File format (relevant columns, 1-indexed):
//! - Col  8-15: Modified Julian Date (F8.2)
//! - Col 58:    Flag 'I' (IERS) or 'P' (prediction)
//! - Col 59-68: UT1−UTC in seconds (F10.7)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{MJD_OFFSET, SECONDS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct EopRow {
    mjd: f64,
    dut1_s: f64,
    predicted: bool,
}

/// An interpolated DUT1 value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dut1Sample {
    /// UT1 − UTC in seconds.
    pub dut1_s: f64,
    /// At least one bracketing row is an IERS prediction.
    pub predicted: bool,
}

/// Parsed DUT1 table, sorted ascending by MJD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EopData {
    rows: Vec<EopRow>,
}

impl EopData {
    /// Load a finals2000A.all file from disk.
    pub fn load(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_finals(&content)
    }

    /// Parse IERS finals2000A.all text.
    ///
    /// Rows with a blank or unparseable MJD/DUT1 field are skipped.
    pub fn parse_finals(content: &str) -> Result<Self, TimeError> {
        let mut rows: Vec<EopRow> = content.lines().filter_map(parse_row).collect();

        if rows.is_empty() {
            return Err(TimeError::EopParse("no valid DUT1 entries found".into()));
        }

        rows.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Ok(Self { rows })
    }

    /// Build from explicit `(mjd, dut1_s, predicted)` rows.
    pub fn from_rows(rows: &[(f64, f64, bool)]) -> Result<Self, TimeError> {
        let mut rows: Vec<EopRow> = rows
            .iter()
            .map(|&(mjd, dut1_s, predicted)| EopRow {
                mjd,
                dut1_s,
                predicted,
            })
            .collect();
        if rows.is_empty() {
            return Err(TimeError::EopParse("EOP table is empty".into()));
        }
        if rows
            .iter()
            .any(|r| !r.mjd.is_finite() || !r.dut1_s.is_finite())
        {
            return Err(TimeError::EopParse("non-finite EOP row".into()));
        }
        rows.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Ok(Self { rows })
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// MJD range covered by the table: (first, last).
    pub fn range(&self) -> (f64, f64) {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => (first.mjd, last.mjd),
            _ => (f64::NAN, f64::NAN),
        }
    }

    /// DUT1 at a given MJD, linearly interpolated between daily rows.
    pub fn dut1_at_mjd(&self, mjd: f64) -> Result<Dut1Sample, TimeError> {
        let (mjd_start, mjd_end) = self.range();
        if !(mjd >= mjd_start && mjd <= mjd_end) {
            return Err(TimeError::EopOutOfRange);
        }

        let idx = self.rows.partition_point(|r| r.mjd < mjd).saturating_sub(1);
        let r0 = self.rows[idx];
        let Some(&r1) = self.rows.get(idx + 1) else {
            return Ok(Dut1Sample {
                dut1_s: r0.dut1_s,
                predicted: r0.predicted,
            });
        };

        if mjd <= r0.mjd || (r1.mjd - r0.mjd).abs() < 1e-12 {
            return Ok(Dut1Sample {
                dut1_s: r0.dut1_s,
                predicted: r0.predicted,
            });
        }

        let frac = (mjd - r0.mjd) / (r1.mjd - r0.mjd);
        Ok(Dut1Sample {
            dut1_s: r0.dut1_s + frac * (r1.dut1_s - r0.dut1_s),
            predicted: r0.predicted || r1.predicted,
        })
    }

    /// DUT1 at a UTC Julian Date.
    pub fn dut1_at_jd(&self, jd_utc: f64) -> Result<Dut1Sample, TimeError> {
        self.dut1_at_mjd(jd_utc - MJD_OFFSET)
    }

    /// Convert a UTC Julian Date to a UT1 Julian Date.
    pub fn utc_to_ut1_jd(&self, jd_utc: f64) -> Result<f64, TimeError> {
        let sample = self.dut1_at_jd(jd_utc)?;
        Ok(jd_utc + sample.dut1_s / SECONDS_PER_DAY)
    }
}

fn parse_row(line: &str) -> Option<EopRow> {
    let mjd: f64 = line.get(7..15)?.trim().parse().ok()?;
    let dut1_s: f64 = line.get(58..68)?.trim().parse().ok()?;
    let predicted = line.get(57..58) == Some("P");
    Some(EopRow {
        mjd,
        dut1_s,
        predicted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(mjd: f64, flag: u8, dut1: f64) -> String {
        let mut line = vec![b' '; 70];
        line[7..15].copy_from_slice(format!("{mjd:8.2}").as_bytes());
        line[57] = flag;
        line[58..68].copy_from_slice(format!("{dut1:10.7}").as_bytes());
        String::from_utf8(line).unwrap()
    }

    fn test_snippet() -> String {
        [
            line(60000.00, b'I', 0.1234567),
            line(60001.00, b'I', 0.2345678),
            line(60002.00, b'P', -0.1000000),
        ]
        .join("\n")
    }

    #[test]
    fn parse_small_snippet() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        assert_eq!(data.len(), 3);
        let (start, end) = data.range();
        assert!((start - 60000.0).abs() < 0.01);
        assert!((end - 60002.0).abs() < 0.01);
    }

    #[test]
    fn interpolation_exact() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        let s = data.dut1_at_mjd(60000.0).unwrap();
        assert!((s.dut1_s - 0.1234567).abs() < 1e-7);
        assert!(!s.predicted);
    }

    #[test]
    fn interpolation_midpoint() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        let s = data.dut1_at_mjd(60000.5).unwrap();
        let expected = (0.1234567 + 0.2345678) / 2.0;
        assert!((s.dut1_s - expected).abs() < 1e-7, "got {}", s.dut1_s);
        assert!(!s.predicted);
    }

    #[test]
    fn predicted_row_taints_interval() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        assert!(data.dut1_at_mjd(60001.5).unwrap().predicted);
        assert!(data.dut1_at_mjd(60002.0).unwrap().predicted);
    }

    #[test]
    fn out_of_range() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        assert_eq!(data.dut1_at_mjd(59999.0), Err(TimeError::EopOutOfRange));
        assert_eq!(data.dut1_at_mjd(60003.0), Err(TimeError::EopOutOfRange));
        assert_eq!(data.dut1_at_mjd(f64::NAN), Err(TimeError::EopOutOfRange));
    }

    #[test]
    fn blank_dut1_skipped() {
        let mut snippet = test_snippet();
        let mut blank_line = vec![b' '; 70];
        blank_line[7..15].copy_from_slice(format!("{:8.2}", 60003.00).as_bytes());
        snippet.push('\n');
        snippet.push_str(&String::from_utf8(blank_line).unwrap());

        let data = EopData::parse_finals(&snippet).unwrap();
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn utc_to_ut1_offset() {
        let data = EopData::parse_finals(&test_snippet()).unwrap();
        let jd_utc = 2_460_000.5;
        let jd_ut1 = data.utc_to_ut1_jd(jd_utc).unwrap();
        let expected = jd_utc + 0.1234567 / 86_400.0;
        assert!((jd_ut1 - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            EopData::parse_finals("short\nlines"),
            Err(TimeError::EopParse(_))
        ));
        assert!(matches!(EopData::from_rows(&[]), Err(TimeError::EopParse(_))));
    }
}
