//! Leap-second table (TAI−UTC) and NAIF Leapseconds Kernel parsing.
//!
//! Parses the `\begindata` section of an LSK file and keeps only what the
//! UTC → TT stage needs: the DELTET/DELTA_AT step table and the fixed
//! TT − TAI offset.
//!
//! Reference: NAIF Time Required Reading (public domain, US Government work product).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, month_from_abbrev};

/// TT − TAI in seconds (fixed by definition).
pub const TT_MINUS_TAI_S: f64 = 32.184;

/// One step of the TAI−UTC table, effective from `jd_utc` onward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeapEntry {
    /// UTC Julian Date at which this offset takes effect.
    pub jd_utc: f64,
    /// TAI − UTC in seconds.
    pub tai_minus_utc_s: f64,
}

/// TAI−UTC step table, sorted ascending by effective date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeapSecondTable {
    entries: Vec<LeapEntry>,
    /// UTC Julian Date after which the table is no longer guaranteed complete.
    pub expires_jd_utc: Option<f64>,
}

impl LeapSecondTable {
    /// Build from explicit entries. Entries are sorted by date.
    pub fn from_entries(mut entries: Vec<LeapEntry>) -> Result<Self, TimeError> {
        if entries.is_empty() {
            return Err(TimeError::LskParse("leap-second table is empty".into()));
        }
        if entries
            .iter()
            .any(|e| !e.jd_utc.is_finite() || !e.tai_minus_utc_s.is_finite())
        {
            return Err(TimeError::LskParse("non-finite leap-second entry".into()));
        }
        entries.sort_by(|a, b| a.jd_utc.total_cmp(&b.jd_utc));
        Ok(Self {
            entries,
            expires_jd_utc: None,
        })
    }

    /// Attach an expiry date.
    pub fn with_expiry(mut self, expires_jd_utc: f64) -> Self {
        self.expires_jd_utc = Some(expires_jd_utc);
        self
    }

    /// Load an LSK file from a path.
    pub fn load(path: &Path) -> Result<Self, TimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_lsk(&content)
    }

    /// Parse an LSK from its text content.
    pub fn parse_lsk(content: &str) -> Result<Self, TimeError> {
        let data_text = extract_data_section(content)?;
        let pool = parse_kernel_pool(&data_text)?;

        let delta_t_a = get_scalar(&pool, "DELTET/DELTA_T_A")?;
        if (delta_t_a - TT_MINUS_TAI_S).abs() > 1e-9 {
            return Err(TimeError::LskParse(format!(
                "DELTET/DELTA_T_A = {delta_t_a}, expected {TT_MINUS_TAI_S}"
            )));
        }

        let delta_at_vals = pool
            .get("DELTET/DELTA_AT")
            .ok_or_else(|| TimeError::LskParse("missing DELTET/DELTA_AT".into()))?;
        Self::from_entries(build_leap_table(delta_at_vals)?)
    }

    /// The table entries in date order.
    pub fn entries(&self) -> &[LeapEntry] {
        &self.entries
    }

    /// TAI − UTC in seconds at a UTC Julian Date.
    pub fn tai_minus_utc(&self, jd_utc: f64) -> Result<f64, TimeError> {
        let idx = self.entries.partition_point(|e| e.jd_utc <= jd_utc);
        if idx == 0 {
            return Err(TimeError::Pre1972Utc);
        }
        Ok(self.entries[idx - 1].tai_minus_utc_s)
    }

    /// TT − UTC in seconds at a UTC Julian Date.
    pub fn tt_minus_utc(&self, jd_utc: f64) -> Result<f64, TimeError> {
        Ok(self.tai_minus_utc(jd_utc)? + TT_MINUS_TAI_S)
    }

    /// Whether the table has expired as of `now_jd_utc`.
    pub fn is_expired(&self, now_jd_utc: f64) -> bool {
        self.expires_jd_utc.is_some_and(|exp| now_jd_utc > exp)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Pool of named variables: name → list of f64 values.
type KernelPool = BTreeMap<String, Vec<f64>>;

/// Find text between `\begindata` and `\begintext` (or EOF).
fn extract_data_section(content: &str) -> Result<String, TimeError> {
    let mut in_data = false;
    let mut data_lines = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("\\begindata") {
            in_data = true;
            continue;
        }
        if trimmed.eq_ignore_ascii_case("\\begintext") {
            in_data = false;
            continue;
        }
        if in_data {
            data_lines.push(line);
        }
    }

    if data_lines.is_empty() {
        return Err(TimeError::LskParse("no \\begindata section found".into()));
    }

    Ok(data_lines.join("\n"))
}

/// Parse NAIF kernel pool variable assignments (`NAME = VALUE` or
/// `NAME = ( VALUES )` spanning several lines).
fn parse_kernel_pool(text: &str) -> Result<KernelPool, TimeError> {
    let mut pool = KernelPool::new();
    let mut current_name: Option<String> = None;
    let mut current_values: Vec<f64> = Vec::new();
    let mut in_array = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(eq_pos) = trimmed.find('=') {
            if let Some(name) = current_name.take() {
                pool.insert(name, std::mem::take(&mut current_values));
            }

            let name = trimmed[..eq_pos].trim().to_string();
            let mut rhs = trimmed[eq_pos + 1..].trim();
            if let Some(stripped) = rhs.strip_prefix('(') {
                in_array = true;
                rhs = stripped;
            }
            if let Some(stripped) = rhs.strip_suffix(')') {
                in_array = false;
                rhs = stripped;
            }

            current_name = Some(name);
            parse_values(rhs, &mut current_values)?;
        } else if in_array {
            let line_data = match trimmed.strip_suffix(')') {
                Some(stripped) => {
                    in_array = false;
                    stripped
                }
                None => trimmed,
            };
            parse_values(line_data, &mut current_values)?;
        }
    }

    if let Some(name) = current_name {
        pool.insert(name, current_values);
    }

    Ok(pool)
}

/// Parse whitespace/comma-separated values: plain floats, Fortran `D`
/// exponents, and `@YYYY-MON-DD` date literals (returned as UTC JD).
fn parse_values(text: &str, out: &mut Vec<f64>) -> Result<(), TimeError> {
    for token in text.split([' ', ',', '\t']).filter(|t| !t.is_empty()) {
        if let Some(date_str) = token.strip_prefix('@') {
            out.push(parse_naif_date(date_str)?);
        } else {
            let normalized = token.replace('D', "E").replace('d', "e");
            let val: f64 = normalized
                .parse()
                .map_err(|e| TimeError::LskParse(format!("cannot parse '{token}' as f64: {e}")))?;
            out.push(val);
        }
    }
    Ok(())
}

/// Parse a NAIF date literal like `1972-JAN-1` into a UTC Julian Date.
fn parse_naif_date(s: &str) -> Result<f64, TimeError> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(TimeError::LskParse(format!("bad date literal: @{s}")));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|_| TimeError::LskParse(format!("bad year in @{s}")))?;
    let month = month_from_abbrev(parts[1])
        .ok_or_else(|| TimeError::LskParse(format!("bad month in @{s}")))?;
    let day: f64 = parts[2]
        .parse()
        .map_err(|_| TimeError::LskParse(format!("bad day in @{s}")))?;

    Ok(calendar_to_jd(year, month, day))
}

/// DELTET/DELTA_AT is a flat list of `[delta_at, epoch, delta_at, epoch, ...]`.
fn build_leap_table(flat: &[f64]) -> Result<Vec<LeapEntry>, TimeError> {
    if flat.len() % 2 != 0 {
        return Err(TimeError::LskParse(
            "DELTET/DELTA_AT must have even number of values".into(),
        ));
    }

    Ok(flat
        .chunks(2)
        .map(|pair| LeapEntry {
            tai_minus_utc_s: pair[0],
            jd_utc: pair[1],
        })
        .collect())
}

fn get_scalar(pool: &KernelPool, name: &str) -> Result<f64, TimeError> {
    pool.get(name)
        .and_then(|vals| vals.first().copied())
        .ok_or_else(|| TimeError::LskParse(format!("missing {name}")))
}
