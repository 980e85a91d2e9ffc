//! Reference data supplied by the caller: leap seconds, EOP, ΔT.

use serde::{Deserialize, Serialize};

use crate::eop::EopData;
use crate::lsk::LeapSecondTable;

/// A reference value together with where it came from, or its absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefValue<T> {
    Available { value: T, provenance: String },
    Missing,
}

impl<T> RefValue<T> {
    pub fn available(value: T, provenance: impl Into<String>) -> Self {
        Self::Available {
            value,
            provenance: provenance.into(),
        }
    }

    /// Value and provenance, if present.
    pub fn get(&self) -> Option<(&T, &str)> {
        match self {
            Self::Available { value, provenance } => Some((value, provenance.as_str())),
            Self::Missing => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.get().map(|(v, _)| v)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<T> Default for RefValue<T> {
    fn default() -> Self {
        Self::Missing
    }
}

/// Reference data bundle consumed by the time-scale chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub leap_seconds: RefValue<LeapSecondTable>,
    #[serde(default)]
    pub eop: RefValue<EopData>,
    /// Externally provided ΔT = TT − UT1 in seconds.
    #[serde(default)]
    pub delta_t_s: RefValue<f64>,
}

impl ReferenceData {
    pub fn with_leap_seconds(mut self, table: LeapSecondTable, provenance: &str) -> Self {
        self.leap_seconds = RefValue::available(table, provenance);
        self
    }

    pub fn with_eop(mut self, eop: EopData, provenance: &str) -> Self {
        self.eop = RefValue::available(eop, provenance);
        self
    }

    pub fn with_delta_t(mut self, delta_t_s: f64, provenance: &str) -> Self {
        self.delta_t_s = RefValue::available(delta_t_s, provenance);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_missing() {
        let r = ReferenceData::default();
        assert!(r.leap_seconds.is_missing());
        assert!(r.eop.is_missing());
        assert!(r.delta_t_s.value().is_none());
    }

    #[test]
    fn provenance_kept() {
        let r = ReferenceData::default().with_delta_t(69.2, "operator");
        assert_eq!(r.delta_t_s.get(), Some((&69.2, "operator")));
    }
}
