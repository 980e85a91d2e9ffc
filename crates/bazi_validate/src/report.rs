//! Compliance report and its evidence snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::{Issue, IssueCode, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    Degraded,
    NonCompliant,
}

/// Magnitudes seen at one harmonic order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderEvidence {
    pub reference_magnitude: f64,
    pub object_magnitude: f64,
    pub degenerate: bool,
}

/// Quantities the checks looked at. All maps are ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub time: BTreeMap<String, String>,
    pub discretization: BTreeMap<String, String>,
    pub harmonic_magnitudes: BTreeMap<u32, OrderEvidence>,
    pub soft_weight_sums: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub status: ComplianceStatus,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub evidence: Evidence,
}

impl ComplianceReport {
    pub(crate) fn from_issues(issues: Vec<Issue>, evidence: Evidence) -> Self {
        let (errors, warnings): (Vec<Issue>, Vec<Issue>) = issues
            .into_iter()
            .partition(|i| i.severity == Severity::Error);
        let status = if !errors.is_empty() {
            ComplianceStatus::NonCompliant
        } else if !warnings.is_empty() {
            ComplianceStatus::Degraded
        } else {
            ComplianceStatus::Compliant
        };
        Self {
            status,
            errors,
            warnings,
            evidence,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }

    /// Whether any error or warning carries `code`.
    pub fn has(&self, code: IssueCode) -> bool {
        self.errors.iter().chain(&self.warnings).any(|i| i.code == code)
    }

    pub fn has_error(&self, code: IssueCode) -> bool {
        self.errors.iter().any(|i| i.code == code)
    }

    pub fn has_warning(&self, code: IssueCode) -> bool {
        self.warnings.iter().any(|i| i.code == code)
    }
}
