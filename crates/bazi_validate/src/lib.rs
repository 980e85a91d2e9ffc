//! Stateless compliance checks for BaZodiac computations.
//!
//! [`validate`] accepts any subset of the engine's intermediate and final
//! structures and returns a [`ComplianceReport`]:
//! - `NON_COMPLIANT` if any error fired
//! - `DEGRADED` if only warnings fired
//! - `COMPLIANT` otherwise
//!
//! Convention violations and invariant breaches are always errors. Data
//! quality findings (missing TT, predicted UT1, degraded TLST, expired leap
//! table) are errors under strict compliance and warnings otherwise.

mod checks;
pub mod config;
pub mod error;
pub mod inputs;
pub mod issue;
pub mod report;

use tracing::{debug, warn};

pub use config::ValidationConfig;
pub use error::ValidationConfigError;
pub use inputs::ValidationInputs;
pub use issue::{Issue, IssueCode, Severity};
pub use report::{ComplianceReport, ComplianceStatus, Evidence, OrderEvidence};

use checks::Collector;

pub fn validate(inputs: &ValidationInputs<'_>, config: &ValidationConfig) -> ComplianceReport {
    let config = match config.validate() {
        Ok(()) => *config,
        Err(e) => {
            warn!(error = %e, "invalid validator settings; using defaults for tolerances");
            ValidationConfig::default().with_mode(config.compliance_mode)
        }
    };

    let mut c = Collector::new(config.compliance_mode);
    let mut evidence = Evidence::default();
    evidence.time.insert(
        "compliance_mode".into(),
        config.compliance_mode.name().into(),
    );

    if let Some(event) = inputs.birth_event {
        checks::birth_event(&mut c, event);
    }
    if let Some(ts) = inputs.time_scales {
        checks::time_scales(&mut c, ts, &mut evidence);
    }
    if let Some(cfg) = inputs.branch_config {
        checks::branch_config(&mut c, cfg, &mut evidence);
    }
    checks::assignments(&mut c, inputs.assignments, inputs.branch_config);
    checks::soft_weights(
        &mut c,
        inputs.soft_weights,
        config.soft_weight_tolerance,
        &mut evidence,
    );
    checks::pillars(
        &mut c,
        inputs.pillars,
        inputs.ruleset,
        inputs.day_override_supplied,
    );
    checks::bodies(&mut c, inputs.bodies);
    checks::harmonics(
        &mut c,
        inputs.harmonics,
        inputs.harmonic_config,
        config.harmonic_epsilon,
        &mut evidence,
    );

    let report = ComplianceReport::from_issues(c.issues, evidence);
    debug!(
        status = ?report.status,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}
