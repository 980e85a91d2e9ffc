//! JSON loading and fingerprint behavior.

use bazi_branch::ConventionKind;
use bazi_config::{ConfigError, EngineConfig, FusionMode};
use bazi_fusion::PhaseConvention;
use bazi_time::ComplianceMode;

const MINIMAL: &str = r#"{
    "parameter_set_id": "bazodiac-default",
    "fusion": {
        "harmonic": { "phase_convention": { "kind": "raw" } }
    }
}"#;

#[test]
fn minimal_document_takes_defaults() {
    let c = EngineConfig::from_json_str(MINIMAL).unwrap();
    assert_eq!(c.fusion.mode, FusionMode::HarmonicPhasor);
    assert_eq!(c.fusion.kappa, 4.0);
    assert_eq!(c.time.compliance_mode, ComplianceMode::Strict);
    assert_eq!(c.branch.convention.kind(), ConventionKind::ShiftBoundaries);
    assert_eq!(c.branch.apex_center_deg, 270.0);
    assert_eq!(c.ruleset.id, "standard_bazi");
    let h = c.harmonic_config().unwrap();
    assert_eq!(h.orders, vec![2, 3, 4, 6, 12]);
    assert_eq!(h.phase_convention, PhaseConvention::Raw);
}

#[test]
fn fingerprint_ignores_key_order() {
    let reordered = r#"{
        "fusion": {
            "harmonic": { "phase_convention": { "kind": "raw" } }
        },
        "parameter_set_id": "bazodiac-default"
    }"#;
    let a = EngineConfig::from_json_str(MINIMAL).unwrap();
    let b = EngineConfig::from_json_str(reordered).unwrap();
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}

#[test]
fn round_trip_through_pretty_json() {
    let a = EngineConfig::from_json_str(MINIMAL).unwrap();
    let b = EngineConfig::from_json_str(&a.to_json_pretty().unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn shifted_longitudes_without_origin_rejected() {
    let json = r#"{
        "parameter_set_id": "p",
        "branch": {
            "convention": { "kind": "shift_longitudes", "phase_offset_deg": 15.0, "origin_shift_deg": null }
        },
        "fusion": { "mode": "soft_kernel" }
    }"#;
    assert!(matches!(
        EngineConfig::from_json_str(json),
        Err(ConfigError::Branch(_))
    ));
}

#[test]
fn harmonic_config_without_phase_convention_rejected() {
    let json = r#"{
        "parameter_set_id": "p",
        "fusion": { "harmonic": { "orders": [2, 3] } }
    }"#;
    assert!(matches!(
        EngineConfig::from_json_str(json),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = EngineConfig::load(std::path::Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
