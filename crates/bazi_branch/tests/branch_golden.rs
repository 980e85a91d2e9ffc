//! Golden vectors for sector assignment (apex 270°, width 30°) and the hour grid.

use bazi_branch::{
    AssignmentMode, BranchAssignment, BranchConvention, BranchCoordinateConfig, BranchError,
    BranchInput, BranchOutput, SOFT_WEIGHT_SUM_TOLERANCE, SoftWeights, assign_branch,
};
use proptest::prelude::*;

fn hard(input: BranchInput, config: &BranchCoordinateConfig) -> BranchAssignment {
    match assign_branch(
        input,
        AssignmentMode::Hard {
            uncertainty_deg: 0.0,
        },
        config,
    )
    .unwrap()
    {
        BranchOutput::Hard(a) => a,
        other => panic!("expected hard output, got {other:?}"),
    }
}

fn soft(lon: f64, kappa: f64) -> SoftWeights {
    match assign_branch(
        BranchInput::Longitude(lon),
        AssignmentMode::Soft { kappa },
        &BranchCoordinateConfig::default(),
    )
    .unwrap()
    {
        BranchOutput::Soft(w) => w,
        other => panic!("expected soft output, got {other:?}"),
    }
}

#[test]
fn longitude_vectors() {
    let config = BranchCoordinateConfig::default();
    for (lon, expected) in [
        (275.0, 0),
        (284.9999, 0),
        (285.0, 1),
        (255.0, 0),
        (254.9999, 11),
    ] {
        let a = hard(BranchInput::Longitude(lon), &config);
        assert_eq!(a.index, expected, "λ = {lon}");
    }
}

#[test]
fn tlst_vectors() {
    // The hour grid ignores the longitude geometry.
    let config = BranchCoordinateConfig {
        apex_center_deg: 123.0,
        ..BranchCoordinateConfig::default()
    };
    for (h, expected) in [(23.0, 0), (0.9999, 0), (1.0, 1), (22.9999, 11)] {
        let a = hard(BranchInput::Hours(h), &config);
        assert_eq!(a.index, expected, "TLST = {h}");
    }
}

#[test]
fn shifted_longitudes_without_origin_is_error() {
    let config = BranchCoordinateConfig {
        convention: BranchConvention::ShiftLongitudes {
            phase_offset_deg: 15.0,
            origin_shift_deg: None,
        },
        ..BranchCoordinateConfig::default()
    };
    let r = assign_branch(
        BranchInput::Longitude(275.0),
        AssignmentMode::Hard {
            uncertainty_deg: 0.0,
        },
        &config,
    );
    assert!(matches!(r, Err(BranchError::InconsistentOrigin { .. })));
}

#[test]
fn soft_weights_symmetric_at_boundary() {
    // 285° sits exactly between the centers of 0 (270°) and 1 (300°).
    let w = soft(285.0, 4.0);
    assert!((w.weights[0] - w.weights[1]).abs() < 1e-12);
    assert!((w.sum() - 1.0).abs() < SOFT_WEIGHT_SUM_TOLERANCE);
    assert_eq!(w.kappa, 4.0);
}

#[test]
fn half_open_bounds_are_reported() {
    let config = BranchCoordinateConfig::default();
    for lon in [0.0, 44.0, 255.0, 284.9999, 359.9] {
        let a = hard(BranchInput::Longitude(lon), &config);
        let bounds = bazi_angle::SectorBounds {
            lower_deg: a.lower_bound_deg,
            upper_deg: a.upper_bound_deg,
        };
        assert!(bounds.contains(lon), "λ = {lon} outside {bounds:?}");
    }
}

proptest! {
    #[test]
    fn soft_weights_normalized(lon in -720.0f64..720.0, kappa in 0.01f64..500.0) {
        let w = soft(lon, kappa);
        prop_assert!((w.sum() - 1.0).abs() < SOFT_WEIGHT_SUM_TOLERANCE);
        prop_assert!(w.weights.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn hard_index_in_range(lon in -1.0e6f64..1.0e6) {
        let a = hard(BranchInput::Longitude(lon), &BranchCoordinateConfig::default());
        prop_assert!(a.index < 12);
        prop_assert!(a.distance_to_boundary_deg <= 15.0 + 1e-9);
    }
}
