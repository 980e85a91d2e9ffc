//! Alignment range, degeneracy and phase-convention behavior.

use bazi_fusion::{
    HarmonicConfig, PhaseConvention, WeightedBody, WeightedCategory, compute_harmonics,
};
use proptest::prelude::*;

fn raw(orders: &[u32]) -> HarmonicConfig {
    HarmonicConfig::new(PhaseConvention::Raw).with_orders(orders)
}

#[test]
fn body_on_category_center_aligns_at_every_order() {
    // Category 0 sits at 270° with the default geometry.
    let cats = [WeightedCategory::new("hour", 0, 1.0)];
    let bodies = [WeightedBody::new("sun", 270.0, 2.0)];
    let results = compute_harmonics(&cats, &bodies, &raw(&[1, 2, 3, 4, 6, 12])).unwrap();
    for r in &results {
        assert!(!r.degenerate, "k = {}", r.k);
        assert!((r.alignment - 1.0).abs() < 1e-9, "k = {}", r.k);
        assert!((r.reference.magnitude - 1.0).abs() < 1e-12);
        assert!((r.object.magnitude - 2.0).abs() < 1e-12);
        assert!((r.intensity - 9.0).abs() < 1e-9);
        assert!((r.cross_term - 2.0).abs() < 1e-9);
    }
}

#[test]
fn opposite_body_anti_aligns_at_odd_orders() {
    let cats = [WeightedCategory::new("hour", 0, 1.0)];
    let bodies = [WeightedBody::new("moon", 90.0, 1.0)];
    let results = compute_harmonics(&cats, &bodies, &raw(&[1, 2, 3])).unwrap();
    assert!((results[0].alignment + 1.0).abs() < 1e-9);
    assert!((results[1].alignment - 1.0).abs() < 1e-9);
    assert!((results[2].alignment + 1.0).abs() < 1e-9);
    assert!(results[0].intensity < 1e-20);
}

#[test]
fn twelve_categories_cancel_below_twelfth_order() {
    let cats: Vec<WeightedCategory> = (0..12u8)
        .map(|i| WeightedCategory::new(format!("c{i}"), i, 1.0))
        .collect();
    let bodies = [WeightedBody::new("sun", 10.0, 1.0)];
    let results = compute_harmonics(&cats, &bodies, &raw(&[2, 3, 4, 6, 12])).unwrap();
    for r in &results[..4] {
        assert!(r.degenerate, "k = {}", r.k);
        assert_eq!(r.alignment, 0.0);
        assert_eq!(r.cross_term, 0.0);
    }
    // At k = 12 every center maps to phase 0.
    let k12 = &results[4];
    assert!(!k12.degenerate);
    assert!((k12.reference.magnitude - 12.0).abs() < 1e-9);
}

#[test]
fn apex_shift_changes_object_phase_only() {
    let cats = [WeightedCategory::new("hour", 0, 1.0)];
    let bodies = [WeightedBody::new("sun", 0.0, 1.0)];
    let shifted = HarmonicConfig::new(PhaseConvention::ApexShifted { offset_deg: 90.0 })
        .with_orders(&[1]);
    let r = &compute_harmonics(&cats, &bodies, &shifted).unwrap()[0];
    // 0° − 90° = 270°, on top of category 0.
    assert!((r.alignment - 1.0).abs() < 1e-9);

    let r = &compute_harmonics(&cats, &bodies, &raw(&[1])).unwrap()[0];
    assert!(r.alignment.abs() < 1e-9);
}

proptest! {
    #[test]
    fn alignment_bounded_and_degenerate_is_zero(
        idx in proptest::collection::vec(0u8..12, 0..6),
        lons in proptest::collection::vec(-720.0f64..720.0, 0..6),
        w in 0.0f64..5.0,
    ) {
        let cats: Vec<WeightedCategory> = idx
            .iter()
            .map(|&i| WeightedCategory::new("c", i, w))
            .collect();
        let bodies: Vec<WeightedBody> = lons
            .iter()
            .map(|&l| WeightedBody::new("b", l, 1.0))
            .collect();
        let results = compute_harmonics(&cats, &bodies, &raw(&[2, 3, 4, 6, 12])).unwrap();
        for r in results {
            prop_assert!((-1.0..=1.0).contains(&r.alignment));
            prop_assert!(r.intensity >= 0.0);
            if r.degenerate {
                prop_assert_eq!(r.alignment, 0.0);
                prop_assert_eq!(r.cross_term, 0.0);
            }
        }
    }
}
