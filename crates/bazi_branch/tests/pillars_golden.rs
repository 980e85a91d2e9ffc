//! Golden four-pillar charts.

use bazi_branch::{
    BranchError, MonthSegmentation, PillarInput, PillarOverrides, Ruleset, Sexagenary,
    compute_pillars,
};

fn names(p: &bazi_branch::FourPillars) -> [String; 4] {
    [p.year, p.month, p.day, p.hour].map(|s| s.to_string())
}

#[test]
fn new_year_2000() {
    // 2000-01-01 12:00 local solar time, sun ≈ 280.0°.
    let input = PillarInput {
        civil_year: 2000,
        civil_month: 1,
        day_jdn: 2_451_545,
        sun_longitude_deg: 280.0,
        tlst_hours: 12.0,
    };
    let p = compute_pillars(&input, &Ruleset::standard(), &PillarOverrides::default()).unwrap();
    // JiMao year (1999), BingZi month, WuWu day, WuWu hour.
    assert_eq!(names(&p), ["JiMao", "BingZi", "WuWu", "WuWu"]);
    assert!(!p.day_overridden);
    assert_eq!(p.branch_indices(), [3, 0, 6, 6]);
    assert_eq!(p.hidden_stems.day.len(), 2);
}

#[test]
fn lichun_2024() {
    // 2024-02-10, sun ≈ 321°, 08:00 TLST.
    let input = PillarInput {
        civil_year: 2024,
        civil_month: 2,
        day_jdn: 2_460_351,
        sun_longitude_deg: 321.0,
        tlst_hours: 8.0,
    };
    let p = compute_pillars(&input, &Ruleset::standard(), &PillarOverrides::default()).unwrap();
    assert_eq!(p.year.to_string(), "JiaChen");
    assert_eq!(p.month.to_string(), "BingYin");
    assert_eq!(p.day, Sexagenary::from_cycle(40));
    assert_eq!(p.hour.branch().name(), "Chen");
    assert!(!p.diagnostics.month_unstable);
}

#[test]
fn missing_anchor_requires_override() {
    let mut ruleset = Ruleset::standard();
    ruleset.day_cycle_anchor = None;
    let input = PillarInput {
        civil_year: 2024,
        civil_month: 2,
        day_jdn: 2_460_351,
        sun_longitude_deg: 321.0,
        tlst_hours: 8.0,
    };
    assert_eq!(
        compute_pillars(&input, &ruleset, &PillarOverrides::default()),
        Err(BranchError::MissingDayCycleAnchor)
    );

    let overrides = PillarOverrides {
        day: Some(Sexagenary::from_cycle(40)),
        ..PillarOverrides::default()
    };
    let p = compute_pillars(&input, &ruleset, &overrides).unwrap();
    assert!(p.day_overridden);
    assert_eq!(p.day.to_string(), "JiaChen");
}

#[test]
fn apex_segmentation_month_needs_override() {
    let ruleset = Ruleset {
        month_segmentation: MonthSegmentation::ApexCentered,
        ..Ruleset::standard()
    };
    let input = PillarInput {
        civil_year: 2024,
        civil_month: 6,
        day_jdn: 2_460_482,
        sun_longitude_deg: 90.0,
        tlst_hours: 12.0,
    };
    assert!(matches!(
        compute_pillars(&input, &ruleset, &PillarOverrides::default()),
        Err(BranchError::UnsupportedConfiguration(_))
    ));
}
