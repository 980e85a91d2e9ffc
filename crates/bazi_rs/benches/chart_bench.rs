use criterion::{Criterion, black_box, criterion_group, criterion_main};
use bazi_rs::bazi_time::LeapEntry;
use bazi_rs::*;

fn chart_bench(c: &mut Criterion) {
    let leap = LeapSecondTable::from_entries(vec![LeapEntry {
        jd_utc: 2_457_754.5,
        tai_minus_utc_s: 37.0,
    }])
    .expect("leap table");
    let refdata = ReferenceData::default().with_leap_seconds(leap, "bench");
    let event = BirthEvent::from_civil(
        2024,
        2,
        10,
        10,
        0,
        0,
        TimezoneSpec::named("Asia/Shanghai"),
        116.4,
        39.9,
    )
    .expect("event")
    .with_overrides(TimeOverrides {
        dut1_s: Some(-0.01),
        ..TimeOverrides::default()
    });
    let bodies = [
        BodyPosition::new("sun", 321.0),
        BodyPosition::new("moon", 12.5),
        BodyPosition::new("mars", 305.1),
    ];
    let config = EngineConfig::new("bench", HarmonicConfig::new(PhaseConvention::Raw));

    c.bench_function("compute_chart_harmonic", |b| {
        b.iter(|| {
            compute_chart(
                black_box(&event),
                &refdata,
                black_box(&bodies),
                &PillarOverrides::default(),
                &config,
            )
        })
    });
}

criterion_group!(benches, chart_bench);
criterion_main!(benches);
