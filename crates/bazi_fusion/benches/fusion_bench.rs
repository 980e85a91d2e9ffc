use criterion::{Criterion, black_box, criterion_group, criterion_main};
use bazi_fusion::{
    HarmonicConfig, PhaseConvention, WeightedBody, WeightedCategory, compute_harmonics, summarize,
};

fn harmonics_bench(c: &mut Criterion) {
    let config = HarmonicConfig::new(PhaseConvention::Raw);
    let cats = [
        WeightedCategory::new("year", 4, 1.0),
        WeightedCategory::new("month", 2, 1.0),
        WeightedCategory::new("day", 4, 1.0),
        WeightedCategory::new("hour", 4, 1.0),
    ];
    let bodies: Vec<WeightedBody> = [
        ("sun", 321.0),
        ("moon", 12.5),
        ("mercury", 300.2),
        ("venus", 290.8),
        ("mars", 305.1),
        ("jupiter", 37.4),
        ("saturn", 340.9),
    ]
    .iter()
    .map(|&(b, l)| WeightedBody::new(b, l, 1.0))
    .collect();

    c.bench_function("compute_harmonics_default_orders", |b| {
        b.iter(|| compute_harmonics(black_box(&cats), black_box(&bodies), &config))
    });
    c.bench_function("compute_and_summarize", |b| {
        b.iter(|| {
            compute_harmonics(black_box(&cats), black_box(&bodies), &config)
                .map(|r| summarize(&r))
        })
    });
}

criterion_group!(benches, harmonics_bench);
criterion_main!(benches);
