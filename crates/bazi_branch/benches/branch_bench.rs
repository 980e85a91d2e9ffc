use criterion::{Criterion, black_box, criterion_group, criterion_main};
use bazi_branch::{
    AssignmentMode, BranchCoordinateConfig, BranchInput, PillarInput, PillarOverrides, Ruleset,
    assign_branch, compute_pillars, soft_weights,
};

fn assignment_bench(c: &mut Criterion) {
    let config = BranchCoordinateConfig::default();

    let mut group = c.benchmark_group("assignment");
    group.bench_function("hard_longitude", |b| {
        b.iter(|| {
            assign_branch(
                BranchInput::Longitude(black_box(284.25)),
                AssignmentMode::Hard {
                    uncertainty_deg: 0.1,
                },
                &config,
            )
        })
    });
    group.bench_function("hard_hours", |b| {
        b.iter(|| {
            assign_branch(
                BranchInput::Hours(black_box(22.75)),
                AssignmentMode::Hard {
                    uncertainty_deg: 0.0,
                },
                &config,
            )
        })
    });
    group.bench_function("soft_weights", |b| {
        b.iter(|| soft_weights(black_box(123.456), black_box(4.0), &config))
    });
    group.finish();
}

fn pillars_bench(c: &mut Criterion) {
    let ruleset = Ruleset::standard();
    let input = PillarInput {
        civil_year: 2024,
        civil_month: 2,
        day_jdn: 2_460_351,
        sun_longitude_deg: 321.0,
        tlst_hours: 8.0,
    };

    c.bench_function("compute_pillars", |b| {
        b.iter(|| compute_pillars(black_box(&input), &ruleset, &PillarOverrides::default()))
    });
}

criterion_group!(benches, assignment_bench, pillars_bench);
criterion_main!(benches);
