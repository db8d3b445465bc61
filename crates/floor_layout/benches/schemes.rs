mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use floor_layout::prelude::{
    generate_schemes, rank_schemes, Building, BuildingType, LayoutConfig, SchemeConfig,
};

fn schemes_generate_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("schemes/generate");
    let rules = common::bench_rules();
    let layout = LayoutConfig::default();
    let config = SchemeConfig::default();
    let building = Building::new(80.0, 45.0).with_building_type(BuildingType::Office);
    let requests = common::random_program(14, 0x5C4E3E);

    for &count in &[1usize, 3, 6] {
        group.throughput(common::elements_throughput(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let schemes =
                    generate_schemes(&building, &requests, count, &rules, &layout, &config);
                black_box(schemes);
            });
        });
    }

    group.finish();
}

fn schemes_rank_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("schemes/rank");
    let rules = common::bench_rules();
    let building = Building::new(60.0, 60.0).with_building_type(BuildingType::Residential);
    let requests = common::random_program(10, 0xABCD);
    let schemes = generate_schemes(
        &building,
        &requests,
        6,
        &rules,
        &LayoutConfig::default(),
        &SchemeConfig::default(),
    );
    group.throughput(common::elements_throughput(schemes.len()));

    group.bench_function("ranked_input", |b| {
        b.iter(|| {
            let mut ranked = schemes.clone();
            rank_schemes(&mut ranked);
            black_box(ranked);
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = schemes_generate_benches,
              schemes_rank_benches
}
criterion_main!(benches);
