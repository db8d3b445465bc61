mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use floor_layout::layout::candidates::{generate_candidates, CandidateContext};
use floor_layout::layout::circulation::establish_circulation;
use floor_layout::layout::grid::OccupancyGrid;
use floor_layout::layout::RoomProfile;
use floor_layout::prelude::{
    normalize_program, AdjacencyTable, Building, LayoutConfig, PlacementStrategy, RuleProvider,
};

fn candidates_envelope_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates/envelope");
    let rules = common::bench_rules();
    let config = LayoutConfig::default();
    let program = normalize_program(&common::random_program(8, 0x1234));
    let room = &program.rooms()[1];

    for &side in &[40.0f32, 80.0, 160.0] {
        let building = Building::new(side, side * 0.75);
        let table = AdjacencyTable::from_rules(rules.adjacencies(building.building_type));
        let profile = RoomProfile::resolve(room, building.building_type, &rules, &table);

        for strategy in [PlacementStrategy::DoubleLoaded, PlacementStrategy::Perimeter] {
            let mut grid = OccupancyGrid::new(building.width, building.depth, config.cell_size);
            let corridors = establish_circulation(strategy, &building, &config, &mut grid);
            let cells = grid.cols() * grid.rows();
            group.throughput(common::elements_throughput(cells));

            group.bench_with_input(
                BenchmarkId::new(strategy.label(), side as u32),
                &side,
                |b, _| {
                    let ctx = CandidateContext {
                        building: &building,
                        strategy,
                        corridors: &corridors,
                        grid: &grid,
                        placed: &[],
                        config: &config,
                    };
                    b.iter(|| {
                        let set = generate_candidates(&profile, &ctx);
                        black_box(set);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = candidates_envelope_benches
}
criterion_main!(benches);
