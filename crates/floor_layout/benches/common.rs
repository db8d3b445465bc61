use std::time::Duration;

use criterion::{Criterion, Throughput};
use floor_layout::prelude::{
    AdjacencyStrength, DaylightRequirement, PlacementConstraint, PlacementPriority, RoomRequest,
    RoomRule, TableRules, Zone,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

const NAMES: [&str; 8] = [
    "Lobby", "Office", "Conference", "Kitchen", "Bath", "Storage", "Lounge", "Study",
];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Rule set shared by every bench so scores exercise all terms.
pub fn bench_rules() -> TableRules {
    TableRules::new()
        .with_room("Lobby", Zone::Public, PlacementPriority::NearEntry)
        .with_room("Storage", Zone::Service, PlacementPriority::Back)
        .with_room("Bath", Zone::Service, PlacementPriority::Middle)
        .with_room("Office", Zone::Private, PlacementPriority::Perimeter)
        .with_room_rule("Office", RoomRule::new(DaylightRequirement::Preferred))
        .with_room_rule("Study", RoomRule::new(DaylightRequirement::Required))
        .with_room_rule(
            "Bath",
            RoomRule::default().with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_room_rule(
            "Kitchen",
            RoomRule::default().with_constraint(PlacementConstraint::PlumbingCluster),
        )
        .with_adjacency("Lobby", "Conference", AdjacencyStrength::ShouldAdjacent)
        .with_adjacency("Kitchen", "Lounge", AdjacencyStrength::MustConnect)
        .with_adjacency("Office", "Study", AdjacencyStrength::PreferNear)
        .with_adjacency("Storage", "Lobby", AdjacencyStrength::ShouldSeparate)
}

/// `count` rooms with seeded random sizes drawn from the bench vocabulary.
pub fn random_program(count: usize, seed: u64) -> Vec<RoomRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let width = 6.0 + (rng.random::<f32>() * 10.0).round();
            let depth = 6.0 + (rng.random::<f32>() * 8.0).round();
            RoomRequest::new(NAMES[i % NAMES.len()], width, depth)
        })
        .collect()
}
