//! Quality metrics for a finished layout.
//!
//! All ratios are in `[0, 1]`. Rules are judged over room instances matched by
//! base name, so a rule about `"Bedroom"` covers `"Bedroom 2"` as well.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::config::LayoutConfig;
use crate::layout::{Building, Corridor, PlacedRoom};
use crate::program::{AdjacencyRule, AdjacencyStrength, AdjacencyTable};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutMetrics {
    /// Placed room area over envelope area.
    pub efficiency: f32,
    /// Corridor area over envelope area.
    pub circulation_ratio: f32,
    /// Satisfied over evaluated non-neutral adjacency rules.
    pub adjacency_satisfaction: f32,
    /// Placed rooms with an exterior wall over placed rooms.
    pub daylight_ratio: f32,
    /// Placed rooms over requested rooms.
    pub placement_success: f32,
    pub placed_count: usize,
    pub requested_count: usize,
    pub rules_evaluated: usize,
    pub rules_satisfied: usize,
}

fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator > 0.0 && numerator.is_finite() {
        (numerator / denominator).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// First pair of placed rooms that share floor area, if any.
fn first_intersection(placed: &[PlacedRoom]) -> Option<(&str, &str)> {
    placed.iter().enumerate().find_map(|(i, a)| {
        placed[i + 1..]
            .iter()
            .find(|b| a.rect().intersects(&b.rect()))
            .map(|b| (a.name.as_str(), b.name.as_str()))
    })
}

/// Compute every metric for a finished run. Placed rooms must not intersect;
/// room area is summed as-is.
pub fn compute_metrics(
    building: &Building,
    placed: &[PlacedRoom],
    corridors: &[Corridor],
    requested: usize,
    adjacency: &AdjacencyTable,
    config: &LayoutConfig,
) -> LayoutMetrics {
    debug_assert!(
        first_intersection(placed).is_none(),
        "placed rooms overlap: {:?}",
        first_intersection(placed)
    );
    let area = building.area();
    let room_area: f32 = placed.iter().map(PlacedRoom::area).sum();
    let corridor_area: f32 = corridors.iter().map(Corridor::area).sum();
    let exterior = placed.iter().filter(|r| r.has_exterior_wall).count();

    let (evaluated, satisfied) = adjacency_counts(placed, adjacency.rules(), config);
    let adjacency_satisfaction = if evaluated > 0 {
        satisfied as f32 / evaluated as f32
    } else if placed.is_empty() {
        0.0
    } else {
        1.0
    };

    let placement_success = if requested == 0 {
        1.0
    } else {
        ratio(placed.len() as f32, requested as f32)
    };

    LayoutMetrics {
        efficiency: ratio(room_area, area),
        circulation_ratio: ratio(corridor_area, area),
        adjacency_satisfaction,
        daylight_ratio: ratio(exterior as f32, placed.len() as f32),
        placement_success,
        placed_count: placed.len(),
        requested_count: requested,
        rules_evaluated: evaluated,
        rules_satisfied: satisfied,
    }
}

/// Whether a single pair of placed rooms satisfies `strength`.
pub fn pair_satisfies(
    a: &PlacedRoom,
    b: &PlacedRoom,
    strength: AdjacencyStrength,
    config: &LayoutConfig,
) -> bool {
    let ra = a.rect();
    let rb = b.rect();
    let wall = ra.shares_wall(&rb, config.wall_tolerance, config.min_shared_wall);
    let distance = ra.distance_to(&rb);
    let t = &config.thresholds;
    match strength {
        AdjacencyStrength::MustConnect => {
            wall && a.is_connected_to(&b.name) && b.is_connected_to(&a.name)
        }
        AdjacencyStrength::ShouldAdjacent => wall,
        AdjacencyStrength::PreferNear => distance < t.prefer_near_max,
        AdjacencyStrength::Neutral => true,
        AdjacencyStrength::ShouldSeparate => distance > t.should_separate_min && !wall,
        AdjacencyStrength::MustSeparate => distance > t.must_separate_min,
    }
}

/// `(evaluated, satisfied)` over rules whose rooms are both placed.
fn adjacency_counts(
    placed: &[PlacedRoom],
    rules: &[AdjacencyRule],
    config: &LayoutConfig,
) -> (usize, usize) {
    let mut evaluated = 0;
    let mut satisfied = 0;
    for rule in rules {
        if rule.strength == AdjacencyStrength::Neutral {
            continue;
        }
        let side_a: Vec<&PlacedRoom> =
            placed.iter().filter(|r| r.base_name == rule.room_a).collect();
        let side_b: Vec<&PlacedRoom> =
            placed.iter().filter(|r| r.base_name == rule.room_b).collect();
        let mut pairs = side_a
            .iter()
            .flat_map(|a| side_b.iter().map(move |b| (*a, *b)))
            .filter(|(a, b)| a.name != b.name)
            .peekable();
        if pairs.peek().is_none() {
            continue;
        }
        evaluated += 1;
        let ok = if rule.strength.wants_proximity() {
            pairs.any(|(a, b)| pair_satisfies(a, b, rule.strength, config))
        } else {
            pairs.all(|(a, b)| pair_satisfies(a, b, rule.strength, config))
        };
        if ok {
            satisfied += 1;
        }
    }
    (evaluated, satisfied)
}
