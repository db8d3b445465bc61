//! Corridor layout per placement strategy.
//!
//! Corridors are fixed before the first room is placed; candidate generation
//! then snaps rooms to their faces.
use tracing::trace;

use crate::layout::config::{CorridorSide, LayoutConfig};
use crate::layout::grid::OccupancyGrid;
use crate::layout::{Building, Corridor, EntrySide, PlacementStrategy};

/// Derive the corridor rectangles for `strategy`.
pub fn layout_corridors(
    strategy: PlacementStrategy,
    building: &Building,
    config: &LayoutConfig,
) -> Vec<Corridor> {
    let w = building.width;
    let d = building.depth;
    if !(w > 0.0 && d > 0.0) {
        return Vec::new();
    }

    let corridors = match strategy {
        PlacementStrategy::Linear => vec![linear_corridor(building, config)],
        PlacementStrategy::DoubleLoaded | PlacementStrategy::Cluster => {
            let cw = config.corridor_width.min(d);
            vec![Corridor::new(0.0, (d - cw) * 0.5, w, cw, true)]
        }
        PlacementStrategy::LShape => l_corridors(building, config),
        PlacementStrategy::UShape | PlacementStrategy::Perimeter => Vec::new(),
    };

    trace!(
        "Strategy '{}' established {} corridor(s).",
        strategy,
        corridors.len()
    );
    corridors
}

/// Derive corridors and claim them in the occupancy grid.
pub fn establish_circulation(
    strategy: PlacementStrategy,
    building: &Building,
    config: &LayoutConfig,
    grid: &mut OccupancyGrid,
) -> Vec<Corridor> {
    let corridors = layout_corridors(strategy, building, config);
    for corridor in &corridors {
        grid.mark(&corridor.rect());
    }
    corridors
}

fn linear_corridor(building: &Building, config: &LayoutConfig) -> Corridor {
    let w = building.width;
    let d = building.depth;
    let side = match config.linear_corridor_side {
        CorridorSide::Entry => building.entry_side,
        CorridorSide::Opposite => building.entry_side.opposite(),
    };
    match side {
        EntrySide::South => Corridor::new(0.0, 0.0, w, config.corridor_width.min(d), true),
        EntrySide::North => {
            let cw = config.corridor_width.min(d);
            Corridor::new(0.0, d - cw, w, cw, true)
        }
        EntrySide::West => Corridor::new(0.0, 0.0, config.corridor_width.min(w), d, true),
        EntrySide::East => {
            let cw = config.corridor_width.min(w);
            Corridor::new(w - cw, 0.0, cw, d, true)
        }
    }
}

/// A horizontal spine at one-third depth meeting an upright spur at two-thirds
/// width.
fn l_corridors(building: &Building, config: &LayoutConfig) -> Vec<Corridor> {
    let w = building.width;
    let d = building.depth;
    let cw = config.corridor_width.min(d).min(w);

    let spine_y = (d / 3.0 - cw * 0.5).clamp(0.0, d - cw);
    let spur_x = (w * 2.0 / 3.0 - cw * 0.5).clamp(0.0, w - cw);

    let mut corridors = vec![Corridor::new(0.0, spine_y, spur_x + cw, cw, true)];
    let spur_y = spine_y + cw;
    let spur_depth = d - spur_y;
    if spur_depth > 0.0 {
        corridors.push(Corridor::new(spur_x, spur_y, cw, spur_depth, false));
    }
    corridors
}
