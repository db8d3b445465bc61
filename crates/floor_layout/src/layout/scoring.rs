//! Additive desirability score for a trial room position.
use crate::geometry::Rect;
use crate::layout::config::LayoutConfig;
use crate::layout::{Building, Corridor, PlacedRoom, RoomProfile};
use crate::program::{
    AdjacencyStrength, AdjacencyTable, DaylightRequirement, PlacementConstraint,
    PlacementPriority, Zone,
};

/// Everything the scorer reads besides the trial rectangle.
pub struct ScoringContext<'a> {
    pub building: &'a Building,
    pub corridors: &'a [Corridor],
    pub placed: &'a [PlacedRoom],
    /// Parallel to `placed`: whether the room clusters plumbing.
    pub plumbing: &'a [bool],
    pub adjacency: &'a AdjacencyTable,
    pub config: &'a LayoutConfig,
}

/// Per-term contributions of a position score.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub adjacency: f32,
    pub daylight: f32,
    pub entry: f32,
    pub corridor: f32,
    pub plumbing: f32,
    pub corner: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.adjacency + self.daylight + self.entry + self.corridor + self.plumbing + self.corner
    }
}

impl ScoringContext<'_> {
    fn shares_wall(&self, a: &Rect, b: &Rect) -> bool {
        a.shares_wall(b, self.config.wall_tolerance, self.config.min_shared_wall)
    }
}

/// Contribution of one placed neighbor with the given rule strength.
pub fn adjacency_term(
    strength: AdjacencyStrength,
    shares_wall: bool,
    distance: f32,
    config: &LayoutConfig,
) -> f32 {
    let w = &config.weights;
    let s = strength.value() as f32;
    if strength.is_door_capable() && shares_wall {
        w.shared_wall_bonus * s / 3.0
    } else if strength.wants_proximity() {
        let falloff = (1.0 - distance / w.proximity_falloff).max(0.0);
        w.proximity_bonus * s / 3.0 * falloff
    } else if strength.wants_separation() {
        if shares_wall {
            w.separation_penalty
        } else if distance > w.separation_distance {
            w.separation_bonus
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Score `room` with its footprint at `rect`.
pub fn score_position(room: &RoomProfile, rect: &Rect, ctx: &ScoringContext<'_>) -> ScoreBreakdown {
    let config = ctx.config;
    let weights = &config.weights;
    let building = ctx.building;
    let mut score = ScoreBreakdown::default();

    for other in ctx.placed {
        let strength = ctx.adjacency.strength(&room.base_name, &other.base_name);
        if strength == AdjacencyStrength::Neutral {
            continue;
        }
        let other_rect = other.rect();
        score.adjacency += adjacency_term(
            strength,
            ctx.shares_wall(rect, &other_rect),
            rect.distance_to(&other_rect),
            config,
        );
    }

    let exterior = rect.touches_boundary(building.width, building.depth, config.edge_tolerance);
    score.daylight = match room.rule.daylight {
        DaylightRequirement::Required if exterior => weights.daylight_required_bonus,
        DaylightRequirement::Required => weights.daylight_required_penalty,
        DaylightRequirement::Preferred if exterior => weights.daylight_preferred_bonus,
        _ => 0.0,
    };

    if room.zone == Zone::Public || room.priority == PlacementPriority::NearEntry {
        let reach = building.max_dimension();
        if reach > 0.0 {
            let distance = rect.center().distance(building.entry_point());
            score.entry = weights.entry_bonus * (1.0 - distance / reach).max(0.0);
        }
    }

    if ctx
        .corridors
        .iter()
        .any(|c| rect.is_near_face(&c.rect(), config.corridor_snap))
    {
        score.corridor = weights.corridor_bonus;
    }

    if room.has(PlacementConstraint::PlumbingCluster)
        && ctx
            .placed
            .iter()
            .zip(ctx.plumbing)
            .any(|(other, plumbing)| *plumbing && ctx.shares_wall(rect, &other.rect()))
    {
        score.plumbing = weights.plumbing_bonus;
    }

    if room.has(PlacementConstraint::Corner)
        && rect.is_near_corner(building.width, building.depth, config.corner_radius)
    {
        score.corner = weights.corner_bonus;
    }

    score
}
