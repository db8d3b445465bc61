//! Candidate position generation for a single room.
//!
//! Positions are the lower-left corners of trial footprints. Generation is
//! deterministic: the enumeration order produced here is the tie-break order
//! used by selection.
use std::collections::HashSet;

use glam::Vec2;
use tracing::trace;

use crate::geometry::{steps, Rect, EPSILON};
use crate::layout::config::LayoutConfig;
use crate::layout::grid::OccupancyGrid;
use crate::layout::{
    Building, Corridor, EntrySide, PlacedRoom, PlacementStrategy, RoomProfile,
};
use crate::program::{DaylightRequirement, PlacementConstraint, PlacementPriority, Zone};

/// Read-only view of the run state candidate generation needs.
pub struct CandidateContext<'a> {
    pub building: &'a Building,
    pub strategy: PlacementStrategy,
    pub corridors: &'a [Corridor],
    pub grid: &'a OccupancyGrid,
    pub placed: &'a [PlacedRoom],
    pub config: &'a LayoutConfig,
}

impl CandidateContext<'_> {
    /// Inside the envelope and clear of the grid, every corridor, and every
    /// placed room.
    pub fn is_open(&self, rect: &Rect) -> bool {
        rect.is_within(self.building.width, self.building.depth)
            && self.grid.is_free(rect)
            && self
                .corridors
                .iter()
                .all(|c| !rect.intersects(&c.rect()))
            && self
                .placed
                .iter()
                .all(|p| !rect.overlaps(&p.rect(), self.config.overlap_buffer))
    }

    fn is_near_corridor(&self, rect: &Rect) -> bool {
        self.corridors
            .iter()
            .any(|c| rect.is_near_face(&c.rect(), self.config.corridor_snap))
    }
}

/// How positions are enumerated for a room.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementMode {
    /// Flush with an exterior edge.
    Perimeter,
    /// Inset from every edge.
    Core,
    /// Anywhere in the search ranges.
    Free,
}

/// Where the surviving positions came from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateSource {
    /// Mode positions adjacent to a corridor (or all mode positions when there
    /// is no corridor to snap to).
    Primary,
    /// Mode positions with the corridor filter relaxed.
    Relaxed,
    /// Exhaustive scan of the whole footprint.
    Fallback,
}

/// Surviving positions for one room, in enumeration order.
#[derive(Clone, Debug)]
pub struct CandidateSet {
    pub positions: Vec<Vec2>,
    pub mode: PlacementMode,
    pub source: CandidateSource,
    /// Positions enumerated before any filtering.
    pub enumerated: usize,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

/// Enumeration mode for a room under `strategy`.
pub fn placement_mode(room: &RoomProfile, strategy: PlacementStrategy) -> PlacementMode {
    if room.has(PlacementConstraint::Perimeter)
        || room.rule.daylight == DaylightRequirement::Required
    {
        PlacementMode::Perimeter
    } else if room.has(PlacementConstraint::Core) {
        PlacementMode::Core
    } else if strategy == PlacementStrategy::Perimeter {
        PlacementMode::Perimeter
    } else {
        PlacementMode::Free
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    lo: f32,
    hi: f32,
}

impl Span {
    fn contains(&self, v: f32) -> bool {
        v >= self.lo - EPSILON && v <= self.hi + EPSILON
    }

    fn steps(&self, step: f32) -> Vec<f32> {
        steps(self.lo, self.hi, step)
    }
}

/// X and Y ranges for the lower-left corner, narrowed to the entry band for
/// public and near-entry rooms and to the far band for back rooms.
fn search_spans(room: &RoomProfile, building: &Building) -> (Span, Span) {
    let w = building.width;
    let d = building.depth;
    let mut xs = Span {
        lo: 0.0,
        hi: w - room.width,
    };
    let mut ys = Span {
        lo: 0.0,
        hi: d - room.depth,
    };

    let band_side = if room.zone == Zone::Public || room.priority == PlacementPriority::NearEntry
    {
        Some(building.entry_side)
    } else if room.priority == PlacementPriority::Back {
        Some(building.entry_side.opposite())
    } else {
        None
    };

    if let Some(side) = band_side {
        let bx = w / 3.0;
        let by = d / 3.0;
        match side {
            EntrySide::South => ys.hi = ys.hi.min(by),
            EntrySide::North => ys.lo = ys.lo.max(d - by - room.depth),
            EntrySide::West => xs.hi = xs.hi.min(bx),
            EntrySide::East => xs.lo = xs.lo.max(w - bx - room.width),
        }
    }

    (xs, ys)
}

fn edge_order(entry: EntrySide) -> [EntrySide; 4] {
    if entry.is_horizontal() {
        [entry, entry.opposite(), EntrySide::West, EntrySide::East]
    } else {
        [entry, entry.opposite(), EntrySide::South, EntrySide::North]
    }
}

fn perimeter_positions(
    room: &RoomProfile,
    building: &Building,
    xs: Span,
    ys: Span,
    step: f32,
) -> Vec<Vec2> {
    let mut out = Vec::new();
    for edge in edge_order(building.entry_side) {
        match edge {
            EntrySide::South if ys.contains(0.0) => {
                out.extend(xs.steps(step).into_iter().map(|x| Vec2::new(x, 0.0)));
            }
            EntrySide::North if ys.contains(building.depth - room.depth) => {
                let y = building.depth - room.depth;
                out.extend(xs.steps(step).into_iter().map(|x| Vec2::new(x, y)));
            }
            EntrySide::West if xs.contains(0.0) => {
                out.extend(ys.steps(step).into_iter().map(|y| Vec2::new(0.0, y)));
            }
            EntrySide::East if xs.contains(building.width - room.width) => {
                let x = building.width - room.width;
                out.extend(ys.steps(step).into_iter().map(|y| Vec2::new(x, y)));
            }
            _ => {}
        }
    }
    out
}

fn core_positions(
    room: &RoomProfile,
    building: &Building,
    xs: Span,
    ys: Span,
    step: f32,
) -> Vec<Vec2> {
    let inset = room.width.max(room.depth);
    let core_x = Span {
        lo: xs.lo.max(inset),
        hi: xs.hi.min(building.width - room.width - inset),
    };
    let core_y = Span {
        lo: ys.lo.max(inset),
        hi: ys.hi.min(building.depth - room.depth - inset),
    };
    grid_positions(core_x, core_y, step)
}

fn grid_positions(xs: Span, ys: Span, step: f32) -> Vec<Vec2> {
    let x_steps = xs.steps(step);
    let mut out = Vec::with_capacity(x_steps.len() * 4);
    for y in ys.steps(step) {
        out.extend(x_steps.iter().map(|&x| Vec2::new(x, y)));
    }
    out
}

fn dedup_in_order(positions: Vec<Vec2>) -> Vec<Vec2> {
    let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(positions.len());
    positions
        .into_iter()
        .filter(|p| seen.insert((p.x.to_bits(), p.y.to_bits())))
        .collect()
}

/// The open court of a U-shaped plan: the middle third of the entry edge,
/// reaching two-thirds of the way in.
pub fn courtyard(building: &Building) -> Rect {
    let w = building.width;
    let d = building.depth;
    match building.entry_side {
        EntrySide::South => Rect::new(w / 3.0, 0.0, w / 3.0, d * 2.0 / 3.0),
        EntrySide::North => Rect::new(w / 3.0, d / 3.0, w / 3.0, d * 2.0 / 3.0),
        EntrySide::West => Rect::new(0.0, d / 3.0, w * 2.0 / 3.0, d / 3.0),
        EntrySide::East => Rect::new(w / 3.0, d / 3.0, w * 2.0 / 3.0, d / 3.0),
    }
}

/// Keep the positions matching `keep`, or all of them when none match.
fn filter_or_keep(positions: Vec<Vec2>, keep: impl Fn(&Vec2) -> bool) -> (Vec<Vec2>, bool) {
    let filtered: Vec<Vec2> = positions.iter().copied().filter(|p| keep(p)).collect();
    if filtered.is_empty() {
        (positions, false)
    } else {
        (filtered, true)
    }
}

/// Enumerate, filter and overlap-check trial positions for `room`.
pub fn generate_candidates(room: &RoomProfile, ctx: &CandidateContext<'_>) -> CandidateSet {
    let step = ctx.config.step;
    let building = ctx.building;
    let mode = placement_mode(room, ctx.strategy);
    let (xs, ys) = search_spans(room, building);

    let enumerated = match mode {
        PlacementMode::Perimeter => perimeter_positions(room, building, xs, ys, step),
        PlacementMode::Core => core_positions(room, building, xs, ys, step),
        PlacementMode::Free => grid_positions(xs, ys, step),
    };
    let enumerated = dedup_in_order(enumerated);
    let enumerated_count = enumerated.len();

    let mut positions = enumerated;
    if ctx.strategy == PlacementStrategy::UShape {
        let court = courtyard(building);
        positions = filter_or_keep(positions, |p| !room.rect_at(*p).intersects(&court)).0;
    }

    let snaps_to_corridor = !ctx.corridors.is_empty() && room.zone != Zone::Service;
    let (snapped, snapped_applied) = if snaps_to_corridor {
        filter_or_keep(positions.clone(), |p| ctx.is_near_corridor(&room.rect_at(*p)))
    } else {
        (positions.clone(), false)
    };

    let open = |candidates: &[Vec2]| -> Vec<Vec2> {
        candidates
            .iter()
            .copied()
            .filter(|p| ctx.is_open(&room.rect_at(*p)))
            .collect()
    };

    let primary = open(&snapped);
    let (positions, source) = if !primary.is_empty() {
        let source = if snaps_to_corridor && !snapped_applied {
            CandidateSource::Relaxed
        } else {
            CandidateSource::Primary
        };
        (primary, source)
    } else {
        let relaxed = if snapped_applied {
            open(&positions)
        } else {
            Vec::new()
        };
        if !relaxed.is_empty() {
            (relaxed, CandidateSource::Relaxed)
        } else {
            let full = grid_positions(
                Span {
                    lo: 0.0,
                    hi: building.width - room.width,
                },
                Span {
                    lo: 0.0,
                    hi: building.depth - room.depth,
                },
                step,
            );
            (open(&full), CandidateSource::Fallback)
        }
    };

    trace!(
        "Room '{}' ({:?}): {} enumerated, {} open via {:?}.",
        room.name,
        mode,
        enumerated_count,
        positions.len(),
        source
    );

    CandidateSet {
        positions,
        mode,
        source,
        enumerated: enumerated_count,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::layout::circulation::establish_circulation;
    use crate::program::RoomRule;

    fn profile(name: &str, width: f32, depth: f32, zone: Zone) -> RoomProfile {
        RoomProfile {
            name: name.into(),
            base_name: name.into(),
            width,
            depth,
            zone,
            priority: PlacementPriority::Middle,
            rule: RoomRule::default(),
            adjacency_weight: 0,
        }
    }

    struct Fixture {
        building: Building,
        grid: OccupancyGrid,
        corridors: Vec<Corridor>,
        config: LayoutConfig,
        strategy: PlacementStrategy,
    }

    impl Fixture {
        fn new(width: f32, depth: f32, strategy: PlacementStrategy) -> Self {
            let building = Building::new(width, depth);
            let config = LayoutConfig::default();
            let mut grid = OccupancyGrid::new(width, depth, config.cell_size);
            let corridors = establish_circulation(strategy, &building, &config, &mut grid);
            Self {
                building,
                grid,
                corridors,
                config,
                strategy,
            }
        }

        fn generate(&self, room: &RoomProfile, placed: &[PlacedRoom]) -> CandidateSet {
            let ctx = CandidateContext {
                building: &self.building,
                strategy: self.strategy,
                corridors: &self.corridors,
                grid: &self.grid,
                placed,
                config: &self.config,
            };
            generate_candidates(room, &ctx)
        }
    }

    fn placed(name: &str, rect: Rect) -> PlacedRoom {
        PlacedRoom {
            name: name.into(),
            base_name: name.into(),
            x: rect.min.x,
            y: rect.min.y,
            width: rect.size.x,
            depth: rect.size.y,
            zone: Zone::Private,
            has_exterior_wall: false,
            connected_to: BTreeSet::new(),
        }
    }

    #[test]
    fn corridor_filter_snaps_to_faces() {
        let fx = Fixture::new(40.0, 30.0, PlacementStrategy::DoubleLoaded);
        let room = profile("Office", 12.0, 10.0, Zone::SemiPublic);
        let set = fx.generate(&room, &[]);
        assert_eq!(set.source, CandidateSource::Primary);
        assert!(!set.is_empty());
        for p in &set.positions {
            assert!(p.y == 2.0 || p.y == 18.0, "unexpected y {}", p.y);
        }
        assert_eq!(set.positions[0], Vec2::new(0.0, 2.0));
    }

    #[test]
    fn service_rooms_ignore_corridor_filter() {
        let fx = Fixture::new(40.0, 30.0, PlacementStrategy::DoubleLoaded);
        let room = profile("Storage", 6.0, 6.0, Zone::Service);
        let set = fx.generate(&room, &[]);
        assert_eq!(set.positions[0], Vec2::new(0.0, 0.0));
        assert!(set.positions.iter().any(|p| p.y == 0.0));
    }

    #[test]
    fn required_daylight_enumerates_only_edges() {
        let fx = Fixture::new(60.0, 60.0, PlacementStrategy::Cluster);
        let mut room = profile("Bedroom", 12.0, 12.0, Zone::Private);
        room.rule = RoomRule::new(DaylightRequirement::Required);
        let set = fx.generate(&room, &[]);
        assert_eq!(set.mode, PlacementMode::Perimeter);
        for p in &set.positions {
            let r = room.rect_at(*p);
            assert!(r.touches_boundary(60.0, 60.0, 0.01), "interior position {p:?}");
        }
    }

    #[test]
    fn core_positions_are_inset() {
        let fx = Fixture::new(60.0, 60.0, PlacementStrategy::Perimeter);
        let mut room = profile("Vault", 8.0, 6.0, Zone::Service);
        room.rule = RoomRule::default().with_constraint(PlacementConstraint::Core);
        let set = fx.generate(&room, &[]);
        assert_eq!(set.mode, PlacementMode::Core);
        assert_eq!(set.source, CandidateSource::Primary);
        for p in &set.positions {
            assert!(p.x >= 8.0 && p.y >= 8.0);
            assert!(p.x + 8.0 <= 52.0 && p.y + 6.0 <= 52.0);
        }
    }

    #[test]
    fn public_rooms_stay_in_entry_band() {
        let fx = Fixture::new(60.0, 60.0, PlacementStrategy::Perimeter);
        let room = profile("Lobby", 10.0, 10.0, Zone::Public);
        let set = fx.generate(&room, &[]);
        assert!(set.positions.iter().all(|p| p.y <= 20.0));
    }

    #[test]
    fn overlapping_positions_are_discarded() {
        let fx = Fixture::new(30.0, 20.0, PlacementStrategy::Perimeter);
        let blocker = placed("Blocker", Rect::new(0.0, 0.0, 30.0, 10.0));
        let room = profile("Den", 10.0, 10.0, Zone::Private);
        let set = fx.generate(&room, std::slice::from_ref(&blocker));
        assert!(!set.is_empty());
        for p in &set.positions {
            assert!(!room.rect_at(*p).intersects(&blocker.rect()));
        }
    }

    #[test]
    fn full_envelope_falls_back_then_empties() {
        let fx = Fixture::new(20.0, 20.0, PlacementStrategy::Perimeter);
        let room = profile("Den", 10.0, 10.0, Zone::Private);
        let blockers = vec![
            placed("A", Rect::new(0.0, 0.0, 20.0, 10.0)),
            placed("B", Rect::new(0.0, 10.0, 20.0, 10.0)),
        ];
        let set = fx.generate(&room, &blockers);
        assert_eq!(set.source, CandidateSource::Fallback);
        assert!(set.is_empty());
    }

    #[test]
    fn oversized_room_has_no_candidates() {
        let fx = Fixture::new(10.0, 10.0, PlacementStrategy::DoubleLoaded);
        let room = profile("Hall", 20.0, 5.0, Zone::Public);
        let set = fx.generate(&room, &[]);
        assert!(set.is_empty());
        assert_eq!(set.enumerated, 0);
    }

    #[test]
    fn u_shape_keeps_rooms_out_of_courtyard() {
        let fx = Fixture::new(60.0, 45.0, PlacementStrategy::UShape);
        let room = profile("Classroom", 10.0, 10.0, Zone::Private);
        let court = courtyard(&fx.building);
        let set = fx.generate(&room, &[]);
        assert!(!set.is_empty());
        assert!(set
            .positions
            .iter()
            .all(|p| !room.rect_at(*p).intersects(&court)));
    }
}
