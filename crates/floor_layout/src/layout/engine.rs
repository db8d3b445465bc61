//! Placement engine: drives circulation, candidate generation, scoring and
//! commitment for one strategy, then resolves connections and metrics.
//!
//! A run moves through [`LayoutPhase`]s in order and never rolls back. Rooms
//! that cannot be placed are skipped with a [`SkipReason`]; the engine itself
//! never fails.
use std::cmp::Reverse;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::geometry::EPSILON;
use crate::layout::candidates::{
    generate_candidates, CandidateContext, CandidateSource, PlacementMode,
};
use crate::layout::circulation::establish_circulation;
use crate::layout::config::LayoutConfig;
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::grid::OccupancyGrid;
use crate::layout::metrics::{compute_metrics, LayoutMetrics};
use crate::layout::scoring::{score_position, ScoreBreakdown, ScoringContext};
use crate::layout::selection::pick_best_by;
use crate::layout::{Building, Corridor, PlacedRoom, PlacementStrategy, RoomProfile};
use crate::program::{
    normalize_program, validate_program, AdjacencyTable, PlacementConstraint, RoomProgram,
    RoomRequest, RuleProvider,
};

/// States of a placement run, entered in declaration order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayoutPhase {
    Idle,
    CirculationEstablished,
    Placing,
    ConnectionsResolved,
    MetricsComputed,
    Done,
}

/// Why a room was left out of a layout.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Width or depth is not a finite positive number.
    InvalidDimensions,
    /// The room is wider or deeper than the envelope.
    ExceedsEnvelope,
    /// Every position is taken by corridors or earlier rooms.
    NoFreePosition,
}

/// How a placed room won its position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRecord {
    pub score: ScoreBreakdown,
    pub mode: PlacementMode,
    pub source: CandidateSource,
    /// Number of open positions that were scored.
    pub candidates: usize,
}

/// Outcome of one program room.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum RoomOutcome {
    Placed { name: String, record: PlacementRecord },
    Skipped { name: String, reason: SkipReason },
}

impl RoomOutcome {
    pub fn name(&self) -> &str {
        match self {
            RoomOutcome::Placed { name, .. } | RoomOutcome::Skipped { name, .. } => name,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, RoomOutcome::Placed { .. })
    }
}

/// Result of one placement run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub strategy: PlacementStrategy,
    pub building: Building,
    /// Committed rooms in placement order.
    pub placed_rooms: Vec<PlacedRoom>,
    pub corridors: Vec<Corridor>,
    pub metrics: LayoutMetrics,
    /// One entry per program room, in program order.
    pub outcomes: Vec<RoomOutcome>,
}

impl LayoutResult {
    pub fn room(&self, name: &str) -> Option<&PlacedRoom> {
        self.placed_rooms.iter().find(|r| r.name == name)
    }

    /// Rooms that were left out, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            RoomOutcome::Skipped { name, reason } => Some((name.as_str(), *reason)),
            RoomOutcome::Placed { .. } => None,
        })
    }
}

pub struct LayoutEngine<'a> {
    /// Run configuration applied to every placement.
    pub config: LayoutConfig,
    /// Adjacency, zone and sizing rules.
    pub rules: &'a dyn RuleProvider,
}

impl<'a> LayoutEngine<'a> {
    pub fn try_new(config: LayoutConfig, rules: &'a dyn RuleProvider) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rules })
    }

    pub fn new(config: LayoutConfig, rules: &'a dyn RuleProvider) -> Self {
        debug_assert!(config.step > 0.0, "step must be > 0");
        debug_assert!(config.corridor_width > 0.0, "corridor_width must be > 0");
        debug_assert!(config.cell_size > 0.0, "cell_size must be > 0");

        Self { config, rules }
    }

    /// Adjacency lookup for the building's type.
    pub fn adjacency_table(&self, building: &Building) -> AdjacencyTable {
        AdjacencyTable::from_rules(self.rules.adjacencies(building.building_type))
    }

    /// Places `program` into `building` using `strategy`.
    pub fn place(
        &self,
        building: &Building,
        program: &RoomProgram,
        strategy: PlacementStrategy,
    ) -> LayoutResult {
        let table = self.adjacency_table(building);
        run_placement(building, program, strategy, self.rules, &table, &self.config, &mut ())
    }

    pub fn place_with_events(
        &self,
        building: &Building,
        program: &RoomProgram,
        strategy: PlacementStrategy,
        sink: &mut dyn EventSink,
    ) -> LayoutResult {
        let table = self.adjacency_table(building);
        run_placement(building, program, strategy, self.rules, &table, &self.config, sink)
    }
}

/// Normalizes `requests` and places them. Invalid rooms are skipped rather
/// than rejected; see [`try_place_rooms`] for the validating variant.
pub fn place_rooms(
    building: &Building,
    requests: &[RoomRequest],
    strategy: PlacementStrategy,
    rules: &dyn RuleProvider,
    config: &LayoutConfig,
) -> LayoutResult {
    let program = normalize_program(requests);
    let table = AdjacencyTable::from_rules(rules.adjacencies(building.building_type));
    run_placement(building, &program, strategy, rules, &table, config, &mut ())
}

/// Validates configuration, envelope and program, then places the rooms.
pub fn try_place_rooms(
    building: &Building,
    requests: &[RoomRequest],
    strategy: PlacementStrategy,
    rules: &dyn RuleProvider,
    config: &LayoutConfig,
) -> Result<LayoutResult> {
    config.validate()?;
    building.validate()?;
    validate_program(requests)?;
    Ok(place_rooms(building, requests, strategy, rules, config))
}

/// Program indices in placement order: zone, priority, descending adjacency
/// weight, then name.
pub fn placement_order(profiles: &[RoomProfile]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..profiles.len()).collect();
    order.sort_by(|&a, &b| {
        let pa = &profiles[a];
        let pb = &profiles[b];
        (pa.zone.rank(), pa.priority.rank(), Reverse(pa.adjacency_weight), &pa.name).cmp(&(
            pb.zone.rank(),
            pb.priority.rank(),
            Reverse(pb.adjacency_weight),
            &pb.name,
        ))
    });
    order
}

fn enter(strategy: PlacementStrategy, phase: LayoutPhase, sink: &mut dyn EventSink) {
    if sink.wants(LayoutEventKind::PhaseEntered) {
        sink.send(LayoutEvent::PhaseEntered { strategy, phase });
    }
}

fn pre_check(room: &RoomProfile, building: &Building) -> Option<SkipReason> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(room.width) || !valid(room.depth) {
        Some(SkipReason::InvalidDimensions)
    } else if room.width > building.width + EPSILON || room.depth > building.depth + EPSILON {
        Some(SkipReason::ExceedsEnvelope)
    } else {
        None
    }
}

/// Connect every pair of rooms that share a wall and whose rule takes a door.
/// Returns the number of connected pairs.
fn resolve_connections(
    placed: &mut [PlacedRoom],
    adjacency: &AdjacencyTable,
    config: &LayoutConfig,
) -> usize {
    let mut pairs = Vec::new();
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            let (a, b) = (&placed[i], &placed[j]);
            if adjacency.strength(&a.base_name, &b.base_name).is_door_capable()
                && a.rect()
                    .shares_wall(&b.rect(), config.wall_tolerance, config.min_shared_wall)
            {
                pairs.push((i, j));
            }
        }
    }
    for &(i, j) in &pairs {
        let name_j = placed[j].name.clone();
        let name_i = placed[i].name.clone();
        placed[i].connected_to.insert(name_j);
        placed[j].connected_to.insert(name_i);
    }
    pairs.len()
}

pub(crate) fn run_placement(
    building: &Building,
    program: &RoomProgram,
    strategy: PlacementStrategy,
    rules: &dyn RuleProvider,
    adjacency: &AdjacencyTable,
    config: &LayoutConfig,
    sink: &mut dyn EventSink,
) -> LayoutResult {
    info!(
        "Placing {} room(s) in {}x{} envelope with strategy '{}'.",
        program.len(),
        building.width,
        building.depth,
        strategy
    );
    if sink.wants(LayoutEventKind::RunStarted) {
        sink.send(LayoutEvent::RunStarted {
            strategy,
            building: *building,
            room_count: program.len(),
        });
    }
    enter(strategy, LayoutPhase::Idle, sink);

    if program.is_empty() {
        warn!("Room program is empty; strategy '{}' places nothing.", strategy);
        if sink.wants(LayoutEventKind::Warning) {
            sink.send(LayoutEvent::Warning {
                context: format!("strategy:{strategy}"),
                message: "Room program is empty".into(),
            });
        }
    }

    let mut grid = OccupancyGrid::new(building.width, building.depth, config.cell_size);
    let corridors = establish_circulation(strategy, building, config, &mut grid);
    enter(strategy, LayoutPhase::CirculationEstablished, sink);
    if sink.wants(LayoutEventKind::CorridorsEstablished) {
        sink.send(LayoutEvent::CorridorsEstablished {
            strategy,
            corridors: corridors.clone(),
        });
    }

    let profiles: Vec<RoomProfile> = program
        .rooms()
        .iter()
        .map(|room| RoomProfile::resolve(room, building.building_type, rules, adjacency))
        .collect();
    let order = placement_order(&profiles);
    if sink.wants(LayoutEventKind::PlacementOrderResolved) {
        sink.send(LayoutEvent::PlacementOrderResolved {
            strategy,
            order: order.iter().map(|&i| profiles[i].name.clone()).collect(),
        });
    }

    enter(strategy, LayoutPhase::Placing, sink);
    let mut placed: Vec<PlacedRoom> = Vec::with_capacity(profiles.len());
    let mut plumbing: Vec<bool> = Vec::with_capacity(profiles.len());
    let mut outcomes: Vec<Option<RoomOutcome>> = vec![None; profiles.len()];

    for &index in &order {
        let room = &profiles[index];
        let outcome = match pre_check(room, building) {
            Some(reason) => Err(reason),
            None => {
                let ctx = CandidateContext {
                    building,
                    strategy,
                    corridors: &corridors,
                    grid: &grid,
                    placed: &placed,
                    config,
                };
                let set = generate_candidates(room, &ctx);
                if sink.wants(LayoutEventKind::CandidatesGenerated) {
                    sink.send(LayoutEvent::CandidatesGenerated {
                        strategy,
                        room: room.name.clone(),
                        mode: set.mode,
                        source: set.source,
                        count: set.len(),
                    });
                }

                let scoring = ScoringContext {
                    building,
                    corridors: &corridors,
                    placed: &placed,
                    plumbing: &plumbing,
                    adjacency,
                    config,
                };
                let best = pick_best_by(&set.positions, |p| {
                    score_position(room, &room.rect_at(*p), &scoring).total()
                });
                match best {
                    Some((winner, _)) => {
                        let position = set.positions[winner];
                        let rect = room.rect_at(position);
                        let record = PlacementRecord {
                            score: score_position(room, &rect, &scoring),
                            mode: set.mode,
                            source: set.source,
                            candidates: set.len(),
                        };
                        Ok((rect, record))
                    }
                    None => Err(SkipReason::NoFreePosition),
                }
            }
        };

        match outcome {
            Ok((rect, record)) => {
                let committed = PlacedRoom {
                    name: room.name.clone(),
                    base_name: room.base_name.clone(),
                    x: rect.min.x,
                    y: rect.min.y,
                    width: room.width,
                    depth: room.depth,
                    zone: room.zone,
                    has_exterior_wall: rect.touches_boundary(
                        building.width,
                        building.depth,
                        config.edge_tolerance,
                    ),
                    connected_to: Default::default(),
                };
                grid.mark(&rect);
                debug!(
                    "Placed '{}' at ({}, {}) with score {:.2} from {} candidate(s).",
                    committed.name,
                    committed.x,
                    committed.y,
                    record.score.total(),
                    record.candidates
                );
                if sink.wants(LayoutEventKind::RoomPlaced) {
                    sink.send(LayoutEvent::RoomPlaced {
                        strategy,
                        room: committed.clone(),
                        score: record.score.total(),
                    });
                }
                placed.push(committed);
                plumbing.push(room.has(PlacementConstraint::PlumbingCluster));
                outcomes[index] = Some(RoomOutcome::Placed {
                    name: room.name.clone(),
                    record,
                });
            }
            Err(reason) => {
                warn!(
                    "Skipped room '{}' ({}x{}) under strategy '{}': {:?}.",
                    room.name, room.width, room.depth, strategy, reason
                );
                if sink.wants(LayoutEventKind::RoomSkipped) {
                    sink.send(LayoutEvent::RoomSkipped {
                        strategy,
                        room: room.name.clone(),
                        reason,
                    });
                }
                outcomes[index] = Some(RoomOutcome::Skipped {
                    name: room.name.clone(),
                    reason,
                });
            }
        }
    }

    let connections = resolve_connections(&mut placed, adjacency, config);
    enter(strategy, LayoutPhase::ConnectionsResolved, sink);
    if sink.wants(LayoutEventKind::ConnectionsResolved) {
        sink.send(LayoutEvent::ConnectionsResolved {
            strategy,
            connections,
        });
    }

    let metrics = compute_metrics(
        building,
        &placed,
        &corridors,
        program.len(),
        adjacency,
        config,
    );
    enter(strategy, LayoutPhase::MetricsComputed, sink);

    info!(
        "Strategy '{}' placed {}/{} room(s); efficiency {:.2}, adjacency {:.2}.",
        strategy,
        metrics.placed_count,
        metrics.requested_count,
        metrics.efficiency,
        metrics.adjacency_satisfaction
    );
    if sink.wants(LayoutEventKind::RunFinished) {
        sink.send(LayoutEvent::RunFinished {
            strategy,
            metrics: metrics.clone(),
        });
    }
    enter(strategy, LayoutPhase::Done, sink);

    LayoutResult {
        strategy,
        building: *building,
        placed_rooms: placed,
        corridors,
        metrics,
        outcomes: outcomes.into_iter().flatten().collect(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;
    use crate::layout::events::VecSink;
    use crate::program::{
        AdjacencyStrength, DaylightRequirement, PlacementPriority, RoomRule, TableRules, Zone,
    };

    fn assert_layout_invariants(result: &LayoutResult, config: &LayoutConfig) {
        let b = &result.building;
        for (i, a) in result.placed_rooms.iter().enumerate() {
            assert!(
                a.rect().is_within(b.width, b.depth),
                "{} outside envelope",
                a.name
            );
            for other in &result.placed_rooms[i + 1..] {
                let (ox, oy) = (
                    a.rect().overlap_len_x(&other.rect()),
                    a.rect().overlap_len_y(&other.rect()),
                );
                assert!(
                    ox <= EPSILON || oy <= EPSILON,
                    "{} and {} share {ox}x{oy} ft of floor",
                    a.name,
                    other.name
                );
                assert!(
                    !a.rect().overlaps(&other.rect(), config.overlap_buffer),
                    "{} crowds {}",
                    a.name,
                    other.name
                );
            }
            for corridor in &result.corridors {
                assert!(!a.rect().intersects(&corridor.rect()));
            }
        }
        let m = &result.metrics;
        for value in [
            m.efficiency,
            m.circulation_ratio,
            m.adjacency_satisfaction,
            m.daylight_ratio,
            m.placement_success,
        ] {
            assert!((0.0..=1.0).contains(&value), "metric {value} out of range");
        }
        assert_eq!(
            m.placement_success == 1.0,
            result.placed_rooms.len() == m.requested_count
        );
    }

    #[test]
    fn single_office_avoids_central_corridor() {
        let config = LayoutConfig::default();
        let result = place_rooms(
            &Building::new(40.0, 30.0),
            &[RoomRequest::new("Office", 12.0, 10.0)],
            PlacementStrategy::DoubleLoaded,
            &TableRules::new(),
            &config,
        );
        assert_eq!(result.placed_rooms.len(), 1);
        assert_eq!(result.corridors.len(), 1);
        let office = result.placed_rooms[0].rect();
        assert!(!office.intersects(&result.corridors[0].rect()));
        assert_eq!(result.metrics.placement_success, 1.0);
        assert_layout_invariants(&result, &config);
    }

    #[test]
    fn oversized_room_is_skipped_without_panic() {
        let result = place_rooms(
            &Building::new(10.0, 10.0),
            &[RoomRequest::new("Hall", 20.0, 5.0)],
            PlacementStrategy::Linear,
            &TableRules::new(),
            &LayoutConfig::default(),
        );
        assert!(result.placed_rooms.is_empty());
        assert_eq!(result.metrics.placement_success, 0.0);
        let skipped: Vec<_> = result.skipped().collect();
        assert_eq!(skipped, vec![("Hall", SkipReason::ExceedsEnvelope)]);
    }

    #[test]
    fn must_connect_pair_shares_a_door() {
        let rules = TableRules::new().with_adjacency(
            "Kitchen",
            "Dining",
            AdjacencyStrength::MustConnect,
        );
        let result = place_rooms(
            &Building::new(40.0, 30.0),
            &[
                RoomRequest::new("Kitchen", 12.0, 10.0),
                RoomRequest::new("Dining", 12.0, 10.0),
            ],
            PlacementStrategy::DoubleLoaded,
            &rules,
            &LayoutConfig::default(),
        );
        let kitchen = result.room("Kitchen").expect("kitchen placed");
        let dining = result.room("Dining").expect("dining placed");
        assert!(kitchen.is_connected_to("Dining"));
        assert!(dining.is_connected_to("Kitchen"));
        assert_eq!(result.metrics.adjacency_satisfaction, 1.0);
    }

    #[test]
    fn required_daylight_lands_on_exterior() {
        let rules = TableRules::new()
            .with_room("Bedroom", Zone::Private, PlacementPriority::Middle)
            .with_room_rule("Bedroom", RoomRule::new(DaylightRequirement::Required));
        let result = place_rooms(
            &Building::new(60.0, 60.0),
            &[RoomRequest::new("Bedroom", 12.0, 12.0)],
            PlacementStrategy::Cluster,
            &rules,
            &LayoutConfig::default(),
        );
        assert_eq!(result.placed_rooms.len(), 1);
        assert!(result.placed_rooms[0].has_exterior_wall);
    }

    #[test]
    fn required_daylight_beats_competing_pull_inward() {
        let rules = TableRules::new()
            .with_room("Lounge", Zone::Public, PlacementPriority::NearEntry)
            .with_room_rule(
                "Lounge",
                RoomRule::default().with_constraint(PlacementConstraint::Core),
            )
            .with_room("Bedroom", Zone::Private, PlacementPriority::Middle)
            .with_room_rule(
                "Bedroom",
                RoomRule::new(DaylightRequirement::Required)
                    .with_constraint(PlacementConstraint::Core),
            )
            .with_adjacency("Lounge", "Bedroom", AdjacencyStrength::MustConnect);
        let config = LayoutConfig::default();
        let result = place_rooms(
            &Building::new(80.0, 80.0),
            &[
                RoomRequest::new("Bedroom", 10.0, 10.0),
                RoomRequest::new("Lounge", 12.0, 12.0),
            ],
            PlacementStrategy::Cluster,
            &rules,
            &config,
        );
        let lounge = result.room("Lounge").expect("lounge placed");
        let bedroom = result.room("Bedroom").expect("bedroom placed");
        assert!(!lounge.has_exterior_wall);
        assert!(bedroom.has_exterior_wall);
        assert!(bedroom.rect().touches_boundary(80.0, 80.0, config.edge_tolerance));
        assert_layout_invariants(&result, &config);
    }

    #[test]
    fn half_foot_rooms_never_cut_into_each_other() {
        let config = LayoutConfig::default();
        let result = place_rooms(
            &Building::new(40.0, 30.0),
            &[
                RoomRequest::new("A", 12.5, 10.0),
                RoomRequest::new("B", 12.5, 10.0),
            ],
            PlacementStrategy::Perimeter,
            &TableRules::new(),
            &config,
        );
        assert_eq!(result.placed_rooms.len(), 2);
        let a = result.room("A").expect("A placed").rect();
        let b = result.room("B").expect("B placed").rect();
        assert!(!a.intersects(&b), "A {a:?} intersects B {b:?}");
        assert!((result.metrics.efficiency - 250.0 / 1200.0).abs() < 1e-6);
        assert_layout_invariants(&result, &config);
    }

    #[test]
    fn placement_order_follows_zone_priority_weight_and_name() {
        let profile = |name: &str, zone, priority, weight| RoomProfile {
            name: name.into(),
            base_name: name.into(),
            width: 10.0,
            depth: 10.0,
            zone,
            priority,
            rule: RoomRule::default(),
            adjacency_weight: weight,
        };
        let profiles = vec![
            profile("Storage", Zone::Service, PlacementPriority::Middle, 9),
            profile("Office B", Zone::Private, PlacementPriority::Middle, 1),
            profile("Office A", Zone::Private, PlacementPriority::Middle, 1),
            profile("Conference", Zone::Private, PlacementPriority::Middle, 5),
            profile("Lounge", Zone::Private, PlacementPriority::NearEntry, 0),
            profile("Lobby", Zone::Public, PlacementPriority::Back, 0),
        ];
        let names: Vec<&str> = placement_order(&profiles)
            .into_iter()
            .map(|i| profiles[i].name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Lobby", "Lounge", "Conference", "Office A", "Office B", "Storage"]
        );
    }

    #[test]
    fn phases_are_entered_in_order() {
        let rules = TableRules::new();
        let engine = LayoutEngine::new(LayoutConfig::default(), &rules);
        let program = RoomProgram::try_from_requests(&[RoomRequest::new("Office", 10.0, 10.0)])
            .expect("valid program");
        let mut sink = VecSink::only([LayoutEventKind::PhaseEntered]);
        engine.place_with_events(
            &Building::new(40.0, 30.0),
            &program,
            PlacementStrategy::Linear,
            &mut sink,
        );
        let phases: Vec<LayoutPhase> = sink
            .as_slice()
            .iter()
            .filter_map(|e| match e {
                LayoutEvent::PhaseEntered { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                LayoutPhase::Idle,
                LayoutPhase::CirculationEstablished,
                LayoutPhase::Placing,
                LayoutPhase::ConnectionsResolved,
                LayoutPhase::MetricsComputed,
                LayoutPhase::Done,
            ]
        );
    }

    #[test]
    fn try_place_rooms_rejects_invalid_input() {
        let rules = TableRules::new();
        let config = LayoutConfig::default();
        let bad_room = try_place_rooms(
            &Building::new(40.0, 30.0),
            &[RoomRequest::new("Office", -1.0, 10.0)],
            PlacementStrategy::Linear,
            &rules,
            &config,
        );
        assert!(bad_room.is_err());
        let bad_envelope = try_place_rooms(
            &Building::new(0.0, 30.0),
            &[],
            PlacementStrategy::Linear,
            &rules,
            &config,
        );
        assert!(bad_envelope.is_err());
        assert!(LayoutEngine::try_new(config.with_step(0.0), &rules).is_err());
    }

    #[test]
    fn invalid_dimensions_are_skipped_by_lenient_entry_point() {
        let result = place_rooms(
            &Building::new(40.0, 30.0),
            &[
                RoomRequest::new("Ghost", 0.0, 10.0),
                RoomRequest::new("Office", 10.0, 10.0),
            ],
            PlacementStrategy::Perimeter,
            &TableRules::new(),
            &LayoutConfig::default(),
        );
        assert_eq!(result.placed_rooms.len(), 1);
        assert_eq!(
            result.skipped().collect::<Vec<_>>(),
            vec![("Ghost", SkipReason::InvalidDimensions)]
        );
        assert_eq!(result.metrics.placement_success, 0.5);
    }

    #[test]
    fn runs_are_deterministic() {
        let rules = TableRules::new()
            .with_room("Lobby", Zone::Public, PlacementPriority::NearEntry)
            .with_adjacency("Lobby", "Office", AdjacencyStrength::PreferNear);
        let requests = [
            RoomRequest::new("Lobby", 14.0, 10.0),
            RoomRequest::new("Office", 10.0, 10.0),
            RoomRequest::new("Office", 10.0, 12.0),
            RoomRequest::new("Storage", 6.0, 6.0),
        ];
        for strategy in PlacementStrategy::ALL {
            let a = place_rooms(
                &Building::new(50.0, 36.0),
                &requests,
                strategy,
                &rules,
                &LayoutConfig::default(),
            );
            let b = place_rooms(
                &Building::new(50.0, 36.0),
                &requests,
                strategy,
                &rules,
                &LayoutConfig::default(),
            );
            assert_eq!(a, b, "strategy {strategy} is not deterministic");
        }
    }

    #[test]
    fn random_programs_respect_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = LayoutConfig::default();
        let rules = TableRules::new()
            .with_room("Room 0", Zone::Public, PlacementPriority::NearEntry)
            .with_room("Room 3", Zone::Service, PlacementPriority::Back)
            .with_room_rule("Room 1", RoomRule::new(DaylightRequirement::Required))
            .with_adjacency("Room 1", "Room 2", AdjacencyStrength::MustConnect)
            .with_adjacency("Room 0", "Room 3", AdjacencyStrength::MustSeparate);

        for _ in 0..12 {
            let width = 20.0 + (rng.random::<f32>() * 80.0).round() * 0.5;
            let depth = 16.0 + (rng.random::<f32>() * 60.0).round() * 0.5;
            let count = 1 + (rng.random::<f32>() * 7.0) as usize;
            let requests: Vec<RoomRequest> = (0..count)
                .map(|i| {
                    RoomRequest::new(
                        format!("Room {}", i % 5),
                        4.0 + (rng.random::<f32>() * 28.0).round() * 0.5,
                        4.0 + (rng.random::<f32>() * 24.0).round() * 0.5,
                    )
                })
                .collect();
            for strategy in PlacementStrategy::ALL {
                let result = place_rooms(
                    &Building::new(width, depth),
                    &requests,
                    strategy,
                    &rules,
                    &config,
                );
                assert_eq!(result.outcomes.len(), requests.len());
                assert_layout_invariants(&result, &config);
            }
        }
    }
}
